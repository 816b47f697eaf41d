/// Contact storage abstraction and its in-memory backend
mod memory;

pub use memory::MemoryStore;

use std::future::Future;

use crate::models::{Contact, ContactBody, SearchFilter};

/// Errors raised by a contact store
#[derive(Debug)]
pub enum StoreError {
    DuplicateEmail(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateEmail(email) => {
                write!(f, "A contact with email {} already exists", email)
            }
            StoreError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::DuplicateEmail(_) => None,
            StoreError::Database(err) => Some(err),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Persistent collection of contacts.
///
/// Lookups by id return `None` when the contact does not exist. Listing
/// operations return contacts ordered by id. Email uniqueness is enforced on
/// every write.
pub trait ContactStore: Send + Sync + 'static {
    fn create(&self, body: ContactBody) -> impl Future<Output = Result<Contact, StoreError>> + Send;

    fn get(&self, id: i32) -> impl Future<Output = Result<Option<Contact>, StoreError>> + Send;

    fn list(
        &self,
        skip: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Contact>, StoreError>> + Send;

    /// Replace every field of an existing contact
    fn update(
        &self,
        id: i32,
        body: ContactBody,
    ) -> impl Future<Output = Result<Option<Contact>, StoreError>> + Send;

    /// Delete a contact, returning it as it was before removal
    fn remove(&self, id: i32) -> impl Future<Output = Result<Option<Contact>, StoreError>> + Send;

    fn search(
        &self,
        filter: &SearchFilter,
    ) -> impl Future<Output = Result<Vec<Contact>, StoreError>> + Send;

    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Contact>, StoreError>> + Send;
}
