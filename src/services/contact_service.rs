/// Contact service - validation and business logic on top of a contact store
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::constants::MAX_LIST_LIMIT;
use crate::models::{Contact, ContactBody, SearchFilter};
use crate::services::birthday_finder;
use crate::store::{ContactStore, StoreError};
use crate::utils::validation::{ValidationError, validate_contact};

/// Errors produced by contact operations
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    Store(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(err) => write!(f, "{}", err),
            ServiceError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Validation(err) => Some(err),
            ServiceError::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

/// Service for contact-related operations
pub struct ContactService<'a, S> {
    store: &'a S,
}

impl<'a, S: ContactStore> ContactService<'a, S> {
    /// Create a new contact service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validate and store a new contact
    pub async fn create_contact(
        &self,
        body: ContactBody,
        today: NaiveDate,
    ) -> Result<Contact, ServiceError> {
        let body = Self::validated(body, today)?;
        let contact = self.store.create(body).await?;

        info!("Created contact {}", contact.id);
        Ok(contact)
    }

    pub async fn get_contact(&self, id: i32) -> Result<Option<Contact>, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    /// List contacts page by page; `limit` is capped at `MAX_LIST_LIMIT`
    pub async fn list_contacts(&self, skip: u32, limit: u32) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.store.list(skip, limit.min(MAX_LIST_LIMIT)).await?)
    }

    /// Validate and fully replace an existing contact
    pub async fn update_contact(
        &self,
        id: i32,
        body: ContactBody,
        today: NaiveDate,
    ) -> Result<Option<Contact>, ServiceError> {
        let body = Self::validated(body, today)?;
        let contact = self.store.update(id, body).await?;

        if contact.is_some() {
            info!("Updated contact {}", id);
        }
        Ok(contact)
    }

    pub async fn remove_contact(&self, id: i32) -> Result<Option<Contact>, ServiceError> {
        let contact = self.store.remove(id).await?;

        if contact.is_some() {
            info!("Removed contact {}", id);
        }
        Ok(contact)
    }

    pub async fn search_contacts(&self, filter: &SearchFilter) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.store.search(filter).await?)
    }

    /// Contacts with a birthday in the week starting `today`
    pub async fn upcoming_birthdays(&self, today: NaiveDate) -> Result<Vec<Contact>, ServiceError> {
        let contacts = self.store.fetch_all().await?;
        let upcoming = birthday_finder::upcoming_birthdays(contacts, today);

        debug!("{} upcoming birthdays from {}", upcoming.len(), today);
        Ok(upcoming)
    }

    fn validated(body: ContactBody, today: NaiveDate) -> Result<ContactBody, ValidationError> {
        validate_contact(body, today).inspect_err(|err| debug!("Rejected contact: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{body, date};
    use crate::store::MemoryStore;

    fn today() -> NaiveDate {
        date(2025, 12, 28)
    }

    #[tokio::test]
    async fn test_create_contact_trims_input() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        let contact = service
            .create_contact(body("  Ann ", "Lee", " ann@example.com ", date(1990, 1, 3)), today())
            .await
            .unwrap();

        assert_eq!(contact.first_name, "Ann");
        assert_eq!(contact.email, "ann@example.com");
        assert_eq!(service.get_contact(contact.id).await.unwrap(), Some(contact));
    }

    #[tokio::test]
    async fn test_create_contact_rejects_invalid_body_before_store() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        let result = service
            .create_contact(body("Ann", "Lee", "not-an-email", date(1990, 1, 3)), today())
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(ValidationError::InvalidEmail(_)))));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_contact_rejects_future_birth_date() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        let result = service
            .create_contact(body("Ann", "Lee", "ann@example.com", date(2026, 1, 1)), today())
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::BirthDateInFuture(_)))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_surfaces_as_store_error() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        service
            .create_contact(body("Ann", "Lee", "ann@example.com", date(1990, 1, 3)), today())
            .await
            .unwrap();
        let result = service
            .create_contact(body("Other", "Ann", "ann@example.com", date(1991, 2, 3)), today())
            .await;

        assert!(matches!(result, Err(ServiceError::Store(StoreError::DuplicateEmail(_)))));
    }

    #[tokio::test]
    async fn test_list_contacts_caps_limit() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        for i in 0..(MAX_LIST_LIMIT + 5) {
            service
                .create_contact(
                    body("Bulk", "Contact", &format!("bulk{}@example.com", i), date(1990, 1, 1)),
                    today(),
                )
                .await
                .unwrap();
        }

        let page = service.list_contacts(0, u32::MAX).await.unwrap();
        assert_eq!(page.len(), MAX_LIST_LIMIT as usize);
    }

    #[tokio::test]
    async fn test_update_and_remove_missing_contact() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        let updated = service
            .update_contact(5, body("Ann", "Lee", "ann@example.com", date(1990, 1, 3)), today())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(service.remove_contact(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_uses_whole_store() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);

        let soon = service
            .create_contact(body("Soon", "Jan", "soon@example.com", date(1980, 1, 3)), today())
            .await
            .unwrap();
        service
            .create_contact(body("Later", "Jan", "later@example.com", date(1980, 1, 4)), today())
            .await
            .unwrap();
        let now = service
            .create_contact(body("Now", "Dec", "now@example.com", date(1980, 12, 28)), today())
            .await
            .unwrap();

        let upcoming = service.upcoming_birthdays(today()).await.unwrap();
        assert_eq!(upcoming, vec![now, soon]);
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_empty_store() {
        let store = MemoryStore::new();
        let service = ContactService::new(&store);
        assert!(service.upcoming_birthdays(today()).await.unwrap().is_empty());
    }
}
