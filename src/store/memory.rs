use std::sync::atomic::{AtomicI32, Ordering};

use dashmap::{DashMap, mapref::entry::Entry};

use super::{ContactStore, StoreError};
use crate::models::{Contact, ContactBody, SearchFilter};

/// Contact store kept entirely in memory.
///
/// `emails` maps each stored email to the id owning it; reserving an entry
/// there is what makes email uniqueness atomic. Locks are always taken on
/// `emails` before `contacts`, and a contact only changes email while the
/// new address's entry is held.
pub struct MemoryStore {
    contacts: DashMap<i32, Contact>,
    emails: DashMap<String, i32>,
    next_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            contacts: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Replace contact `id` only while it still holds `current_email`
    fn replace_if_current(&self, id: i32, current_email: &str, body: &ContactBody) -> Replace {
        match self.contacts.get_mut(&id) {
            Some(mut entry) if entry.email == current_email => {
                *entry = Contact::from_body(id, body.clone());
                Replace::Done(entry.value().clone())
            }
            Some(_) => Replace::Stale,
            None => Replace::Missing,
        }
    }

    /// Drop the reservation of `email` by `id` unless the contact uses it again
    fn release_email(&self, id: i32, email: &str) {
        self.emails.remove_if(email, |_, owner| {
            *owner == id
                && self
                    .contacts
                    .get(&id)
                    .is_none_or(|contact| contact.email != email)
        });
    }

    fn sorted(&self, filter: impl Fn(&Contact) -> bool) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self
            .contacts
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        contacts.sort_unstable_by_key(|contact| contact.id);
        contacts
    }
}

enum Replace {
    Done(Contact),
    Stale,
    Missing,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore for MemoryStore {
    async fn create(&self, body: ContactBody) -> Result<Contact, StoreError> {
        match self.emails.entry(body.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail(body.email)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let contact = Contact::from_body(id, body);
                self.contacts.insert(id, contact.clone());
                slot.insert(id);
                Ok(contact)
            }
        }
    }

    async fn get(&self, id: i32) -> Result<Option<Contact>, StoreError> {
        Ok(self.contacts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Contact>, StoreError> {
        Ok(self
            .sorted(|_| true)
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update(&self, id: i32, body: ContactBody) -> Result<Option<Contact>, StoreError> {
        loop {
            let Some(old_email) = self.contacts.get(&id).map(|entry| entry.email.clone()) else {
                return Ok(None);
            };

            // The new email's entry stays locked until the contact is replaced
            let outcome = if old_email == body.email {
                self.replace_if_current(id, &old_email, &body)
            } else {
                match self.emails.entry(body.email.clone()) {
                    Entry::Occupied(owner) if *owner.get() != id => {
                        return Err(StoreError::DuplicateEmail(body.email));
                    }
                    Entry::Occupied(_) => self.replace_if_current(id, &old_email, &body),
                    Entry::Vacant(slot) => {
                        let outcome = self.replace_if_current(id, &old_email, &body);
                        if let Replace::Done(_) = outcome {
                            slot.insert(id);
                        }
                        outcome
                    }
                }
            };

            match outcome {
                Replace::Done(updated) => {
                    if old_email != updated.email {
                        self.release_email(id, &old_email);
                    }
                    return Ok(Some(updated));
                }
                // Another update won the race; start over from its result
                Replace::Stale => continue,
                Replace::Missing => return Ok(None),
            }
        }
    }

    async fn remove(&self, id: i32) -> Result<Option<Contact>, StoreError> {
        let Some((_, contact)) = self.contacts.remove(&id) else {
            return Ok(None);
        };

        self.release_email(id, &contact.email);
        Ok(Some(contact))
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Contact>, StoreError> {
        let predicates = filter.predicates();
        Ok(self.sorted(|contact| predicates.iter().all(|predicate| predicate.matches(contact))))
    }

    async fn fetch_all(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.sorted(|_| true))
    }
}
