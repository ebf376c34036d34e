use super::{ContactStore, StorePage};
use crate::commands::list::filter_contacts;
use crate::error::{ContactsError, Result};
use crate::model::{Contact, ContactFormData, ContactId, ContactPatch, ContactQuery};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Collection {
    contacts: Vec<Contact>,
    last_id: u64,
}

/// In-process contact store.
///
/// Ids come from a counter that only moves forward, so a deleted contact's id
/// is never handed out again. Writes are counted so tests can assert that a
/// rejected operation never reached the store.
#[derive(Default)]
pub struct InMemoryStore {
    collection: Mutex<Collection>,
    writes: AtomicUsize,
    reads: AtomicUsize,
    simulate_network_error: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a network error.
    pub fn set_simulate_network_error(&self, simulate: bool) {
        self.simulate_network_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful create/replace/patch/delete calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of list/query/get calls that reached the store.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Inserts a contact with a caller-chosen id, bypassing id assignment.
    pub fn insert(&self, contact: Contact) {
        let mut collection = self.lock();
        if let Ok(n) = contact.id.as_str().parse::<u64>() {
            collection.last_id = collection.last_id.max(n);
        }
        collection.contacts.push(contact);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Collection> {
        // A poisoned lock still holds consistent data: every mutation is a single push/assign.
        self.collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_network(&self) -> Result<()> {
        if self.simulate_network_error.load(Ordering::SeqCst) {
            return Err(ContactsError::Network("Simulated network error".to_string()));
        }
        Ok(())
    }

    fn record_read(&self) -> Result<()> {
        self.check_network()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContactStore for InMemoryStore {
    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.record_read()?;
        Ok(self.lock().contacts.clone())
    }

    async fn query_page(&self, query: &ContactQuery) -> Result<StorePage> {
        self.record_read()?;
        let filtered = filter_contacts(
            self.lock().contacts.clone(),
            &query.search,
            query.favourite_only,
        );
        let total = filtered.len();
        let contacts = filtered
            .into_iter()
            .skip(query.offset())
            .take(query.limit)
            .collect();
        Ok(StorePage { contacts, total })
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        self.record_read()?;
        self.lock()
            .contacts
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| ContactsError::NotFound(id.clone()))
    }

    async fn create_contact(&self, form: &ContactFormData) -> Result<Contact> {
        self.check_network()?;
        let mut collection = self.lock();
        collection.last_id += 1;
        let contact = Contact::from_form(ContactId::from(collection.last_id), form.clone());
        collection.contacts.push(contact.clone());
        self.record_write();
        Ok(contact)
    }

    async fn replace_contact(&self, contact: &Contact) -> Result<Contact> {
        self.check_network()?;
        let mut collection = self.lock();
        let slot = collection
            .contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or_else(|| ContactsError::NotFound(contact.id.clone()))?;
        *slot = contact.clone();
        self.record_write();
        Ok(contact.clone())
    }

    async fn patch_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact> {
        self.check_network()?;
        let mut collection = self.lock();
        let slot = collection
            .contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ContactsError::NotFound(id.clone()))?;
        slot.apply(patch);
        let updated = slot.clone();
        self.record_write();
        Ok(updated)
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<()> {
        self.check_network()?;
        let mut collection = self.lock();
        let position = collection
            .contacts
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| ContactsError::NotFound(id.clone()))?;
        collection.contacts.remove(position);
        self.record_write();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` contacts named "Contact 1".."Contact N" with ids 1..N.
        pub fn with_contacts(self, count: usize) -> Self {
            for i in 1..=count {
                self.store.insert(Contact::from_form(
                    ContactId::from(i as u64),
                    ContactFormData::new(
                        format!("Contact {}", i),
                        format!("contact{}@example.com", i),
                        format!("555-000-{:04}", i),
                        format!("{} Main St", i),
                    ),
                ));
            }
            self
        }

        pub fn with_contact(self, name: &str, email: &str, phone: &str, favourite: bool) -> Self {
            let next = self.store.lock().last_id + 1;
            self.store.insert(Contact::from_form(
                ContactId::from(next),
                ContactFormData::new(name, email, phone, "1 Main St").with_favourite(favourite),
            ));
            self
        }

        pub fn build(self) -> InMemoryStore {
            self.store
        }
    }
}
