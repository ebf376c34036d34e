//! # Storage Layer
//!
//! Contacts are owned by an external backend. The [`ContactStore`] trait is the
//! seam between the command layer and that backend; commands never know
//! whether they talk HTTP or an in-process map.
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: Production implementation over the REST contract
//!   (`/contacts`, `/contacts/{id}`), built on `reqwest`.
//! - [`memory::InMemoryStore`]: For testing logic without a network. It also
//!   emulates the paged query parameters of the server-side strategy.
//!
//! ## Contract
//!
//! | Operation | HTTP | Failure |
//! |-----------|------|---------|
//! | `list_contacts` | `GET /contacts` | `Network`, `Backend` |
//! | `query_page` | `GET /contacts?_page&_limit&name_like&favourite` | `Network`, `Backend` |
//! | `get_contact` | `GET /contacts/{id}` | `NotFound` |
//! | `create_contact` | `POST /contacts` | `Network`, `Backend` |
//! | `replace_contact` | `PUT /contacts/{id}` | `NotFound` |
//! | `patch_contact` | `PATCH /contacts/{id}` | `NotFound` |
//! | `delete_contact` | `DELETE /contacts/{id}` | `NotFound` |
//!
//! No operation is atomic with respect to another; read-then-write sequences
//! (duplicate checks, merge updates) can interleave with other clients.

use crate::error::Result;
use crate::model::{Contact, ContactFormData, ContactId, ContactPatch, ContactQuery};
use async_trait::async_trait;

pub mod http;
pub mod memory;

/// One page of contacts plus the number of contacts matching the filters.
#[derive(Debug, Clone, Default)]
pub struct StorePage {
    pub contacts: Vec<Contact>,
    pub total: usize,
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Fetch the entire collection, in backend order.
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Let the backend filter and paginate.
    async fn query_page(&self, query: &ContactQuery) -> Result<StorePage>;

    /// Fetch one contact by id.
    async fn get_contact(&self, id: &ContactId) -> Result<Contact>;

    /// Insert a contact; the backend assigns the id.
    async fn create_contact(&self, form: &ContactFormData) -> Result<Contact>;

    /// Replace the full record stored under `contact.id`.
    async fn replace_contact(&self, contact: &Contact) -> Result<Contact>;

    /// Update only the fields present in `patch`.
    async fn patch_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact>;

    /// Remove a contact permanently.
    async fn delete_contact(&self, id: &ContactId) -> Result<()>;
}
