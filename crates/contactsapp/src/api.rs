//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for all contacts operations, regardless of the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (raw id strings, page numbers, configured page size)
//! - **Owns the query cache**: reads go through it, writes invalidate it
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Terminal I/O**: No stdout, stderr, or formatting
//!
//! ## Invalidation
//!
//! | operation            | invalidates            |
//! |----------------------|------------------------|
//! | create               | `contacts`             |
//! | update / favourite   | `contacts`, `contact`  |
//! | delete               | `contacts`, `contact`  |
//!
//! Invalidation happens only after the backend accepted the write. A failed
//! mutation leaves the cache as it was.
//!
//! ## Generic Over ContactStore
//!
//! `ContactsApi<S: ContactStore>` is generic over the backend:
//! - Production: `ContactsApi<HttpStore>`
//! - Testing: `ContactsApi<InMemoryStore>`
//!
//! API tests verify caching and invalidation, not command logic.

use crate::cache::{CachedValue, KeyFamily, QueryCache, QueryKey};
use crate::commands::{self, export::ExportFormat, CmdResult};
use crate::config::ContactsConfig;
use crate::error::{ContactsError, Result};
use crate::model::{Contact, ContactFormData, ContactId, ContactPatch, ContactQuery, ContactsResponse};
use crate::store::ContactStore;
use std::path::Path;
use tracing::debug;

pub struct ContactsApi<S: ContactStore> {
    store: S,
    cache: QueryCache,
    config: ContactsConfig,
}

impl<S: ContactStore> ContactsApi<S> {
    pub fn new(store: S, config: ContactsConfig) -> Self {
        let cache = QueryCache::new(config.stale_time());
        Self {
            store,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &ContactsConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Builds a query for `page` using the configured page size.
    pub fn query(&self, page: usize, search: &str, favourite_only: bool) -> ContactQuery {
        ContactQuery::new(page, self.config.page_size, search, favourite_only)
    }

    pub async fn list_contacts(
        &self,
        page: usize,
        search: &str,
        favourite_only: bool,
    ) -> Result<CmdResult> {
        let query = self.query(page, search, favourite_only);
        let response = self.fetch_page(&query).await?;
        Ok(commands::list::into_result(response))
    }

    /// One page of results, served from the cache while fresh.
    pub async fn fetch_page(&self, query: &ContactQuery) -> Result<ContactsResponse> {
        if let Some(page) = self.cache.get_page(query).await {
            return Ok(page);
        }

        let key = QueryKey::Contacts(query.clone());
        let ticket = self.cache.ticket(&key).await;
        debug!("[ContactsApi] fetching {:?}", query);
        let response =
            commands::list::fetch_contacts(&self.store, query, self.config.query_strategy).await?;
        self.cache
            .store(key, CachedValue::Page(response.clone()), ticket)
            .await;
        Ok(response)
    }

    pub async fn get_contact(&self, id: &str) -> Result<CmdResult> {
        let id = parse_contact_id(id)?;
        let contact = self.fetch_contact(&id).await?;
        Ok(CmdResult::default().with_listed_contacts(vec![contact]))
    }

    async fn fetch_contact(&self, id: &ContactId) -> Result<Contact> {
        if let Some(contact) = self.cache.get_contact(id).await {
            return Ok(contact);
        }

        let key = QueryKey::Contact(id.clone());
        let ticket = self.cache.ticket(&key).await;
        let contact = commands::get::fetch_contact(&self.store, id).await?;
        self.cache
            .store(key, CachedValue::Contact(contact.clone()), ticket)
            .await;
        Ok(contact)
    }

    pub async fn create_contact(&self, form: ContactFormData) -> Result<CmdResult> {
        let result =
            commands::create::run(&self.store, form, self.config.check_duplicates).await?;
        self.cache.invalidate(KeyFamily::Contacts).await;
        Ok(result)
    }

    pub async fn update_contact(&self, id: &str, patch: &ContactPatch) -> Result<CmdResult> {
        let id = parse_contact_id(id)?;
        let result =
            commands::update::run(&self.store, &id, patch, self.config.update_strategy).await?;
        if !result.affected_contacts.is_empty() {
            self.invalidate_all().await;
        }
        Ok(result)
    }

    pub async fn delete_contact(&self, id: &str) -> Result<CmdResult> {
        let id = parse_contact_id(id)?;
        let result = commands::delete::run(&self.store, &id).await?;
        self.invalidate_all().await;
        Ok(result)
    }

    pub async fn favourite_contacts<I: AsRef<str>>(&self, ids: &[I]) -> Result<CmdResult> {
        let ids = parse_contact_ids(ids)?;
        let result =
            commands::favourite::favourite(&self.store, &ids, self.config.update_strategy).await;
        // A batch can fail part way through; earlier writes still landed.
        self.invalidate_all().await;
        result
    }

    pub async fn unfavourite_contacts<I: AsRef<str>>(&self, ids: &[I]) -> Result<CmdResult> {
        let ids = parse_contact_ids(ids)?;
        let result =
            commands::favourite::unfavourite(&self.store, &ids, self.config.update_strategy)
                .await;
        self.invalidate_all().await;
        result
    }

    /// Exports every contact matching the filters, across all pages, in
    /// display order.
    pub async fn export_contacts(
        &self,
        search: &str,
        favourite_only: bool,
        format: ExportFormat,
        dir: &Path,
    ) -> Result<CmdResult> {
        let contacts = commands::list::fetch_matching(&self.store, search, favourite_only).await?;
        commands::export::run(&contacts, format, dir)
    }

    async fn invalidate_all(&self) {
        self.cache.invalidate(KeyFamily::Contacts).await;
        self.cache.invalidate(KeyFamily::Contact).await;
    }
}

/// Trims a raw id; empty input is rejected.
pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContactsError::Api("Contact id cannot be empty".to_string()));
    }
    Ok(ContactId::from(trimmed))
}

/// Parses ids in order, dropping repeats.
pub fn parse_contact_ids<I: AsRef<str>>(raw: &[I]) -> Result<Vec<ContactId>> {
    let mut ids: Vec<ContactId> = Vec::with_capacity(raw.len());
    for r in raw {
        let id = parse_contact_id(r.as_ref())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(ContactsError::Api("No contact ids given".to_string()));
    }
    Ok(ids)
}
