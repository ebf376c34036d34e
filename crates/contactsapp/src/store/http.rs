use super::{ContactStore, StorePage};
use crate::config::ContactsConfig;
use crate::error::{ContactsError, Result};
use crate::model::{Contact, ContactFormData, ContactId, ContactPatch, ContactQuery};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

/// `X-Total-Count`, in the lowercase form `HeaderName` requires.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// REST client for a json-server style contacts backend.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// `client` should already carry any auth headers and timeouts.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ContactsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::new(client, config.base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }

    fn contact_url(&self, id: &ContactId) -> String {
        format!("{}/contacts/{}", self.base_url, id)
    }

    /// Maps 404 to `NotFound(id)` and other failures to `Backend`.
    async fn check(response: Response, id: Option<&ContactId>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ContactsError::NotFound(id.clone()));
            }
        }
        let body = response.text().await.unwrap_or_default();
        error!("[HttpStore] request failed, status: {}, body: {}", status, body);
        Err(ContactsError::Backend {
            status: status.as_u16(),
            message: if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                "[HttpStore] failed to decode response: {:?}, raw: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            ContactsError::Serialization(e)
        })
    }
}

/// Query parameters for the server-side strategy.
pub fn page_query_params(query: &ContactQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("_page", query.page.to_string()),
        ("_limit", query.limit.to_string()),
    ];
    if !query.search.is_empty() {
        params.push(("name_like", query.search.clone()));
    }
    if query.favourite_only {
        params.push(("favourite", "true".to_string()));
    }
    params
}

/// Reads the total from `X-Total-Count`; `None` when absent or malformed.
pub fn total_count(headers: &reqwest::header::HeaderMap) -> Option<usize> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[async_trait]
impl ContactStore for HttpStore {
    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let url = self.collection_url();
        debug!("[HttpStore] GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check(response, None).await?;
        let contacts: Vec<Contact> = Self::decode(response).await?;
        info!("[HttpStore] fetched {} contacts", contacts.len());
        Ok(contacts)
    }

    async fn query_page(&self, query: &ContactQuery) -> Result<StorePage> {
        let url = self.collection_url();
        let params = page_query_params(query);
        debug!("[HttpStore] GET {} {:?}", url, params);
        let response = self.client.get(&url).query(&params).send().await?;
        let response = Self::check(response, None).await?;
        let total = total_count(response.headers());
        let contacts: Vec<Contact> = Self::decode(response).await?;
        let total = total.unwrap_or(contacts.len());
        info!(
            "[HttpStore] fetched page {} ({} of {} contacts)",
            query.page,
            contacts.len(),
            total
        );
        Ok(StorePage { contacts, total })
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        let url = self.contact_url(id);
        debug!("[HttpStore] GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check(response, Some(id)).await?;
        Self::decode(response).await
    }

    async fn create_contact(&self, form: &ContactFormData) -> Result<Contact> {
        let url = self.collection_url();
        debug!("[HttpStore] POST {}", url);
        let response = self.client.post(&url).json(form).send().await?;
        let response = Self::check(response, None).await?;
        let created: Contact = Self::decode(response).await?;
        info!("[HttpStore] created contact {}", created.id);
        Ok(created)
    }

    async fn replace_contact(&self, contact: &Contact) -> Result<Contact> {
        let url = self.contact_url(&contact.id);
        debug!("[HttpStore] PUT {}", url);
        let response = self.client.put(&url).json(contact).send().await?;
        let response = Self::check(response, Some(&contact.id)).await?;
        Self::decode(response).await
    }

    async fn patch_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact> {
        let url = self.contact_url(id);
        debug!("[HttpStore] PATCH {}", url);
        let response = self.client.patch(&url).json(patch).send().await?;
        let response = Self::check(response, Some(id)).await?;
        Self::decode(response).await
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<()> {
        let url = self.contact_url(id);
        debug!("[HttpStore] DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::check(response, Some(id)).await?;
        info!("[HttpStore] deleted contact {}", id);
        Ok(())
    }
}
