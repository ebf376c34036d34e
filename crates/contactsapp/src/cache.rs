//! # Query Cache
//!
//! Every read is identified by a [`QueryKey`] built from all of its
//! parameters, so results for different pages, searches or filters never mix.
//! Every write names the [`KeyFamily`]s it invalidates.
//!
//! Entries stay fresh for the configured stale time. A fresh hit skips the
//! backend; a stale entry is treated as a miss and replaced by the next fetch.
//!
//! ## Generations
//!
//! Each family carries a generation counter that [`QueryCache::invalidate`]
//! bumps. A fetch takes a [`Ticket`] before it goes to the backend and hands it
//! back with the result. If the family was invalidated while the fetch was in
//! flight, the result is dropped instead of cached: it may predate the
//! mutation that caused the invalidation.

use crate::model::{Contact, ContactId, ContactQuery, ContactsResponse};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// List queries: `["contacts", page, search, favouriteOnly]`.
    Contacts,
    /// Single-contact reads: `["contact", id]`.
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Contacts(ContactQuery),
    Contact(ContactId),
}

impl QueryKey {
    pub fn family(&self) -> KeyFamily {
        match self {
            QueryKey::Contacts(_) => KeyFamily::Contacts,
            QueryKey::Contact(_) => KeyFamily::Contact,
        }
    }
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Page(ContactsResponse),
    Contact(Contact),
}

/// Generation of a key family observed when a fetch started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    family: KeyFamily,
    generation: u64,
}

struct Entry {
    value: CachedValue,
    fetched_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, Entry>,
    generations: HashMap<KeyFamily, u64>,
}

pub struct QueryCache {
    stale_time: Duration,
    state: Mutex<CacheState>,
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    pub async fn ticket(&self, key: &QueryKey) -> Ticket {
        let state = self.state.lock().await;
        let family = key.family();
        Ticket {
            family,
            generation: state.generations.get(&family).copied().unwrap_or(0),
        }
    }

    /// Returns the cached value if it is still fresh.
    pub async fn get(&self, key: &QueryKey) -> Option<CachedValue> {
        let mut state = self.state.lock().await;
        let fresh = match state.entries.get(key) {
            Some(entry) => entry.fetched_at.elapsed() < self.stale_time,
            None => return None,
        };
        if fresh {
            debug!("[QueryCache] hit {:?}", key);
            state.entries.get(key).map(|e| e.value.clone())
        } else {
            debug!("[QueryCache] stale {:?}", key);
            state.entries.remove(key);
            None
        }
    }

    pub async fn get_page(&self, query: &ContactQuery) -> Option<ContactsResponse> {
        match self.get(&QueryKey::Contacts(query.clone())).await {
            Some(CachedValue::Page(page)) => Some(page),
            _ => None,
        }
    }

    pub async fn get_contact(&self, id: &ContactId) -> Option<Contact> {
        match self.get(&QueryKey::Contact(id.clone())).await {
            Some(CachedValue::Contact(contact)) => Some(contact),
            _ => None,
        }
    }

    /// Stores a fetch result. Returns `false` (and stores nothing) when the
    /// key's family was invalidated after `ticket` was taken.
    pub async fn store(&self, key: QueryKey, value: CachedValue, ticket: Ticket) -> bool {
        let mut state = self.state.lock().await;
        let current = state.generations.get(&ticket.family).copied().unwrap_or(0);
        if key.family() != ticket.family || current != ticket.generation {
            debug!("[QueryCache] dropping superseded result for {:?}", key);
            return false;
        }
        state.entries.insert(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
        true
    }

    /// Drops every entry of `family` and bumps its generation.
    pub async fn invalidate(&self, family: KeyFamily) {
        let mut state = self.state.lock().await;
        state.entries.retain(|key, _| key.family() != family);
        *state.generations.entry(family).or_insert(0) += 1;
        debug!("[QueryCache] invalidated {:?}", family);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
