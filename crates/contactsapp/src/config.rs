//! # Configuration
//!
//! Configuration is loaded with [`confique`] from layered sources.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Programmatic overrides**: e.g. the CLI `--api-url` flag.
//! 2. **Environment variables**: `CONTACTS_API_URL`, `CONTACTS_PAGE_SIZE`, etc.
//! 3. **Config file**: `contacts.toml` in the config directory.
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! The config directory is the OS-appropriate one (via the `directories` crate)
//! unless `CONTACTS_CONFIG_DIR` points elsewhere. `CONTACTS_DATA_DIR` does the
//! same for the data directory holding `state.json`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_url` | `http://localhost:3001` | Base URL of the contacts backend |
//! | `page_size` | `10` | Contacts per page |
//! | `stale_time_secs` | `300` | How long cached query results stay fresh |
//! | `query_strategy` | `client` | `client` filters locally, `server` delegates to the backend |
//! | `update_strategy` | `merge` | `merge` does read-merge-PUT, `patch` sends a PATCH |
//! | `check_duplicates` | `true` | Reject creates whose email or phone already exist |
//! | `request_timeout_secs` | `10` | HTTP request timeout |

use crate::error::{ContactsError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "contacts.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// How `fetch_contacts` obtains a filtered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStrategy {
    /// Fetch the whole collection, filter and slice locally.
    Client,
    /// Send search, favourite and page parameters to the backend.
    Server,
}

/// How updates are written to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStrategy {
    /// Read the full record, merge the patch, write it back with PUT.
    Merge,
    /// Send only the changed fields with PATCH.
    Patch,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactsConfig {
    #[config(env = "CONTACTS_API_URL", default = "http://localhost:3001")]
    pub api_url: String,

    #[config(env = "CONTACTS_PAGE_SIZE", default = 10)]
    pub page_size: usize,

    #[config(env = "CONTACTS_STALE_TIME_SECS", default = 300)]
    pub stale_time_secs: u64,

    #[config(env = "CONTACTS_QUERY_STRATEGY", default = "client")]
    pub query_strategy: QueryStrategy,

    #[config(env = "CONTACTS_UPDATE_STRATEGY", default = "merge")]
    pub update_strategy: UpdateStrategy,

    #[config(env = "CONTACTS_CHECK_DUPLICATES", default = true)]
    pub check_duplicates: bool,

    #[config(env = "CONTACTS_REQUEST_TIMEOUT_SECS", default = 10)]
    pub request_timeout_secs: u64,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: 10,
            stale_time_secs: 300,
            query_strategy: QueryStrategy::Client,
            update_strategy: UpdateStrategy::Merge,
            check_duplicates: true,
            request_timeout_secs: 10,
        }
    }
}

impl ContactsConfig {
    /// Loads env vars over `contacts.toml` in `config_dir` over defaults.
    /// A missing file is not an error.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(config_dir.join(CONFIG_FILE_NAME))
            .load()
            .map_err(|e| ContactsError::Config(e.to_string()))?;
        config.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.page_size == 0 {
            return Err(ContactsError::Config("page_size must be at least 1".into()));
        }
        Ok(self)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Where configuration and persisted view state live.
#[derive(Debug, Clone)]
pub struct ContactsPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl ContactsPaths {
    pub fn resolve() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "contacts", "contacts");
        let config_dir = std::env::var_os("CONTACTS_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|d| d.config_dir().to_path_buf()));
        let data_dir = std::env::var_os("CONTACTS_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|d| d.data_dir().to_path_buf()));

        match (config_dir, data_dir) {
            (Some(config_dir), Some(data_dir)) => Ok(Self {
                config_dir,
                data_dir,
            }),
            _ => Err(ContactsError::Config(
                "Could not determine config and data directories".into(),
            )),
        }
    }

    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }
}
