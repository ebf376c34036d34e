//! # Command Layer
//!
//! This module contains the **core business logic** of contacts. Each command
//! lives in its own submodule and implements async functions over a
//! [`ContactStore`](crate::store::ContactStore).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Filter, paginate and sort query results
//! - Enforce create-time uniqueness and form validation
//! - Merge partial updates into full records
//! - Encode exports
//! - Return structured `CmdResult` with affected contacts and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Caching**: the API facade owns the query cache and invalidation
//! - **Terminal I/O**: no stdout, stderr, or formatting
//! - **User interaction**: no prompts or confirmations
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! `InMemoryStore` and its write counter to check both results and side
//! effects (e.g. a rejected create issued no write).
//!
//! ## Command Modules
//!
//! - [`list`]: Query/filter/paginate pipeline
//! - [`get`]: Single-contact fetch
//! - [`create`]: Create with duplicate check
//! - [`update`]: Merge or patch updates
//! - [`delete`]: Remove a contact
//! - [`favourite`]: Favourite/unfavourite toggles
//! - [`export`]: CSV and vCard export

use crate::model::{Contact, ContactsResponse};
use serde::Serialize;
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod export;
pub mod favourite;
pub mod get;
pub mod list;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Contacts created, changed or removed by the operation.
    pub affected_contacts: Vec<Contact>,
    /// Contacts to display, already in display order.
    pub listed_contacts: Vec<Contact>,
    /// Page metadata for list queries.
    pub page: Option<ContactsResponse>,
    /// File written by an export.
    pub exported_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }
}
