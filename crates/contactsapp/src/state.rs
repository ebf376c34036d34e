//! # View State
//!
//! The interactive state a contacts screen keeps between actions: the search
//! box, the favourites toggle, the current page, which contact is open and
//! whether the form is showing. Every transition is a named method so the
//! page-reset rules live in one place.
//!
//! The CLI persists this as `state.json` in the data directory, which lets
//! `contacts next` continue from the previous `contacts list`.

use crate::error::Result;
use crate::model::{Contact, ContactId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The contact removed by the last delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedContact {
    pub contact: Contact,
    pub deleted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub search: String,
    pub favourites_only: bool,
    pub page: usize,
    pub selected_contact: Option<ContactId>,
    /// `Some` while editing, `None` while creating or with the form closed.
    pub editing_contact: Option<ContactId>,
    pub form_open: bool,
    pub detail_open: bool,
    pub dark_mode: bool,
    pub last_deleted: Option<DeletedContact>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            favourites_only: false,
            page: 1,
            selected_contact: None,
            editing_contact: None,
            form_open: false,
            detail_open: false,
            dark_mode: false,
            last_deleted: None,
        }
    }
}

impl ViewState {
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn toggle_favourites_only(&mut self) {
        self.favourites_only = !self.favourites_only;
        self.page = 1;
    }

    /// Sets the favourites filter, resetting the page only when it changes.
    pub fn set_favourites_only(&mut self, favourites_only: bool) {
        if self.favourites_only != favourites_only {
            self.toggle_favourites_only();
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn open_create_form(&mut self) {
        self.editing_contact = None;
        self.form_open = true;
    }

    pub fn open_edit_form(&mut self, id: ContactId) {
        self.editing_contact = Some(id);
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.editing_contact = None;
        self.form_open = false;
    }

    pub fn select_contact(&mut self, id: ContactId) {
        self.selected_contact = Some(id);
        self.detail_open = true;
    }

    pub fn close_detail(&mut self) {
        self.selected_contact = None;
        self.detail_open = false;
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Remembers a removed contact and closes any view still pointing at it.
    pub fn record_deleted(&mut self, contact: Contact) {
        if self.selected_contact.as_ref() == Some(&contact.id) {
            self.close_detail();
        }
        if self.editing_contact.as_ref() == Some(&contact.id) {
            self.close_form();
        }
        self.last_deleted = Some(DeletedContact {
            contact,
            deleted_at: Utc::now(),
        });
    }

    /// New contacts land on page 1 in display order.
    pub fn after_create(&mut self) {
        self.close_form();
        self.page = 1;
    }

    /// Clears search and filter, keeping theme and deletion history.
    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.favourites_only = false;
        self.page = 1;
    }

    /// Loads state from `path`. A missing file yields the default state; an
    /// unreadable one is logged and replaced by the default.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(state) => state,
            Err(e) => {
                warn!("[ViewState] ignoring unreadable {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;

        let tmp_file = path.with_extension("json.tmp");
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, path)?;
        debug!("[ViewState] saved {}", path.display());
        Ok(())
    }
}
