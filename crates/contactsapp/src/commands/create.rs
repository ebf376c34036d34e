//! Create with a read-then-write uniqueness check.
//!
//! The check and the insert are separate requests. Two clients creating the
//! same email at once can both pass the check; only a backend constraint
//! closes that gap.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ContactsError, Result};
use crate::model::{Contact, ContactFormData, UniqueField};
use crate::store::ContactStore;
use crate::validation::validate_form;
use tracing::debug;

/// Email matches case-insensitively, phone exactly. Email is checked first.
pub fn find_duplicate(existing: &[Contact], form: &ContactFormData) -> Option<UniqueField> {
    let email = form.email.to_lowercase();
    if existing.iter().any(|c| c.email.to_lowercase() == email) {
        return Some(UniqueField::Email);
    }
    if existing.iter().any(|c| c.phone == form.phone) {
        return Some(UniqueField::Phone);
    }
    None
}

pub async fn run<S: ContactStore + ?Sized>(
    store: &S,
    form: ContactFormData,
    check_duplicates: bool,
) -> Result<CmdResult> {
    validate_form(&form)?;

    if check_duplicates {
        let existing = store.list_contacts().await?;
        if let Some(field) = find_duplicate(&existing, &form) {
            debug!("[create] rejected duplicate {}", field);
            return Err(ContactsError::DuplicateField(field));
        }
    }

    let created = store.create_contact(&form).await?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact created: {}",
        created.name
    )));
    result.affected_contacts.push(created);
    Ok(result)
}
