//! Updates under either write contract.
//!
//! `Merge` exists because a full-replace `PUT` drops every field it is not
//! given: the current record is read, the patch laid over it, and the whole
//! result written back. `Patch` sends the changed fields alone and leaves
//! preservation to the backend.
//!
//! Both validate only the fields the patch carries. A stored record that no
//! longer meets the form rules can still be starred or have one field fixed.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::UpdateStrategy;
use crate::error::Result;
use crate::model::{Contact, ContactId, ContactPatch};
use crate::store::ContactStore;
use crate::validation::validate_patch;

pub async fn apply_patch<S: ContactStore + ?Sized>(
    store: &S,
    id: &ContactId,
    patch: &ContactPatch,
    strategy: UpdateStrategy,
) -> Result<Contact> {
    validate_patch(patch)?;
    match strategy {
        UpdateStrategy::Merge => {
            let existing = store.get_contact(id).await?;
            store.replace_contact(&existing.merged(patch)).await
        }
        UpdateStrategy::Patch => store.patch_contact(id, patch).await,
    }
}

pub async fn run<S: ContactStore + ?Sized>(
    store: &S,
    id: &ContactId,
    patch: &ContactPatch,
    strategy: UpdateStrategy,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let updated = apply_patch(store, id, patch, strategy).await?;
    result.add_message(CmdMessage::success(format!(
        "Contact updated: {}",
        updated.name
    )));
    result.affected_contacts.push(updated);
    Ok(result)
}
