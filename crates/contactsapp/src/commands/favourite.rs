use crate::commands::update::apply_patch;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::UpdateStrategy;
use crate::error::Result;
use crate::model::{ContactId, ContactPatch};
use crate::store::ContactStore;

pub async fn favourite<S: ContactStore + ?Sized>(
    store: &S,
    ids: &[ContactId],
    strategy: UpdateStrategy,
) -> Result<CmdResult> {
    set_favourite(store, ids, strategy, true).await
}

pub async fn unfavourite<S: ContactStore + ?Sized>(
    store: &S,
    ids: &[ContactId],
    strategy: UpdateStrategy,
) -> Result<CmdResult> {
    set_favourite(store, ids, strategy, false).await
}

async fn set_favourite<S: ContactStore + ?Sized>(
    store: &S,
    ids: &[ContactId],
    strategy: UpdateStrategy,
    is_favourite: bool,
) -> Result<CmdResult> {
    let patch = ContactPatch::favourite(is_favourite);
    let mut result = CmdResult::default();

    for id in ids {
        let updated = apply_patch(store, id, &patch, strategy).await?;
        let verb = if is_favourite {
            "favourited"
        } else {
            "unfavourited"
        };
        result.add_message(CmdMessage::success(format!(
            "Contact {} ({}): {}",
            verb, updated.id, updated.name
        )));
        result.affected_contacts.push(updated);
    }

    Ok(result)
}
