use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContactId;
use crate::store::ContactStore;

/// Deletes a contact and returns it as the affected contact, so the caller
/// can remember what was removed.
pub async fn run<S: ContactStore + ?Sized>(store: &S, id: &ContactId) -> Result<CmdResult> {
    let contact = store.get_contact(id).await?;
    store.delete_contact(id).await?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact deleted ({}): {}",
        contact.id, contact.name
    )));
    result.affected_contacts.push(contact);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContactsError;
    use crate::store::memory::fixtures::StoreFixture;

    #[tokio::test]
    async fn removes_the_contact() {
        let store = StoreFixture::new().with_contacts(2).build();
        let result = run(&store, &ContactId::from(1)).await.unwrap();
        assert_eq!(result.affected_contacts[0].name, "Contact 1");

        let remaining = store.list_contacts().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn deleting_missing_contact_fails() {
        let store = StoreFixture::new().with_contacts(1).build();
        let err = run(&store, &ContactId::from(7)).await.unwrap_err();
        assert!(matches!(err, ContactsError::NotFound(_)));
        assert_eq!(store.write_count(), 0);
    }
}
