use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Contact, ContactId};
use crate::store::ContactStore;

pub async fn fetch_contact<S: ContactStore + ?Sized>(store: &S, id: &ContactId) -> Result<Contact> {
    store.get_contact(id).await
}

pub async fn run<S: ContactStore + ?Sized>(store: &S, id: &ContactId) -> Result<CmdResult> {
    let contact = fetch_contact(store, id).await?;
    Ok(CmdResult::default().with_listed_contacts(vec![contact]))
}
