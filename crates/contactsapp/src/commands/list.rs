//! Query/filter/paginate pipeline.
//!
//! Client strategy, in order:
//! 1. fetch the whole collection
//! 2. keep contacts whose `name` contains `search`, case-insensitively
//! 3. keep favourites when `favourite_only`
//! 4. `total` is the filtered count
//! 5. slice `[(page-1)*limit, page*limit)`
//!
//! Search never looks at email, phone or address. Pages past the end are
//! empty, not errors.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::QueryStrategy;
use crate::error::Result;
use crate::model::{sort_for_display, Contact, ContactQuery, ContactsResponse};
use crate::store::ContactStore;

/// Applies the name search and favourites filter, preserving order.
pub fn filter_contacts(contacts: Vec<Contact>, search: &str, favourite_only: bool) -> Vec<Contact> {
    let needle = search.to_lowercase();
    contacts
        .into_iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .filter(|c| !favourite_only || c.favourite)
        .collect()
}

/// Slices an already-filtered collection into the requested page.
pub fn paginate(filtered: Vec<Contact>, query: &ContactQuery) -> ContactsResponse {
    let total = filtered.len();
    let data = filtered
        .into_iter()
        .skip(query.offset())
        .take(query.limit)
        .collect();
    ContactsResponse::new(data, total, query.page, query.limit)
}

pub async fn fetch_contacts<S: ContactStore + ?Sized>(
    store: &S,
    query: &ContactQuery,
    strategy: QueryStrategy,
) -> Result<ContactsResponse> {
    match strategy {
        QueryStrategy::Client => {
            let all = store.list_contacts().await?;
            let filtered = filter_contacts(all, &query.search, query.favourite_only);
            Ok(paginate(filtered, query))
        }
        QueryStrategy::Server => {
            let page = store.query_page(query).await?;
            Ok(ContactsResponse::new(
                page.contacts,
                page.total,
                query.page,
                query.limit,
            ))
        }
    }
}

/// Every contact matching the filters, across all pages, in display order.
pub async fn fetch_matching<S: ContactStore + ?Sized>(
    store: &S,
    search: &str,
    favourite_only: bool,
) -> Result<Vec<Contact>> {
    let all = store.list_contacts().await?;
    let mut matching = filter_contacts(all, search, favourite_only);
    sort_for_display(&mut matching);
    Ok(matching)
}

/// Wraps a page into a `CmdResult`, sorting the listed contacts for display.
pub fn into_result(response: ContactsResponse) -> CmdResult {
    let mut listed = response.data.clone();
    sort_for_display(&mut listed);

    let mut result = CmdResult::default().with_listed_contacts(listed);
    if response.total > 0 && response.data.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Page {} is past the last page ({}).",
            response.page, response.total_pages
        )));
    }
    result.page = Some(response);
    result
}

pub async fn run<S: ContactStore + ?Sized>(
    store: &S,
    query: &ContactQuery,
    strategy: QueryStrategy,
) -> Result<CmdResult> {
    let response = fetch_contacts(store, query, strategy).await?;
    Ok(into_result(response))
}
