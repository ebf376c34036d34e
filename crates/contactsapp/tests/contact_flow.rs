use contactsapp::api::ContactsApi;
use contactsapp::commands::export::ExportFormat;
use contactsapp::config::{ContactsConfig, QueryStrategy, UpdateStrategy};
use contactsapp::error::ContactsError;
use contactsapp::model::{ContactFormData, ContactPatch};
use contactsapp::state::ViewState;
use contactsapp::store::memory::InMemoryStore;
use contactsapp::store::ContactStore;

async fn setup(config: ContactsConfig) -> ContactsApi<InMemoryStore> {
    let api = ContactsApi::new(InMemoryStore::new(), config);

    for (name, email, phone) in [
        ("Alice Smith", "alice@example.com", "555-000-0001"),
        ("Bob Jones", "bob@example.com", "555-000-0002"),
        ("Alina Park", "alina@example.com", "555-000-0003"),
    ] {
        api.create_contact(ContactFormData::new(name, email, phone, "1 Main St"))
            .await
            .unwrap();
    }

    api
}

fn names(result: &contactsapp::commands::CmdResult) -> Vec<&str> {
    result
        .listed_contacts
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

#[tokio::test]
async fn test_newest_contacts_come_first() {
    let api = setup(ContactsConfig::default()).await;
    let res = api.list_contacts(1, "", false).await.unwrap();
    assert_eq!(names(&res), vec!["Alina Park", "Bob Jones", "Alice Smith"]);
}

#[tokio::test]
async fn test_search_then_favourite_filter() {
    let api = setup(ContactsConfig::default()).await;

    let res = api.list_contacts(1, "ALI", false).await.unwrap();
    assert_eq!(names(&res), vec!["Alina Park", "Alice Smith"]);

    api.favourite_contacts(&["1"]).await.unwrap();
    let res = api.list_contacts(1, "ali", true).await.unwrap();
    assert_eq!(names(&res), vec!["Alice Smith"]);
}

#[tokio::test]
async fn test_duplicate_email_and_phone_are_rejected() {
    let api = setup(ContactsConfig::default()).await;

    let err = api
        .create_contact(ContactFormData::new(
            "Other",
            "Alice@Example.com",
            "555-999-9999",
            "X",
        ))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "A contact with this email already exists");

    let err = api
        .create_contact(ContactFormData::new(
            "Other",
            "other@example.com",
            "555-000-0002",
            "X",
        ))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "A contact with this phone already exists");
}

#[tokio::test]
async fn test_duplicate_check_can_be_disabled() {
    let config = ContactsConfig {
        check_duplicates: false,
        ..ContactsConfig::default()
    };
    let api = setup(config).await;
    api.create_contact(ContactFormData::new(
        "Alice Again",
        "alice@example.com",
        "555-000-0001",
        "X",
    ))
    .await
    .unwrap();
    assert_eq!(api.store().list_contacts().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_edit_keeps_untouched_fields_under_both_strategies() {
    for update_strategy in [UpdateStrategy::Merge, UpdateStrategy::Patch] {
        let config = ContactsConfig {
            update_strategy,
            ..ContactsConfig::default()
        };
        let api = setup(config).await;

        let patch = ContactPatch {
            address: Some("9 Elm St".to_string()),
            ..Default::default()
        };
        api.update_contact("2", &patch).await.unwrap();

        let res = api.get_contact("2").await.unwrap();
        let bob = &res.listed_contacts[0];
        assert_eq!(bob.address, "9 Elm St");
        assert_eq!(bob.name, "Bob Jones");
        assert_eq!(bob.email, "bob@example.com");
        assert_eq!(bob.phone, "555-000-0002");
    }
}

#[tokio::test]
async fn test_server_strategy_pages_like_client_strategy() {
    let config = ContactsConfig {
        page_size: 2,
        query_strategy: QueryStrategy::Server,
        ..ContactsConfig::default()
    };
    let api = setup(config).await;

    let first = api.list_contacts(1, "", false).await.unwrap();
    let page = first.page.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data.len(), 2);

    let second = api.list_contacts(2, "", false).await.unwrap();
    assert_eq!(second.listed_contacts.len(), 1);
}

#[tokio::test]
async fn test_delete_then_view_state_remembers_it() {
    let api = setup(ContactsConfig::default()).await;
    let mut state = ViewState::default();
    state.select_contact("3".into());

    let res = api.delete_contact("3").await.unwrap();
    state.record_deleted(res.affected_contacts[0].clone());

    assert!(!state.detail_open);
    assert_eq!(state.last_deleted.unwrap().contact.name, "Alina Park");
    assert!(matches!(
        api.get_contact("3").await.unwrap_err(),
        ContactsError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_export_follows_filters() {
    let api = setup(ContactsConfig::default()).await;
    let dir = tempfile::tempdir().unwrap();

    let res = api
        .export_contacts("bob", false, ExportFormat::Vcf, dir.path())
        .await
        .unwrap();
    let vcf = std::fs::read_to_string(res.exported_path.unwrap()).unwrap();
    assert_eq!(vcf.matches("BEGIN:VCARD").count(), 1);
    assert!(vcf.contains("FN:Bob Jones"));

    let res = api
        .export_contacts("nobody", false, ExportFormat::Csv, dir.path())
        .await
        .unwrap();
    assert!(res.exported_path.is_none());
    assert!(!dir.path().join("contacts.csv").exists());
}
