//! Panel flows end to end over HTTP

use serde_json::json;
use std::sync::Arc;

use library_console::{
    error::AppError,
    models::{Books, Borrows, Publishers},
    services::{Panel, Submission},
};

use crate::support::FakeCatalog;

async fn publishers(catalog: &FakeCatalog) -> Panel<Publishers> {
    Panel::mount(Arc::new(catalog.repository().collection::<Publishers>())).await
}

#[tokio::test]
async fn test_create_publisher_is_listed_with_id() {
    let catalog = FakeCatalog::start().await;
    let mut panel = publishers(&catalog).await;
    assert!(panel.collection().is_empty());

    panel.open_new().unwrap();
    panel.set_field("name", "Acme").unwrap();
    panel.set_field("establishmentYear", "1990").unwrap();
    panel.set_field("address", "1 Main St").unwrap();

    let saved = match panel.submit().await.unwrap() {
        Submission::Saved(Some(publisher)) => publisher,
        other => panic!("expected Saved, got {:?}", other),
    };
    assert_eq!(catalog.writes(), 1);
    assert!(!panel.editor().is_open());
    assert_eq!(panel.collection(), &[saved.clone()]);
    assert_eq!(panel.collection()[0].name, "Acme");
    assert!(panel.notifier().message().is_none());
}

#[tokio::test]
async fn test_write_with_empty_body_counts_as_saved() {
    let catalog = FakeCatalog::start().await;
    catalog.silence_writes();
    let mut panel = publishers(&catalog).await;

    panel.open_new().unwrap();
    panel.set_field("name", "Acme").unwrap();
    panel.set_field("establishmentYear", "1990").unwrap();
    panel.set_field("address", "1 Main St").unwrap();
    assert_eq!(panel.submit().await.unwrap(), Submission::Saved(None));
    assert!(!panel.editor().is_open());
    assert!(panel.notifier().message().is_none());
    assert_eq!(panel.collection().len(), 1);

    let id = panel.collection()[0].id;
    panel.open_edit(id).unwrap();
    panel.set_field("address", "2 Side St").unwrap();
    assert_eq!(panel.submit().await.unwrap(), Submission::Saved(None));
    assert_eq!(panel.collection()[0].address, "2 Side St");
    assert_eq!(catalog.writes(), 2);
}

#[tokio::test]
async fn test_invalid_publisher_sends_nothing() {
    let catalog = FakeCatalog::start().await;
    let mut panel = publishers(&catalog).await;

    panel.open_new().unwrap();
    panel.set_field("establishmentYear", "0").unwrap();

    let errors = match panel.submit().await.unwrap() {
        Submission::Invalid(errors) => errors,
        other => panic!("expected Invalid, got {:?}", other),
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "establishmentYear", "address"]);
    assert_eq!(catalog.writes(), 0);
    assert!(panel.editor().is_open());
    assert_eq!(panel.editor().errors(), Some(&errors));
}

#[tokio::test]
async fn test_update_of_vanished_entity_keeps_editor_open() {
    let catalog = FakeCatalog::start().await;
    let id = catalog.seed("publishers", json!({ "name": "Acme", "establishmentYear": 1990, "address": "1 Main St" }));
    let mut panel = publishers(&catalog).await;
    let before = panel.collection().to_vec();

    panel.open_edit(id).unwrap();
    panel.set_field("address", "2 Side St").unwrap();
    catalog.forget("publishers", id);

    assert_eq!(panel.submit().await.unwrap(), Submission::Failed);
    let notice = panel.notifier().message().unwrap();
    assert!(notice.starts_with("Error saving publisher"), "{}", notice);
    assert_eq!(panel.collection(), before.as_slice());
    assert_eq!(panel.editor().editing_id(), Some(id));
    assert_eq!(panel.editor().draft().unwrap().address, "2 Side St");
}

#[tokio::test]
async fn test_delete_then_refetch_excludes_id() {
    let catalog = FakeCatalog::start().await;
    for name in ["Acme", "Borealis", "Cormorant"] {
        catalog.seed("publishers", json!({ "name": name, "establishmentYear": 2000, "address": "x" }));
    }
    let mut panel = publishers(&catalog).await;
    assert_eq!(panel.collection().len(), 3);

    assert!(panel.delete(3).await);
    let ids: Vec<i64> = panel.collection().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_cancel_leaves_collection_alone() {
    let catalog = FakeCatalog::start().await;
    let id = catalog.seed("publishers", json!({ "name": "Acme", "establishmentYear": 1990, "address": "1 Main St" }));
    let mut panel = publishers(&catalog).await;
    let before = panel.collection().to_vec();

    panel.open_edit(id).unwrap();
    panel.set_field("name", "Changed").unwrap();
    panel.cancel();

    assert!(!panel.editor().is_open());
    assert_eq!(panel.collection(), before.as_slice());
    assert_eq!(catalog.writes(), 0);
}

#[tokio::test]
async fn test_fetch_failure_sets_notice_and_keeps_empty_list() {
    let catalog = FakeCatalog::start().await;
    catalog.fail_lists(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let mut panel = publishers(&catalog).await;

    assert!(panel.collection().is_empty());
    assert_eq!(
        panel.notifier().message(),
        Some("Error fetching publishers: catalog unavailable")
    );
    panel.dismiss();
    assert!(panel.notifier().message().is_none());
}

#[tokio::test]
async fn test_second_editor_is_refused() {
    let catalog = FakeCatalog::start().await;
    let id = catalog.seed("publishers", json!({ "name": "Acme", "establishmentYear": 1990, "address": "1 Main St" }));
    let mut panel = publishers(&catalog).await;

    panel.open_new().unwrap();
    assert!(matches!(panel.open_edit(id), Err(AppError::EditorBusy)));
    assert!(matches!(panel.open_new(), Err(AppError::EditorBusy)));
}

#[tokio::test]
async fn test_book_with_relations() {
    let catalog = FakeCatalog::start().await;
    let author = catalog.seed("authors", json!({ "name": "Tolkien" }));
    let publisher = catalog.seed("publishers", json!({ "name": "Allen & Unwin", "establishmentYear": 1914, "address": "London" }));
    let fantasy = catalog.seed("categories", json!({ "name": "Fantasy", "description": "Dragons" }));
    let mut panel: Panel<Books> = Panel::mount(Arc::new(catalog.repository().collection::<Books>())).await;

    panel.open_new().unwrap();
    panel.set_field("name", "The Hobbit").unwrap();
    panel.set_field("author", &author.to_string()).unwrap();
    panel.set_field("publisher", &publisher.to_string()).unwrap();
    panel.set_field("categories", &format!("{}, {}", fantasy, fantasy)).unwrap();
    panel.set_field("publicationYear", "1937").unwrap();
    panel.set_field("stock", "2").unwrap();

    assert!(matches!(panel.submit().await.unwrap(), Submission::Saved(_)));
    let stored = &catalog.records("books")[0];
    assert_eq!(stored["author"], json!({ "id": author }));
    assert_eq!(stored["categories"], json!([{ "id": fantasy }]));
    assert_eq!(panel.collection().len(), 1);
}

#[tokio::test]
async fn test_borrow_return_date_only_sent_on_update() {
    let catalog = FakeCatalog::start().await;
    let book = catalog.seed("books", json!({ "name": "Dune", "publicationYear": 1965, "stock": 1 }));
    let mut panel: Panel<Borrows> = Panel::mount(Arc::new(catalog.repository().collection::<Borrows>())).await;

    panel.open_new().unwrap();
    panel.set_field("borrowerName", "Sam").unwrap();
    panel.set_field("borrowerMail", "sam@example.org").unwrap();
    panel.set_field("borrowingDate", "2024-03-01").unwrap();
    panel.set_field("book", &book.to_string()).unwrap();
    let borrow = match panel.submit().await.unwrap() {
        Submission::Saved(Some(borrow)) => borrow,
        other => panic!("expected Saved, got {:?}", other),
    };
    let created = &catalog.records("borrows")[0];
    assert_eq!(created["bookForBorrowingRequest"], json!({ "id": book }));
    assert!(created.get("returnDate").is_none());

    panel.open_edit(borrow.id).unwrap();
    panel.set_field("returnDate", "2024-02-01").unwrap();
    assert!(matches!(panel.submit().await.unwrap(), Submission::Invalid(_)));
    panel.set_field("returnDate", "2024-03-15").unwrap();
    assert!(matches!(panel.submit().await.unwrap(), Submission::Saved(_)));
    assert_eq!(panel.collection()[0].return_date.map(|d| d.to_string()).as_deref(), Some("2024-03-15"));
}
