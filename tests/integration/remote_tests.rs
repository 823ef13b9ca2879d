//! HTTP collection accessor against the fake catalog

use axum::http::StatusCode;
use serde_json::json;

use library_console::{
    error::AppError,
    models::{
        book::BookPayload,
        publisher::PublisherPayload,
        Books, EntityRef, Publishers,
    },
    repository::RemoteCollection,
};

use crate::support::FakeCatalog;

fn acme() -> PublisherPayload {
    PublisherPayload {
        name: "Acme".to_string(),
        establishment_year: 1990,
        address: "1 Main St".to_string(),
    }
}

#[tokio::test]
async fn test_list_empty_collection() {
    let catalog = FakeCatalog::start().await;
    let publishers = catalog.repository().collection::<Publishers>();

    assert!(publishers.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_returns_server_id() {
    let catalog = FakeCatalog::start().await;
    let publishers = catalog.repository().collection::<Publishers>();

    let created = publishers.create(&acme()).await.unwrap().expect("echoed publisher");
    assert!(created.id > 0);
    assert_eq!(created.name, "Acme");
    assert_eq!(created.establishment_year, 1990);

    let listed = publishers.list().await.unwrap();
    assert_eq!(listed, vec![created]);
    assert_eq!(catalog.writes(), 1);
}

#[tokio::test]
async fn test_empty_write_response_is_success() {
    let catalog = FakeCatalog::start().await;
    catalog.silence_writes();
    let publishers = catalog.repository().collection::<Publishers>();

    assert_eq!(publishers.create(&acme()).await.unwrap(), None);
    let listed = publishers.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(publishers.update(listed[0].id, &acme()).await.unwrap(), None);
}

#[tokio::test]
async fn test_null_fields_in_list_still_load() {
    let catalog = FakeCatalog::start().await;
    catalog.seed(
        "books",
        json!({ "name": "Dune", "publicationYear": 1965, "stock": 2, "author": null, "publisher": null, "categories": null }),
    );
    catalog.seed("books", json!({ "name": "Emma", "publicationYear": 1815, "stock": 1, "categories": [{ "id": 1 }] }));
    let books = catalog.repository().collection::<Books>().list().await.unwrap();

    assert_eq!(books.len(), 2);
    assert!(books[0].categories.is_empty());
    assert_eq!(books[1].categories, vec![EntityRef::id(1)]);
}

#[tokio::test]
async fn test_update_missing_entity_is_not_found() {
    let catalog = FakeCatalog::start().await;
    let publishers = catalog.repository().collection::<Publishers>();

    let err = publishers.update(5, &acme()).await.unwrap_err();
    match err {
        AppError::NotFound(message) => assert!(message.contains('5')),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_removes_entity() {
    let catalog = FakeCatalog::start().await;
    let id = catalog.seed("publishers", json!({ "name": "Acme", "establishmentYear": 1990, "address": "x" }));
    let publishers = catalog.repository().collection::<Publishers>();

    publishers.delete(id).await.unwrap();
    assert!(publishers.list().await.unwrap().is_empty());
    assert!(matches!(publishers.delete(id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let catalog = FakeCatalog::start().await;
    catalog.reject_writes("Name already taken");
    let publishers = catalog.repository().collection::<Publishers>();

    let err = publishers.create(&acme()).await.unwrap_err();
    assert!(matches!(
        &err,
        AppError::Rejected { status: 400, message: Some(m) } if m == "Name already taken"
    ));
    assert_eq!(err.notice("Error saving publisher"), "Error saving publisher: Name already taken");
}

#[tokio::test]
async fn test_list_failure_is_rejected() {
    let catalog = FakeCatalog::start().await;
    catalog.fail_lists(StatusCode::SERVICE_UNAVAILABLE);
    let publishers = catalog.repository().collection::<Publishers>();

    assert!(matches!(
        publishers.list().await,
        Err(AppError::Rejected { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let catalog = FakeCatalog::start().await;
    let mut api = catalog.api();
    // Nothing listens on the discard port
    api.base_url = "http://127.0.0.1:9/api/v1".to_string();
    let repository = library_console::repository::Repository::new(api).unwrap();

    assert!(matches!(
        repository.collection::<Publishers>().list().await,
        Err(AppError::Network(_))
    ));
}

#[tokio::test]
async fn test_book_relations_round_trip_as_references() {
    let catalog = FakeCatalog::start().await;
    let books = catalog.repository().collection::<Books>();

    let payload = BookPayload {
        name: "The Hobbit".to_string(),
        publication_year: 1937,
        stock: 3,
        author: EntityRef::id(2),
        publisher: EntityRef::id(1),
        categories: vec![EntityRef::id(4), EntityRef::id(6)],
    };
    let created = books.create(&payload).await.unwrap().expect("echoed book");
    assert_eq!(created.author, Some(EntityRef::id(2)));
    assert_eq!(created.categories.len(), 2);

    let stored = catalog.records("books");
    assert_eq!(stored[0]["author"], json!({ "id": 2 }));
    assert_eq!(stored[0]["publicationYear"], json!(1937));
}
