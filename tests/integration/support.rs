//! Fake catalog server
//!
//! Stores whatever JSON it is sent, keyed by resource path and id, the way the
//! real catalog API answers list, create, update and delete requests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use library_console::{config::ApiConfig, repository::Repository, services::Services};

#[derive(Default)]
struct Store {
    collections: Mutex<BTreeMap<String, BTreeMap<i64, Value>>>,
    next_id: AtomicI64,
    writes: AtomicUsize,
    /// When set, every list request fails with this status
    list_failure: Mutex<Option<StatusCode>>,
    /// When set, every write is rejected with this message
    write_rejection: Mutex<Option<String>>,
    /// Accepted writes answer with an empty body
    silent_writes: AtomicBool,
}

pub struct FakeCatalog {
    pub base_url: String,
    store: Arc<Store>,
}

impl FakeCatalog {
    pub async fn start() -> Self {
        let store = Arc::new(Store {
            next_id: AtomicI64::new(1),
            ..Store::default()
        });

        let app = Router::new()
            .route("/api/v1/:resource", get(list).post(create))
            .route("/api/v1/:resource/:id", put(update).delete(remove))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake catalog stopped");
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            store,
        }
    }

    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }

    pub fn repository(&self) -> Repository {
        Repository::new(self.api()).expect("Failed to build repository")
    }

    pub fn services(&self) -> Services {
        Services::new(self.repository())
    }

    /// Insert a record directly, bypassing the write counter
    pub fn seed(&self, resource: &str, mut record: Value) -> i64 {
        let id = self.store.next_id.fetch_add(1, Ordering::SeqCst);
        record["id"] = json!(id);
        self.store
            .collections
            .lock()
            .unwrap()
            .entry(resource.to_string())
            .or_default()
            .insert(id, record);
        id
    }

    /// Remove a record behind the client's back
    pub fn forget(&self, resource: &str, id: i64) {
        if let Some(collection) = self.store.collections.lock().unwrap().get_mut(resource) {
            collection.remove(&id);
        }
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.store
            .collections
            .lock()
            .unwrap()
            .get(resource)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of create, update and delete requests received
    pub fn writes(&self) -> usize {
        self.store.writes.load(Ordering::SeqCst)
    }

    pub fn fail_lists(&self, status: StatusCode) {
        *self.store.list_failure.lock().unwrap() = Some(status);
    }

    pub fn silence_writes(&self) {
        self.store.silent_writes.store(true, Ordering::SeqCst);
    }

    pub fn reject_writes(&self, message: &str) {
        *self.store.write_rejection.lock().unwrap() = Some(message.to_string());
    }
}

fn message(status: StatusCode, text: String) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn list(State(store): State<Arc<Store>>, Path(resource): Path<String>) -> Response {
    if let Some(status) = *store.list_failure.lock().unwrap() {
        return message(status, "catalog unavailable".to_string());
    }
    let collections = store.collections.lock().unwrap();
    let records: Vec<Value> = collections
        .get(&resource)
        .map(|c| c.values().cloned().collect())
        .unwrap_or_default();
    Json(records).into_response()
}

async fn create(
    State(store): State<Arc<Store>>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    store.writes.fetch_add(1, Ordering::SeqCst);
    if let Some(rejection) = store.write_rejection.lock().unwrap().clone() {
        return message(StatusCode::BAD_REQUEST, rejection);
    }

    let id = store.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    store
        .collections
        .lock()
        .unwrap()
        .entry(resource)
        .or_default()
        .insert(id, body.clone());
    if store.silent_writes.load(Ordering::SeqCst) {
        return StatusCode::CREATED.into_response();
    }
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(
    State(store): State<Arc<Store>>,
    Path((resource, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    store.writes.fetch_add(1, Ordering::SeqCst);
    if let Some(rejection) = store.write_rejection.lock().unwrap().clone() {
        return message(StatusCode::BAD_REQUEST, rejection);
    }

    let mut collections = store.collections.lock().unwrap();
    let Some(record) = collections.get_mut(&resource).and_then(|c| c.get_mut(&id)) else {
        return message(StatusCode::NOT_FOUND, format!("No record {} in {}", id, resource));
    };
    if let (Some(existing), Some(changes)) = (record.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            existing.insert(key.clone(), value.clone());
        }
    }
    if store.silent_writes.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(record.clone()).into_response()
}

async fn remove(State(store): State<Arc<Store>>, Path((resource, id)): Path<(String, i64)>) -> Response {
    store.writes.fetch_add(1, Ordering::SeqCst);
    let removed = store
        .collections
        .lock()
        .unwrap()
        .get_mut(&resource)
        .and_then(|c| c.remove(&id));
    match removed {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => message(StatusCode::NOT_FOUND, format!("No record {} in {}", id, resource)),
    }
}
