//! Repository layer for catalog API operations

pub mod http;

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    config::ApiConfig,
    error::AppResult,
    models::{EntityId, Resource},
};

pub use http::HttpCollection;

/// Remote access to one resource collection
///
/// Every call is a single request: no retries, no caching. Failures go back to
/// the caller untouched. A write succeeds on any 2xx status; the entity the
/// server echoes back is `None` when the body is empty or not an entity.
#[async_trait]
pub trait RemoteCollection<R: Resource>: Send + Sync {
    async fn list(&self) -> AppResult<Vec<R::Entity>>;

    async fn create(&self, payload: &R::CreatePayload) -> AppResult<Option<R::Entity>>;

    async fn update(&self, id: EntityId, payload: &R::UpdatePayload) -> AppResult<Option<R::Entity>>;

    async fn delete(&self, id: EntityId) -> AppResult<()>;
}

/// Main repository struct holding the shared HTTP client
#[derive(Clone)]
pub struct Repository {
    client: reqwest::Client,
    api: ApiConfig,
}

impl Repository {
    /// Create a new repository for the configured catalog API
    pub fn new(api: ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("library-console/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!("Catalog API at {}", api.base_url);

        Ok(Self { client, api })
    }

    /// Collection accessor for one resource
    pub fn collection<R: Resource>(&self) -> HttpCollection<R> {
        HttpCollection::new(self.client.clone(), self.api.resource_url(R::KIND))
    }
}
