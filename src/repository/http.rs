//! HTTP implementation of [`RemoteCollection`]

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use super::RemoteCollection;
use crate::{
    error::{AppError, AppResult},
    models::{EntityId, Resource},
};

/// REST collection at `{base_url}{path}`
pub struct HttpCollection<R> {
    client: Client,
    url: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpCollection<R> {
    pub fn new(client: Client, url: String) -> Self {
        Self {
            client,
            url,
            _resource: PhantomData,
        }
    }

    fn item_url(&self, id: EntityId) -> String {
        format!("{}/{}", self.url, id)
    }

    /// Turn a non-success status into the matching error
    async fn check(response: Response, id: Option<EntityId>) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body);

        if status == StatusCode::NOT_FOUND {
            let what = match id {
                Some(id) => format!("{} {}", R::KIND.singular(), id),
                None => R::KIND.plural().to_string(),
            };
            return Err(AppError::NotFound(message.unwrap_or(what)));
        }

        Err(AppError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Entity echoed by an accepted write, if the body holds one
    async fn written(response: Response) -> Option<R::Entity> {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Could not read {} write response: {}", R::KIND.singular(), e);
                return None;
            }
        };
        echoed::<R::Entity>(&bytes)
    }
}

fn echoed<T: DeserializeOwned>(body: &[u8]) -> Option<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(entity) => Some(entity),
        Err(e) => {
            tracing::warn!("Ignoring write response body: {}", e);
            None
        }
    }
}

/// Extract a human message from an error body: `{"message": ...}` or plain text
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl<R: Resource> RemoteCollection<R> for HttpCollection<R> {
    async fn list(&self) -> AppResult<Vec<R::Entity>> {
        tracing::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let response = Self::check(response, None).await?;
        Self::decode(response).await
    }

    async fn create(&self, payload: &R::CreatePayload) -> AppResult<Option<R::Entity>> {
        tracing::debug!("POST {}", self.url);
        let response = self.client.post(&self.url).json(payload).send().await?;
        let response = Self::check(response, None).await?;
        Ok(Self::written(response).await)
    }

    async fn update(&self, id: EntityId, payload: &R::UpdatePayload) -> AppResult<Option<R::Entity>> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).json(payload).send().await?;
        let response = Self::check(response, Some(id)).await?;
        Ok(Self::written(response).await)
    }

    async fn delete(&self, id: EntityId) -> AppResult<()> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
