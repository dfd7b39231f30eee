//! HTTP implementation of the post store.
//!
//! Talks JSON to the post server's REST surface:
//!
//! ```text
//! POST /post                 → { "id": <int> }
//! GET  /post/{id}            → { "editors": [...], "published": <bool> }
//! PUT  /post/{id}            → overwrite body
//! PUT  /post/{id}/publish    → set published = true
//! PUT  /post/{id}/unpublish  → set published = false
//! ```
//!
//! No retry and no cancellation of in-flight requests; a second save racing
//! a first is resolved by the store as last-write-wins. Callers re-invoke
//! failed operations explicitly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use kiroku_types::{FetchedPost, PostBody, PostId};

use crate::config::StoreConfig;
use crate::store::{PostStore, StoreError};

/// Post store backed by the HTTP post server.
pub struct HttpStore {
    client: reqwest::Client,
    config: StoreConfig,
}

/// Response body of `POST /post`.
#[derive(Deserialize)]
struct Created {
    id: PostId,
}

impl HttpStore {
    /// Build a store client from config.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the underlying client cannot
    /// be constructed.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(credential) = &self.config.credential {
            builder = builder.bearer_auth(credential);
        }
        builder
    }

    /// Map a non-success response to a store error. `post_id` turns a 404
    /// into [`StoreError::NotFound`].
    async fn expect_success(
        response: reqwest::Response,
        post_id: Option<PostId>,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = post_id {
                return Err(StoreError::NotFound(id));
            }
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PostStore for HttpStore {
    async fn create(&self, body: &PostBody) -> Result<PostId, StoreError> {
        let response = self.request(Method::POST, "/post").json(body).send().await?;
        let response = Self::expect_success(response, None).await?;
        let created: Created = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        tracing::debug!(post_id = %created.id, "created post");
        Ok(created.id)
    }

    async fn fetch(&self, post_id: PostId) -> Result<FetchedPost, StoreError> {
        let response = self
            .request(Method::GET, &format!("/post/{post_id}"))
            .send()
            .await?;
        let response = Self::expect_success(response, Some(post_id)).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn replace(&self, post_id: PostId, body: &PostBody) -> Result<(), StoreError> {
        let response = self
            .request(Method::PUT, &format!("/post/{post_id}"))
            .json(body)
            .send()
            .await?;
        Self::expect_success(response, Some(post_id)).await?;
        Ok(())
    }

    async fn set_published(&self, post_id: PostId, published: bool) -> Result<(), StoreError> {
        let action = if published { "publish" } else { "unpublish" };
        let response = self
            .request(Method::PUT, &format!("/post/{post_id}/{action}"))
            .send()
            .await?;
        Self::expect_success(response, Some(post_id)).await?;
        tracing::debug!(%post_id, published, "updated publication state");
        Ok(())
    }
}
