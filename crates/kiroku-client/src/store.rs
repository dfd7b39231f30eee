//! The remote post store contract.
//!
//! The store is an external collaborator: one post row per document,
//! carrying the serialized block list and a published flag. The store also
//! manages `createdAt`/`updatedAt` timestamps; the editor core never reads
//! them.

use async_trait::async_trait;
use thiserror::Error;

use kiroku_types::{FetchedPost, PostBody, PostId};

/// Errors emitted by post stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No post with this id.
    #[error("post not found: {0}")]
    NotFound(PostId),

    /// Request transport failed (connection, timeout, ...).
    #[error("store transport error: {0}")]
    Transport(String),

    /// The store answered with a failure status.
    #[error("store API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error body/message.
        message: String,
    },

    /// The store's payload did not parse.
    #[error("store parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

/// Minimal remote store surface the editor core requires.
///
/// Every operation is idempotently re-invocable: a failed call leaves no
/// client-side state behind, and repeating `replace` with the same payload
/// is safe (last write wins).
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Create a new post from `body`, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or server failure.
    async fn create(&self, body: &PostBody) -> Result<PostId, StoreError>;

    /// Fetch a post's block list and published flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the post does not exist.
    async fn fetch(&self, post_id: PostId) -> Result<FetchedPost, StoreError>;

    /// Overwrite the post's body. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or server failure.
    async fn replace(&self, post_id: PostId, body: &PostBody) -> Result<(), StoreError>;

    /// Set the post's published flag.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or server failure.
    async fn set_published(&self, post_id: PostId, published: bool) -> Result<(), StoreError>;
}
