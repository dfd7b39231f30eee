//! In-memory post store for tests and offline experiments.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use kiroku_types::{FetchedPost, PostBody, PostId};

use crate::store::{PostStore, StoreError};

#[derive(Clone)]
struct StoredPost {
    body: PostBody,
    published: bool,
}

struct Inner {
    posts: HashMap<PostId, StoredPost>,
    next_id: u64,
}

/// Post store that keeps everything in process memory.
///
/// Behaves like the real store: monotonic ids, last-write-wins replace,
/// `NotFound` for absent posts. Handy assertions (`published`, `body`)
/// let tests inspect state without another fetch round trip.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                posts: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored posts.
    pub fn post_count(&self) -> usize {
        self.inner.lock().posts.len()
    }

    /// The published flag of a post, if it exists.
    pub fn published(&self, post_id: PostId) -> Option<bool> {
        self.inner.lock().posts.get(&post_id).map(|p| p.published)
    }

    /// The stored body of a post, if it exists.
    pub fn body(&self, post_id: PostId) -> Option<PostBody> {
        self.inner.lock().posts.get(&post_id).map(|p| p.body.clone())
    }

    /// Seed a post directly, bypassing `create`. Returns its id.
    pub fn seed(&self, body: PostBody, published: bool) -> PostId {
        let mut inner = self.inner.lock();
        let id = PostId(inner.next_id);
        inner.next_id += 1;
        inner.posts.insert(id, StoredPost { body, published });
        id
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create(&self, body: &PostBody) -> Result<PostId, StoreError> {
        Ok(self.seed(body.clone(), false))
    }

    async fn fetch(&self, post_id: PostId) -> Result<FetchedPost, StoreError> {
        let inner = self.inner.lock();
        let post = inner
            .posts
            .get(&post_id)
            .ok_or(StoreError::NotFound(post_id))?;
        Ok(FetchedPost {
            editors: post.body.editors.clone(),
            published: post.published,
        })
    }

    async fn replace(&self, post_id: PostId, body: &PostBody) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let post = inner
            .posts
            .get_mut(&post_id)
            .ok_or(StoreError::NotFound(post_id))?;
        post.body = body.clone();
        Ok(())
    }

    async fn set_published(&self, post_id: PostId, published: bool) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let post = inner
            .posts
            .get_mut(&post_id)
            .ok_or(StoreError::NotFound(post_id))?;
        post.published = published;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiroku_types::{Block, BlockId};

    fn body() -> PostBody {
        PostBody::new(vec![Block::text(BlockId(1))])
    }

    #[tokio::test]
    async fn test_create_assigns_monotonic_ids() {
        let store = MemoryStore::new();
        let a = store.create(&body()).await.unwrap();
        let b = store.create(&body()).await.unwrap();
        assert!(a < b);
        assert_eq!(store.post_count(), 2);
    }

    #[tokio::test]
    async fn test_created_posts_start_unpublished() {
        let store = MemoryStore::new();
        let id = store.create(&body()).await.unwrap();
        assert_eq!(store.published(id), Some(false));
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_flag() {
        let store = MemoryStore::new();
        let id = store.seed(body(), true);
        let fetched = store.fetch(id).await.unwrap();
        assert!(fetched.published);
        assert_eq!(fetched.editors, body().editors);
    }

    #[tokio::test]
    async fn test_fetch_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let err = store.fetch(PostId(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(PostId(99))));
    }

    #[tokio::test]
    async fn test_replace_is_last_write_wins() {
        let store = MemoryStore::new();
        let id = store.create(&body()).await.unwrap();

        let mut second = body();
        second.editors[0].set_content("# second");
        store.replace(id, &body()).await.unwrap();
        store.replace(id, &second).await.unwrap();

        assert_eq!(store.body(id), Some(second));
    }

    #[tokio::test]
    async fn test_set_published_toggles() {
        let store = MemoryStore::new();
        let id = store.create(&body()).await.unwrap();
        store.set_published(id, true).await.unwrap();
        assert_eq!(store.published(id), Some(true));
        store.set_published(id, false).await.unwrap();
        assert_eq!(store.published(id), Some(false));
    }
}
