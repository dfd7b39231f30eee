//! The editing session: document lifecycle against the remote store.
//!
//! One session exists per open editor page. It owns the [`Document`] and
//! drives the mode machine:
//!
//! ```text
//! New ──create()──▶ Edit { published: false } ◀──publish()/unpublish()──▶
//!                   Edit { published: true }
//!
//! load(ForEdit) ──▶ Edit { published }        load(ForShow) ──▶ Show (terminal)
//! ```
//!
//! Block mutations stay local until an explicit `create`/`save`/`publish`;
//! the in-memory document remains the source of truth while a call is in
//! flight, and a store failure leaves both document and mode untouched, so
//! every operation can simply be retried.

use thiserror::Error;

use kiroku_editor::{Document, EditorError};
use kiroku_types::{Mode, PostBody, PostId};

use crate::store::{PostStore, StoreError};

/// Errors from lifecycle operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The operation is not valid in the document's current mode.
    #[error("cannot {action} a document in {mode} mode")]
    InvalidTransition {
        action: &'static str,
        mode: &'static str,
    },

    /// Publish requested but the post is already published.
    #[error("post is already published")]
    AlreadyPublished,

    /// Unpublish requested but the post is not published.
    #[error("post is not published")]
    NotPublished,

    /// The remote store failed; the session state is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The fetched post body was not a valid document.
    #[error(transparent)]
    Document(#[from] EditorError),
}

/// Which view a post is being loaded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadView {
    /// The author's edit page; mode becomes `Edit`.
    ForEdit,
    /// The public page; mode becomes `Show`, read-only and terminal.
    ForShow,
}

/// An editing session: one document, one store.
pub struct EditorSession<S> {
    doc: Document,
    store: S,
}

impl<S: PostStore> EditorSession<S> {
    /// Start a fresh unsaved draft.
    pub fn new_draft(store: S) -> Self {
        Self {
            doc: Document::new_draft(),
            store,
        }
    }

    /// Load an existing post into an edit or show session.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] (wrapped) when the post does not exist;
    /// [`EditorError`] (wrapped) when the fetched body is invalid.
    pub async fn load(store: S, post_id: PostId, view: LoadView) -> Result<Self, SessionError> {
        let fetched = store.fetch(post_id).await?;
        let mode = match view {
            LoadView::ForEdit => Mode::Edit {
                post_id,
                published: fetched.published,
            },
            LoadView::ForShow => Mode::Show { post_id },
        };
        let doc = Document::from_body(PostBody::new(fetched.editors), mode)?;
        tracing::debug!(%post_id, mode = %doc.mode(), "loaded post");
        Ok(Self { doc, store })
    }

    /// The session's document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access for block-level commands. Whether the UI offers
    /// those commands is governed by the render policy, not enforced here.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The document's current mode.
    pub fn mode(&self) -> Mode {
        self.doc.mode()
    }

    /// First save of a draft: create the post on the server and move to
    /// `Edit`. The caller navigates to the edit view with the returned id.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] outside `New`; store errors
    /// leave the session in `New`.
    pub async fn create(&mut self) -> Result<PostId, SessionError> {
        if !self.doc.mode().is_new() {
            return Err(invalid("create", self.doc.mode()));
        }
        let post_id = self.store.create(&self.doc.body()).await?;
        self.doc.set_mode(Mode::Edit {
            post_id,
            published: false,
        });
        tracing::debug!(%post_id, "created draft");
        Ok(post_id)
    }

    /// Overwrite the persisted body. Mode is unchanged; repeating a save
    /// with the same payload is safe.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] outside `Edit`.
    pub async fn save(&mut self) -> Result<(), SessionError> {
        match self.doc.mode() {
            Mode::Edit { post_id, .. } => {
                self.store.replace(post_id, &self.doc.body()).await?;
                Ok(())
            }
            mode => Err(invalid("save", mode)),
        }
    }

    /// Save, then mark the post published. The mode flips to
    /// `published: true` only after both calls succeed.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyPublished`] in `Edit { published: true }`;
    /// [`SessionError::InvalidTransition`] outside `Edit`; store errors
    /// leave the mode unchanged.
    pub async fn publish(&mut self) -> Result<(), SessionError> {
        match self.doc.mode() {
            Mode::Edit {
                post_id,
                published: false,
            } => {
                self.store.replace(post_id, &self.doc.body()).await?;
                self.store.set_published(post_id, true).await?;
                self.doc.set_mode(Mode::Edit {
                    post_id,
                    published: true,
                });
                tracing::debug!(%post_id, "published post");
                Ok(())
            }
            Mode::Edit {
                published: true, ..
            } => Err(SessionError::AlreadyPublished),
            mode => Err(invalid("publish", mode)),
        }
    }

    /// Mark the post unpublished.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotPublished`] in `Edit { published: false }`;
    /// [`SessionError::InvalidTransition`] outside `Edit`; store errors
    /// leave the mode unchanged.
    pub async fn unpublish(&mut self) -> Result<(), SessionError> {
        match self.doc.mode() {
            Mode::Edit {
                post_id,
                published: true,
            } => {
                self.store.set_published(post_id, false).await?;
                self.doc.set_mode(Mode::Edit {
                    post_id,
                    published: false,
                });
                tracing::debug!(%post_id, "unpublished post");
                Ok(())
            }
            Mode::Edit {
                published: false, ..
            } => Err(SessionError::NotPublished),
            mode => Err(invalid("unpublish", mode)),
        }
    }
}

fn invalid(action: &'static str, mode: Mode) -> SessionError {
    SessionError::InvalidTransition {
        action,
        mode: mode.as_str(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use kiroku_types::FetchedPost;

    use crate::memory::MemoryStore;

    /// Store wrapper that records call order and fails on demand.
    struct FlakyStore {
        inner: MemoryStore,
        fail_replace: Mutex<bool>,
        fail_set_published: Mutex<bool>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                fail_replace: Mutex::new(false),
                fail_set_published: Mutex::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().clone()
        }

        fn transport_error() -> StoreError {
            StoreError::Transport("connection reset".to_string())
        }
    }

    #[async_trait]
    impl PostStore for &FlakyStore {
        async fn create(&self, body: &PostBody) -> Result<PostId, StoreError> {
            self.calls.lock().push("create");
            self.inner.create(body).await
        }

        async fn fetch(&self, post_id: PostId) -> Result<FetchedPost, StoreError> {
            self.calls.lock().push("fetch");
            self.inner.fetch(post_id).await
        }

        async fn replace(&self, post_id: PostId, body: &PostBody) -> Result<(), StoreError> {
            self.calls.lock().push("replace");
            if *self.fail_replace.lock() {
                return Err(FlakyStore::transport_error());
            }
            self.inner.replace(post_id, body).await
        }

        async fn set_published(&self, post_id: PostId, published: bool) -> Result<(), StoreError> {
            self.calls.lock().push("set_published");
            if *self.fail_set_published.lock() {
                return Err(FlakyStore::transport_error());
            }
            self.inner.set_published(post_id, published).await
        }
    }

    // ── create ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_moves_new_draft_to_edit() {
        let store = MemoryStore::new();
        let mut session = EditorSession::new_draft(store);
        assert_eq!(session.mode(), Mode::New);

        let post_id = session.create().await.unwrap();
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: false,
            }
        );
    }

    #[tokio::test]
    async fn test_create_persists_the_body_without_mode() {
        let store = MemoryStore::new();
        let mut session = EditorSession::new_draft(store);
        let text_id = session.document().blocks()[0].id();
        session
            .document_mut()
            .set_content(text_id, "# my first post")
            .unwrap();

        let post_id = session.create().await.unwrap();
        let stored = session.store.body(post_id).unwrap();
        assert_eq!(stored.title(), "my first post");
        assert!(!serde_json::to_string(&stored).unwrap().contains("mode"));
    }

    #[tokio::test]
    async fn test_create_twice_is_invalid() {
        let mut session = EditorSession::new_draft(MemoryStore::new());
        session.create().await.unwrap();
        let err = session.create().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                action: "create",
                mode: "edit",
            }
        ));
    }

    // ── save ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_requires_edit_mode() {
        let mut session = EditorSession::new_draft(MemoryStore::new());
        let err = session.save().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                action: "save",
                mode: "new",
            }
        ));
    }

    #[tokio::test]
    async fn test_save_overwrites_and_keeps_mode() {
        let mut session = EditorSession::new_draft(MemoryStore::new());
        let post_id = session.create().await.unwrap();

        let text_id = session.document().blocks()[0].id();
        session
            .document_mut()
            .set_content(text_id, "# edited")
            .unwrap();
        session.save().await.unwrap();
        // Saving again with the same payload is safe.
        session.save().await.unwrap();

        assert_eq!(session.store.body(post_id).unwrap().title(), "edited");
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: false,
            }
        );
    }

    #[tokio::test]
    async fn test_save_failure_keeps_session_usable() {
        let flaky = FlakyStore::new();
        let mut session = EditorSession::new_draft(&flaky);
        let post_id = session.create().await.unwrap();

        *flaky.fail_replace.lock() = true;
        let err = session.save().await.unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::Transport(_))));
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: false,
            }
        );

        // Retry after the failure clears.
        *flaky.fail_replace.lock() = false;
        session.save().await.unwrap();
    }

    // ── publish / unpublish ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_publish_saves_then_publishes() {
        let flaky = FlakyStore::new();
        let mut session = EditorSession::new_draft(&flaky);
        let post_id = session.create().await.unwrap();

        session.publish().await.unwrap();

        assert_eq!(flaky.calls(), vec!["create", "replace", "set_published"]);
        assert_eq!(flaky.inner.published(post_id), Some(true));
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: true,
            }
        );
    }

    #[tokio::test]
    async fn test_publish_twice_is_rejected() {
        let mut session = EditorSession::new_draft(MemoryStore::new());
        session.create().await.unwrap();
        session.publish().await.unwrap();
        assert!(matches!(
            session.publish().await.unwrap_err(),
            SessionError::AlreadyPublished
        ));
    }

    #[tokio::test]
    async fn test_publish_failure_leaves_mode_unchanged() {
        let flaky = FlakyStore::new();
        let mut session = EditorSession::new_draft(&flaky);
        let post_id = session.create().await.unwrap();

        *flaky.fail_set_published.lock() = true;
        let err = session.publish().await.unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::Transport(_))));
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: false,
            }
        );
        assert_eq!(flaky.inner.published(post_id), Some(false));

        // The editor stays usable; a retry succeeds.
        *flaky.fail_set_published.lock() = false;
        session.publish().await.unwrap();
        assert_eq!(flaky.inner.published(post_id), Some(true));
    }

    #[tokio::test]
    async fn test_unpublish_round_trip() {
        let mut session = EditorSession::new_draft(MemoryStore::new());
        let post_id = session.create().await.unwrap();
        session.publish().await.unwrap();

        session.unpublish().await.unwrap();
        assert_eq!(session.store.published(post_id), Some(false));
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: false,
            }
        );
    }

    #[tokio::test]
    async fn test_unpublish_unpublished_post_is_rejected() {
        let mut session = EditorSession::new_draft(MemoryStore::new());
        session.create().await.unwrap();
        assert!(matches!(
            session.unpublish().await.unwrap_err(),
            SessionError::NotPublished
        ));
    }

    // ── load ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_for_edit_restores_blocks_and_flag() {
        let store = MemoryStore::new();
        let mut draft = EditorSession::new_draft(wrap(&store));
        let code_id = {
            let doc = draft.document_mut();
            let text_id = doc.blocks()[0].id();
            doc.add_code_after(text_id).unwrap()
        };
        let post_id = draft.create().await.unwrap();
        store.set_published(post_id, true).await.unwrap();

        let session = EditorSession::load(wrap(&store), post_id, LoadView::ForEdit)
            .await
            .unwrap();
        assert_eq!(
            session.mode(),
            Mode::Edit {
                post_id,
                published: true,
            }
        );
        assert_eq!(session.document().block_count(), 2);
        assert!(session.document().contains(code_id));
    }

    #[tokio::test]
    async fn test_load_for_show_is_terminal_and_read_only() {
        let store = MemoryStore::new();
        let id = store.seed(
            PostBody::new(vec![kiroku_types::Block::text(kiroku_types::BlockId(1))]),
            true,
        );

        let mut session = EditorSession::load(store, id, LoadView::ForShow)
            .await
            .unwrap();
        assert_eq!(session.mode(), Mode::Show { post_id: id });
        assert!(kiroku_editor::render::is_read_only(session.mode()));

        // No lifecycle operation applies in show mode.
        assert!(matches!(
            session.save().await.unwrap_err(),
            SessionError::InvalidTransition { mode: "show", .. }
        ));
        assert!(matches!(
            session.publish().await.unwrap_err(),
            SessionError::InvalidTransition { mode: "show", .. }
        ));
    }

    #[tokio::test]
    async fn test_load_missing_post_surfaces_not_found() {
        let err = EditorSession::load(MemoryStore::new(), PostId(404), LoadView::ForShow)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Store(StoreError::NotFound(PostId(404)))
        ));
    }

    /// `&MemoryStore` does not implement the trait itself; go through a
    /// tiny forwarding adapter so two sessions can share one store.
    fn wrap(store: &MemoryStore) -> SharedStore<'_> {
        SharedStore { store }
    }

    struct SharedStore<'a> {
        store: &'a MemoryStore,
    }

    #[async_trait]
    impl PostStore for SharedStore<'_> {
        async fn create(&self, body: &PostBody) -> Result<PostId, StoreError> {
            self.store.create(body).await
        }

        async fn fetch(&self, post_id: PostId) -> Result<FetchedPost, StoreError> {
            self.store.fetch(post_id).await
        }

        async fn replace(&self, post_id: PostId, body: &PostBody) -> Result<(), StoreError> {
            self.store.replace(post_id, body).await
        }

        async fn set_published(&self, post_id: PostId, published: bool) -> Result<(), StoreError> {
            self.store.set_published(post_id, published).await
        }
    }
}
