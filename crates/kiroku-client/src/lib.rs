//! Remote post store client and editing session lifecycle for kiroku.
//!
//! The document model (kiroku-editor) is purely local; this crate adds the
//! two pieces that talk to the outside world:
//!
//! - [`PostStore`]: the minimal remote store contract (create, fetch,
//!   replace, set_published), with an HTTP implementation ([`HttpStore`])
//!   and an in-memory one for tests ([`MemoryStore`]).
//! - [`EditorSession`]: the document lifecycle state machine. It owns the
//!   document, keeps every block mutation local, and performs network
//!   effects only on the explicit create/save/publish/unpublish calls.
//!
//! Failures never poison the session: on any store error the document and
//! its mode are unchanged and the same operation can be re-invoked.

pub mod config;
pub mod http;
pub mod memory;
pub mod session;
pub mod store;

pub use config::StoreConfig;
pub use http::HttpStore;
pub use memory::MemoryStore;
pub use session::{EditorSession, LoadView, SessionError};
pub use store::{PostStore, StoreError};
