//! Shared identifier, block, and wire-format types for kiroku.
//!
//! This crate is the foundation: block identifiers, the block tagged union,
//! the document mode, and the persisted post body. It has **no internal
//! kiroku dependencies** — a pure leaf crate that other crates build on.
//!
//! # Entity Overview
//!
//! ```text
//! Post (PostId) ← one row in the remote store
//!     └── body: PostBody { editors: [Block, ...] }   # the persisted JSON
//!
//! Block (BlockId) ← one unit of document content
//!     ├── Text  { content }                          # markdown source
//!     ├── Code  { filename, language, content }
//!     └── Diff  { content, origin_id, split_mode }   # origin_id roots a lineage
//!
//! Mode ← the editing session's state, never persisted
//!     New | Edit { post_id, published } | Show { post_id }
//! ```
//!
//! Block ids are allocated by [`IdAllocator`], a document-local monotonic
//! counter. Ids are unique within one document's block list, not globally.

pub mod block;
pub mod ids;
pub mod mode;
pub mod post;

// Re-export primary types at crate root for convenience.
pub use block::{Block, BlockKind, CodeBlock, DiffBlock, TextBlock};
pub use ids::{BlockId, IdAllocator, PostId};
pub use mode::Mode;
pub use post::{FetchedPost, PostBody, UNTITLED};
