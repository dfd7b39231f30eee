//! Block document model for kiroku.
//!
//! A post is an ordered list of heterogeneous blocks: markdown text,
//! source code, and diff-against-earlier-code views. This crate owns the
//! mutable document and everything with invariants attached:
//!
//! - **Ordered block list editing**: insert-after, delete with cascade,
//!   update-by-id. A document is never empty and never holds a diff whose
//!   origin code block is gone.
//! - **Diff lineage resolution**: a diff block stores only the id of the
//!   code block its lineage is rooted in; the actual "before" side is the
//!   nearest preceding diff of the same lineage, found by walking the list.
//! - **Render-mode policy**: pure functions deciding what is interactive
//!   vs read-only per block and per toolbar, given the document mode.
//!
//! Persistence is not here; the document round-trips through
//! [`kiroku_types::PostBody`] and the store lives in kiroku-client. All
//! mutation is synchronous and single-threaded; the document is the source
//! of truth while any network call is in flight.

mod document;
mod error;
pub mod markdown;
pub mod render;
pub mod resolve;

pub use document::Document;
pub use error::EditorError;
pub use resolve::DiffTarget;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, EditorError>;
