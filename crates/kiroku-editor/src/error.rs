//! Error types for document operations.

use thiserror::Error;

use kiroku_types::BlockId;

/// Errors that can occur while editing a document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    /// Block not found in the document.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// A block with this id already exists in the document.
    #[error("block already exists: {0}")]
    DuplicateBlock(BlockId),

    /// Operation not supported on this block kind.
    ///
    /// For example, retargeting is only supported on diff blocks and
    /// filename updates only on code blocks.
    #[error("operation not supported on block {0}")]
    UnsupportedOperation(BlockId),

    /// A diff block references an origin code block that is not in the
    /// document. Cascade delete exists to make this unreachable; hitting
    /// it means an internal consistency invariant was broken.
    #[error("diff block {diff} references missing origin code block {origin}")]
    MissingOrigin { diff: BlockId, origin: BlockId },

    /// Tried to add a diff block to a document with no code block.
    #[error("no code block available to diff against")]
    NoDiffTarget,
}
