//! Typed identifiers for blocks and posts, plus the block id allocator.
//!
//! Both id types are thin newtypes over `u64` and serialize as bare
//! integers, matching the persisted JSON shape.

use serde::{Deserialize, Serialize};

/// Identifier of one block within a document.
///
/// Unique within a single document's block list at all times; not globally
/// unique. Blocks reference each other by id only: a diff block names its
/// origin code block by `BlockId`, never by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a post record in the remote store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic block id allocator, owned by one document.
///
/// Replaces random id generation: every call to [`allocate`](Self::allocate)
/// returns an id strictly greater than any id the allocator has handed out
/// or been told about via [`reserve`](Self::reserve). Loading a persisted
/// document must reserve every loaded id before allocating new ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Fresh allocator for an empty document. Ids start at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> BlockId {
        let id = BlockId(self.next);
        self.next += 1;
        id
    }

    /// Make sure `id` is never handed out again.
    pub fn reserve(&mut self, id: BlockId) {
        self.next = self.next.max(id.0 + 1);
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
