//! The mutable block document.
//!
//! One `Document` exists per editing session. It owns the ordered block
//! list, the mode, and the id allocator, and exposes command methods for
//! every user action, with no ambient globals and no state bag. All mutations are
//! synchronous; persistence is an explicit, separate step through
//! [`Document::body`] and the store client.
//!
//! # Invariants
//!
//! - Block ids are unique within the list.
//! - The list is never empty: removal that would empty it repopulates a
//!   single default text block.
//! - No diff block's origin references an absent block: deleting a code
//!   block cascades to every diff rooted in it.

use kiroku_types::{Block, BlockId, IdAllocator, Mode, PostBody};

use crate::resolve::{self, DiffTarget};
use crate::{EditorError, Result};

/// An ordered block list with a mode, owned by one editing session.
#[derive(Clone, Debug)]
pub struct Document {
    blocks: Vec<Block>,
    mode: Mode,
    ids: IdAllocator,
}

impl Document {
    /// Fresh unsaved draft: one default text block, [`Mode::New`].
    pub fn new_draft() -> Self {
        let mut ids = IdAllocator::new();
        let blocks = vec![Block::text(ids.allocate())];
        Self {
            blocks,
            mode: Mode::New,
            ids,
        }
    }

    /// Rebuild a document from a persisted body.
    ///
    /// Seeds the id allocator past every loaded id so new blocks never
    /// collide. An empty body (which a correct store never produces) is
    /// repopulated with one default text block rather than violating the
    /// non-empty invariant.
    ///
    /// # Errors
    ///
    /// [`EditorError::DuplicateBlock`] if the body repeats an id.
    pub fn from_body(body: PostBody, mode: Mode) -> Result<Self> {
        let mut ids = IdAllocator::new();
        for (i, block) in body.editors.iter().enumerate() {
            if body.editors[..i].iter().any(|b| b.id() == block.id()) {
                return Err(EditorError::DuplicateBlock(block.id()));
            }
            ids.reserve(block.id());
        }

        let mut blocks = body.editors;
        if blocks.is_empty() {
            tracing::warn!("loaded post body with no blocks, repopulating default text block");
            blocks.push(Block::text(ids.allocate()));
        }

        Ok(Self { blocks, mode, ids })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The document's current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set the mode. Transition rules live in the session layer
    /// (kiroku-client); the document itself only stores the state.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Blocks in rendered order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks. Never zero.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get a block by id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    /// Check if a block with this id exists.
    pub fn contains(&self, id: BlockId) -> bool {
        self.position(id).is_some()
    }

    /// The persistable body: the block list, mode excluded.
    pub fn body(&self) -> PostBody {
        PostBody::new(self.blocks.clone())
    }

    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    // =========================================================================
    // Block list commands
    // =========================================================================

    /// Insert `block` immediately after the block with id `anchor`,
    /// preserving the relative order of everything else.
    ///
    /// # Errors
    ///
    /// [`EditorError::BlockNotFound`] for an unknown anchor,
    /// [`EditorError::DuplicateBlock`] if the new block's id is taken.
    pub fn insert_after(&mut self, anchor: BlockId, block: Block) -> Result<()> {
        if self.contains(block.id()) {
            return Err(EditorError::DuplicateBlock(block.id()));
        }
        let pos = self
            .position(anchor)
            .ok_or(EditorError::BlockNotFound(anchor))?;
        tracing::debug!(id = %block.id(), kind = %block.kind(), %anchor, "inserting block");
        self.ids.reserve(block.id());
        self.blocks.insert(pos + 1, block);
        Ok(())
    }

    /// Add a default text block after `anchor`. Returns the new id.
    pub fn add_text_after(&mut self, anchor: BlockId) -> Result<BlockId> {
        let id = self.ids.allocate();
        self.insert_after(anchor, Block::text(id))?;
        Ok(id)
    }

    /// Add a default code block after `anchor`. Returns the new id.
    pub fn add_code_after(&mut self, anchor: BlockId) -> Result<BlockId> {
        let id = self.ids.allocate();
        self.insert_after(anchor, Block::code(id))?;
        Ok(id)
    }

    /// Add a diff block after `anchor`, continuing the most recent code
    /// lineage: the new diff is rooted in the last code block and seeded
    /// with the content of that lineage's latest version, so a second diff
    /// picks up where the first left off.
    ///
    /// # Errors
    ///
    /// [`EditorError::NoDiffTarget`] when the document has no code block,
    /// plus the [`insert_after`](Self::insert_after) errors.
    pub fn add_diff_after(&mut self, anchor: BlockId) -> Result<BlockId> {
        let target = resolve::diffable_targets(&self.blocks)
            .pop()
            .ok_or(EditorError::NoDiffTarget)?;
        let seed = self
            .block(target.latest)
            .ok_or(EditorError::BlockNotFound(target.latest))?
            .content()
            .to_string();

        let id = self.ids.allocate();
        self.insert_after(anchor, Block::diff(id, target.origin, seed))?;
        Ok(id)
    }

    /// Remove the block with `id`, cascading to every diff block rooted in
    /// it. If removal empties the document, one default text block is
    /// inserted so the list is never empty.
    ///
    /// Deleting a middle diff of a chain leaves its successors' stored
    /// origin untouched; their resolved comparison source re-links to the
    /// nearest surviving ancestor. That re-linking is the documented
    /// contract, pending product confirmation.
    ///
    /// # Errors
    ///
    /// [`EditorError::BlockNotFound`] for an unknown id.
    pub fn remove(&mut self, id: BlockId) -> Result<()> {
        if !self.contains(id) {
            return Err(EditorError::BlockNotFound(id));
        }

        let before = self.blocks.len();
        self.blocks
            .retain(|b| b.id() != id && b.as_diff().is_none_or(|d| d.origin_id != id));
        let cascaded = before - self.blocks.len() - 1;
        if cascaded > 0 {
            tracing::debug!(%id, cascaded, "cascade-deleted dependent diff blocks");
        }

        if self.blocks.is_empty() {
            self.blocks.push(Block::text(self.ids.allocate()));
        }
        Ok(())
    }

    /// Replace the block with the same id as `block`, preserving position.
    ///
    /// # Errors
    ///
    /// [`EditorError::BlockNotFound`] if no block has that id.
    pub fn update(&mut self, block: Block) -> Result<()> {
        let pos = self
            .position(block.id())
            .ok_or(EditorError::BlockNotFound(block.id()))?;
        self.blocks[pos] = block;
        Ok(())
    }

    // =========================================================================
    // Field-level commands
    // =========================================================================

    /// Replace the primary content of any block.
    pub fn set_content(&mut self, id: BlockId, content: impl Into<String>) -> Result<()> {
        let pos = self.position(id).ok_or(EditorError::BlockNotFound(id))?;
        self.blocks[pos].set_content(content);
        Ok(())
    }

    /// Set a code block's filename.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnsupportedOperation`] on a non-code block.
    pub fn set_filename(&mut self, id: BlockId, filename: impl Into<String>) -> Result<()> {
        match self.block_mut(id)? {
            Block::Code(code) => {
                code.filename = filename.into();
                Ok(())
            }
            _ => Err(EditorError::UnsupportedOperation(id)),
        }
    }

    /// Set a code block's language.
    pub fn set_language(&mut self, id: BlockId, language: impl Into<String>) -> Result<()> {
        match self.block_mut(id)? {
            Block::Code(code) => {
                code.language = language.into();
                Ok(())
            }
            _ => Err(EditorError::UnsupportedOperation(id)),
        }
    }

    /// Toggle a diff block between side-by-side and inline rendering.
    pub fn set_split_mode(&mut self, id: BlockId, split_mode: bool) -> Result<()> {
        match self.block_mut(id)? {
            Block::Diff(diff) => {
                diff.split_mode = split_mode;
                Ok(())
            }
            _ => Err(EditorError::UnsupportedOperation(id)),
        }
    }

    /// Re-root a diff block in a different code lineage. The diff's own
    /// content is kept; only the comparison target changes.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnsupportedOperation`] on a non-diff block,
    /// [`EditorError::MissingOrigin`] if `origin` is not an existing code
    /// block.
    pub fn retarget_diff(&mut self, id: BlockId, origin: BlockId) -> Result<()> {
        let origin_is_code = self.block(origin).is_some_and(Block::is_code);
        match self.block_mut(id)? {
            Block::Diff(diff) => {
                if !origin_is_code {
                    return Err(EditorError::MissingOrigin { diff: id, origin });
                }
                diff.origin_id = origin;
                Ok(())
            }
            _ => Err(EditorError::UnsupportedOperation(id)),
        }
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block> {
        let pos = self.position(id).ok_or(EditorError::BlockNotFound(id))?;
        Ok(&mut self.blocks[pos])
    }

    // =========================================================================
    // Diff resolution queries
    // =========================================================================

    /// The block whose content the given diff's "before" pane shows.
    /// See [`resolve::comparison_source`].
    pub fn comparison_source(&self, diff_id: BlockId) -> Result<BlockId> {
        resolve::comparison_source(&self.blocks, diff_id)
    }

    /// The "before" pane text for the given diff.
    pub fn comparison_content(&self, diff_id: BlockId) -> Result<&str> {
        resolve::comparison_content(&self.blocks, diff_id)
    }

    /// All diffable targets, one per code block. See
    /// [`resolve::diffable_targets`].
    pub fn diffable_targets(&self) -> Vec<DiffTarget> {
        resolve::diffable_targets(&self.blocks)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new_draft()
    }
}

// ============================================================================
// Tests
// ============================================================================
