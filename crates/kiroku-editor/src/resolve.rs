//! Diff lineage resolution.
//!
//! A diff block stores the id of the **origin** code block its lineage is
//! rooted in, not the block it directly compares against. The comparison
//! source is derived from the list: the nearest preceding diff of the same
//! lineage, or the origin code block when the diff is the first of its
//! lineage. Deriving instead of storing keeps the wire format stable and
//! means deleting a middle diff re-links its successors to the nearest
//! surviving ancestor with no data migration.
//!
//! All functions here are pure queries over the ordered block slice.

use kiroku_types::{Block, BlockId, CodeBlock, DiffBlock};

use crate::{EditorError, Result};

/// One selectable "file version to diff against": a code block paired with
/// the latest version in its lineage (the last diff rooted in it, or the
/// code block itself when no diff exists yet).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffTarget {
    /// The lineage's root code block.
    pub origin: BlockId,
    /// Filename of the root code block, for selector labels.
    pub filename: String,
    /// Latest version in the lineage.
    pub latest: BlockId,
}

/// Resolve the comparison source for the diff block `diff_id`: the block
/// whose content the diff's "before" pane shows.
///
/// Scans blocks preceding the diff in list order and returns the id of the
/// last diff sharing the same origin, falling back to the origin code block
/// itself. The result is deterministic and always lands in exactly one
/// code-rooted lineage.
///
/// # Errors
///
/// - [`EditorError::BlockNotFound`] if `diff_id` is not in the list.
/// - [`EditorError::UnsupportedOperation`] if `diff_id` names a non-diff
///   block.
/// - [`EditorError::MissingOrigin`] if the origin code block has been
///   deleted, an internal consistency violation that cascade delete is
///   supposed to prevent.
pub fn comparison_source(blocks: &[Block], diff_id: BlockId) -> Result<BlockId> {
    let pos = blocks
        .iter()
        .position(|b| b.id() == diff_id)
        .ok_or(EditorError::BlockNotFound(diff_id))?;
    let diff = blocks[pos]
        .as_diff()
        .ok_or(EditorError::UnsupportedOperation(diff_id))?;

    // The lineage root must still exist; a dangling origin is never valid.
    origin_code(blocks, diff)?;

    let mut last = diff.origin_id;
    for block in &blocks[..pos] {
        if let Some(earlier) = block.as_diff() {
            if earlier.origin_id == diff.origin_id {
                last = earlier.id;
            }
        }
    }
    Ok(last)
}

/// Content of the comparison source for `diff_id`: the "before" pane text.
pub fn comparison_content(blocks: &[Block], diff_id: BlockId) -> Result<&str> {
    let source = comparison_source(blocks, diff_id)?;
    blocks
        .iter()
        .find(|b| b.id() == source)
        .map(|b| b.content())
        .ok_or(EditorError::BlockNotFound(source))
}

/// The code block a diff's lineage is rooted in. Supplies the language for
/// both panes of the diff view.
pub fn origin_code<'a>(blocks: &'a [Block], diff: &DiffBlock) -> Result<&'a CodeBlock> {
    blocks
        .iter()
        .find_map(|b| b.as_code().filter(|c| c.id == diff.origin_id))
        .ok_or(EditorError::MissingOrigin {
            diff: diff.id,
            origin: diff.origin_id,
        })
}

/// All diffable targets in the document, one per code block in list order.
///
/// Each target pairs a code block with the latest version in its lineage,
/// which is where the next diff of that lineage would continue from. Used
/// to populate the "which file version to diff against" selector.
pub fn diffable_targets(blocks: &[Block]) -> Vec<DiffTarget> {
    blocks
        .iter()
        .filter_map(Block::as_code)
        .map(|code| {
            let latest = blocks
                .iter()
                .filter_map(Block::as_diff)
                .filter(|d| d.origin_id == code.id)
                .next_back()
                .map(|d| d.id)
                .unwrap_or(code.id);
            DiffTarget {
                origin: code.id,
                filename: code.filename.clone(),
                latest,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
