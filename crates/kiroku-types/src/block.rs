//! Block types: the closed set of document content variants.
//!
//! A document is an ordered list of blocks. Three kinds exist:
//!
//! - **Text**: markdown source, rendered to HTML for display.
//! - **Code**: one file's worth of source code with filename and language.
//! - **Diff**: an edited version of earlier code. `origin_id` names the
//!   code block the diff's lineage is rooted in; the actual "before" side
//!   is resolved by walking the block list (see kiroku-editor's resolver),
//!   so a chain of diffs forms a linear edit history per file.
//!
//! The serde representation is the persisted wire format and must not
//! drift: internally tagged on `"type"`, with `codeEditorId` and
//! `splitMode` as the diff field names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::BlockId;

/// What a block *is*. Discriminates the [`Block`] union.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BlockKind {
    /// Markdown text.
    Text,
    /// Source code with filename and language.
    Code,
    /// Diff against an earlier version in the same lineage.
    Diff,
}

impl BlockKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Code => "code",
            BlockKind::Diff => "diff",
        }
    }

    /// Check if blocks of this kind can serve as a diff target.
    ///
    /// Code and Diff both qualify: a diff block's current content is itself
    /// a valid "before" side for the next diff in the lineage.
    pub fn is_diffable(&self) -> bool {
        matches!(self, BlockKind::Code | BlockKind::Diff)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Markdown text block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: BlockId,
    /// Markdown source.
    pub content: String,
}

impl TextBlock {
    /// New text block with the default starter content.
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            content: "# title".to_string(),
        }
    }
}

/// Source code block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub id: BlockId,
    pub filename: String,
    /// Editor language id (e.g. "javascript", "rust").
    pub language: String,
    pub content: String,
}

impl CodeBlock {
    /// New code block with the default filename, language, and content.
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            filename: "index.js".to_string(),
            language: "javascript".to_string(),
            content: "// some code".to_string(),
        }
    }
}

/// Diff block: an edited version of earlier code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffBlock {
    pub id: BlockId,
    /// The modified-side text of this diff.
    pub content: String,
    /// The origin code block this diff's lineage is rooted in. Not
    /// necessarily the immediate comparison target; that is resolved by
    /// scanning for earlier diffs in the same lineage.
    #[serde(rename = "codeEditorId")]
    pub origin_id: BlockId,
    /// Side-by-side (true) vs inline (false) diff rendering.
    #[serde(rename = "splitMode", default = "default_split_mode")]
    pub split_mode: bool,
}

/// Payloads written before `splitMode` existed parse as side-by-side.
fn default_split_mode() -> bool {
    true
}

impl DiffBlock {
    /// New diff block rooted in `origin_id`, seeded with `content` (the
    /// text of the lineage version it will be edited from).
    pub fn new(id: BlockId, origin_id: BlockId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            origin_id,
            split_mode: default_split_mode(),
        }
    }
}

/// One unit of document content.
///
/// Serializes to the persisted wire shape:
///
/// ```json
/// {"type":"text","id":1,"content":"# title"}
/// {"type":"code","id":2,"filename":"index.js","language":"javascript","content":"// some code"}
/// {"type":"diff","id":3,"content":"...","codeEditorId":2,"splitMode":true}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text(TextBlock),
    Code(CodeBlock),
    Diff(DiffBlock),
}

impl Block {
    /// Default-populated text block.
    pub fn text(id: BlockId) -> Self {
        Block::Text(TextBlock::new(id))
    }

    /// Default-populated code block.
    pub fn code(id: BlockId) -> Self {
        Block::Code(CodeBlock::new(id))
    }

    /// Diff block rooted in `origin_id`, seeded with `content`.
    pub fn diff(id: BlockId, origin_id: BlockId, content: impl Into<String>) -> Self {
        Block::Diff(DiffBlock::new(id, origin_id, content))
    }

    /// This block's id.
    pub fn id(&self) -> BlockId {
        match self {
            Block::Text(b) => b.id,
            Block::Code(b) => b.id,
            Block::Diff(b) => b.id,
        }
    }

    /// This block's kind.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text(_) => BlockKind::Text,
            Block::Code(_) => BlockKind::Code,
            Block::Diff(_) => BlockKind::Diff,
        }
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text(_))
    }

    /// Check if this is a code block.
    pub fn is_code(&self) -> bool {
        matches!(self, Block::Code(_))
    }

    /// Check if this is a diff block.
    pub fn is_diff(&self) -> bool {
        matches!(self, Block::Diff(_))
    }

    /// Primary text content. Every variant carries one.
    pub fn content(&self) -> &str {
        match self {
            Block::Text(b) => &b.content,
            Block::Code(b) => &b.content,
            Block::Diff(b) => &b.content,
        }
    }

    /// Replace the primary text content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        match self {
            Block::Text(b) => b.content = content,
            Block::Code(b) => b.content = content,
            Block::Diff(b) => b.content = content,
        }
    }

    /// Borrow as a code block, if it is one.
    pub fn as_code(&self) -> Option<&CodeBlock> {
        match self {
            Block::Code(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow as a diff block, if it is one.
    pub fn as_diff(&self) -> Option<&DiffBlock> {
        match self {
            Block::Diff(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow as a text block, if it is one.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(b) => Some(b),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
