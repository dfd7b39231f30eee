//! The persisted post body and its wire shape.
//!
//! A post row in the store carries a single JSON document:
//!
//! ```json
//! { "editors": [ {"type":"text", ...}, {"type":"code", ...}, ... ] }
//! ```
//!
//! plus a `published` flag and store-managed `createdAt`/`updatedAt`
//! timestamps that the editor core never reads.

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Title used for posts whose first text block is missing or empty.
pub const UNTITLED: &str = "no title";

/// The serialized document attached to a post record.
///
/// Round-trips exactly: parsing the JSON this serializes to yields a
/// field-for-field identical block list in the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBody {
    /// Blocks in rendered order.
    pub editors: Vec<Block>,
}

impl PostBody {
    pub fn new(editors: Vec<Block>) -> Self {
        Self { editors }
    }

    /// Derive the post's listing title: the first line of the first text
    /// block, with leading `#` heading markers stripped. Falls back to
    /// [`UNTITLED`] when no text block exists or it is empty.
    pub fn title(&self) -> String {
        let first_text = self
            .editors
            .iter()
            .find_map(|b| b.as_text())
            .filter(|t| !t.content.is_empty());

        match first_text {
            Some(text) => {
                let line = text.content.lines().next().unwrap_or("");
                let title = line.trim_start_matches('#').trim();
                if title.is_empty() {
                    UNTITLED.to_string()
                } else {
                    title.to_string()
                }
            }
            None => UNTITLED.to_string(),
        }
    }
}

/// What the store returns when fetching a post: the block list plus the
/// publication flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPost {
    pub editors: Vec<Block>,
    pub published: bool,
}
