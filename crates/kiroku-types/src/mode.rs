//! Document mode: the editing session's state machine states.
//!
//! A document starts in `New`, reaches `Edit` only through a successful
//! create round trip against the store, and reaches `Show` only by loading
//! an existing post for public viewing. `Show` is terminal.
//!
//! Mode is deliberately **not** serializable: the persisted payload is the
//! block list alone, and the mode is reconstructed by the load path.

use crate::ids::PostId;

/// The document's current editing/visibility state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Unsaved draft, no server id yet.
    New,
    /// Editing a persisted post.
    Edit { post_id: PostId, published: bool },
    /// Read-only public view. Terminal.
    Show { post_id: PostId },
}

impl Mode {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::New => "new",
            Mode::Edit { .. } => "edit",
            Mode::Show { .. } => "show",
        }
    }

    /// Check if this is an unsaved draft.
    pub fn is_new(&self) -> bool {
        matches!(self, Mode::New)
    }

    /// Check if this is the edit state.
    pub fn is_edit(&self) -> bool {
        matches!(self, Mode::Edit { .. })
    }

    /// Check if this is the read-only show state.
    pub fn is_show(&self) -> bool {
        matches!(self, Mode::Show { .. })
    }

    /// The server-side post id, if the document has one.
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            Mode::New => None,
            Mode::Edit { post_id, .. } | Mode::Show { post_id } => Some(*post_id),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
