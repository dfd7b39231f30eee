//! Render-mode policy.
//!
//! Pure functions of `(mode, block)` deciding what is interactive vs
//! read-only. Nothing here mutates block content; a mode change only
//! changes what the UI offers.
//!
//! The rules mirror the editing surface: in `Show` everything is read-only
//! (text blocks collapse to their rendered preview, code metadata and the
//! diff target selector disappear); in `New`/`Edit` buffers are writable
//! and the block-management controls are shown.

use kiroku_types::{DiffBlock, Mode};

/// Check if the whole document renders read-only.
pub fn is_read_only(mode: Mode) -> bool {
    mode.is_show()
}

/// Check if per-block management controls (add/delete block) are shown.
pub fn block_controls_visible(mode: Mode) -> bool {
    !mode.is_show()
}

/// How a text block renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextView {
    /// The markdown edit buffer. Hidden in show mode.
    pub editor_visible: bool,
    /// The rendered HTML preview. Always shown.
    pub preview_visible: bool,
}

/// Text block policy for the given mode.
pub fn text_view(mode: Mode) -> TextView {
    TextView {
        editor_visible: !mode.is_show(),
        preview_visible: true,
    }
}

/// How a code block renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeView {
    /// The filename/language inputs above the buffer. Hidden in show mode.
    pub metadata_bar_visible: bool,
    /// Whether the code buffer rejects edits.
    pub read_only: bool,
}

/// Code block policy for the given mode.
pub fn code_view(mode: Mode) -> CodeView {
    CodeView {
        metadata_bar_visible: !mode.is_show(),
        read_only: mode.is_show(),
    }
}

/// How a diff block renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffView {
    /// The "which file version to diff against" selector. Hidden in show
    /// mode.
    pub target_selector_visible: bool,
    /// The writable modified-side buffer. Hidden in show mode, where only
    /// the diff pane remains.
    pub modified_pane_visible: bool,
    /// Side-by-side (true) vs inline (false). The diff pane itself is
    /// always read-only.
    pub split: bool,
}

/// Diff block policy for the given mode and block.
pub fn diff_view(mode: Mode, block: &DiffBlock) -> DiffView {
    DiffView {
        target_selector_visible: !mode.is_show(),
        modified_pane_visible: !mode.is_show(),
        split: block.split_mode,
    }
}

/// One toolbar action the current mode offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    /// First save of an unsaved draft (create on the server).
    Create,
    /// Overwrite the persisted body.
    Save,
    /// Save, then mark the post published.
    Publish,
    /// Mark the post unpublished.
    Unpublish,
}

/// Toolbar policy: which actions the current mode offers, in display order.
pub fn nav_actions(mode: Mode) -> Vec<NavAction> {
    match mode {
        Mode::New => vec![NavAction::Create],
        Mode::Edit {
            published: false, ..
        } => vec![NavAction::Save, NavAction::Publish],
        Mode::Edit {
            published: true, ..
        } => vec![NavAction::Save, NavAction::Unpublish],
        Mode::Show { .. } => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiroku_types::{BlockId, PostId};

    fn edit(published: bool) -> Mode {
        Mode::Edit {
            post_id: PostId(5),
            published,
        }
    }

    fn show() -> Mode {
        Mode::Show { post_id: PostId(5) }
    }

    #[test]
    fn test_only_show_mode_is_read_only() {
        assert!(!is_read_only(Mode::New));
        assert!(!is_read_only(edit(false)));
        assert!(!is_read_only(edit(true)));
        assert!(is_read_only(show()));
    }

    #[test]
    fn test_block_controls_hidden_in_show() {
        assert!(block_controls_visible(Mode::New));
        assert!(block_controls_visible(edit(false)));
        assert!(!block_controls_visible(show()));
    }

    #[test]
    fn test_text_preview_always_visible_editor_only_when_editing() {
        let editing = text_view(Mode::New);
        assert!(editing.editor_visible);
        assert!(editing.preview_visible);

        let showing = text_view(show());
        assert!(!showing.editor_visible);
        assert!(showing.preview_visible);
    }

    #[test]
    fn test_code_metadata_and_editability_follow_mode() {
        let editing = code_view(edit(true));
        assert!(editing.metadata_bar_visible);
        assert!(!editing.read_only);

        let showing = code_view(show());
        assert!(!showing.metadata_bar_visible);
        assert!(showing.read_only);
    }

    #[test]
    fn test_diff_view_follows_mode_and_split_flag() {
        let block = DiffBlock::new(BlockId(3), BlockId(1), "x");

        let editing = diff_view(Mode::New, &block);
        assert!(editing.target_selector_visible);
        assert!(editing.modified_pane_visible);
        assert!(editing.split);

        let showing = diff_view(show(), &block);
        assert!(!showing.target_selector_visible);
        assert!(!showing.modified_pane_visible);

        let mut inline = block;
        inline.split_mode = false;
        assert!(!diff_view(Mode::New, &inline).split);
    }

    #[test]
    fn test_nav_actions_per_mode() {
        assert_eq!(nav_actions(Mode::New), vec![NavAction::Create]);
        assert_eq!(
            nav_actions(edit(false)),
            vec![NavAction::Save, NavAction::Publish]
        );
        assert_eq!(
            nav_actions(edit(true)),
            vec![NavAction::Save, NavAction::Unpublish]
        );
        assert!(nav_actions(show()).is_empty());
    }
}
