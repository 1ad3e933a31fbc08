//! Top-level screen the application is showing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which screen is active.
///
/// The loader panel comes first: showing it is what triggers the initial
/// read from local storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    #[default]
    LoadPanel,
    Quiz,
    TagsPanel,
    SetsPanel,
    SetEditor,
    CardEditor,
    CardManager,
    SetManager,
    TagManager,
}

impl AppMode {
    /// Whether this mode edits a draft through an edit buffer.
    #[must_use]
    pub fn is_editor(self) -> bool {
        matches!(self, AppMode::SetEditor | AppMode::CardEditor)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppMode::LoadPanel => "load_panel",
            AppMode::Quiz => "quiz",
            AppMode::TagsPanel => "tags_panel",
            AppMode::SetsPanel => "sets_panel",
            AppMode::SetEditor => "set_editor",
            AppMode::CardEditor => "card_editor",
            AppMode::CardManager => "card_manager",
            AppMode::SetManager => "set_manager",
            AppMode::TagManager => "tag_manager",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_name() {
        for mode in [AppMode::LoadPanel, AppMode::CardManager, AppMode::TagManager] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }

    #[test]
    fn test_editor_modes() {
        assert!(AppMode::CardEditor.is_editor());
        assert!(AppMode::SetEditor.is_editor());
        assert!(!AppMode::Quiz.is_editor());
    }
}
