//! Staged bulk edits for the visible cards.

use serde::{Deserialize, Serialize};

use crate::assets::BulkChange;
use crate::core::{CardId, SetId, TagId};

/// Whether a staged list adds or removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulkMode {
    Add,
    Remove,
}

/// Tags and sets staged for adding to or removing from the visible cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkEdit {
    pub sets_to_add: Vec<SetId>,
    pub sets_to_remove: Vec<SetId>,
    pub tags_to_add: Vec<TagId>,
    pub tags_to_remove: Vec<TagId>,
    pub tags_to_add_search_text: String,
    pub tags_to_remove_search_text: String,
}

impl BulkEdit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets_to_add.is_empty()
            && self.sets_to_remove.is_empty()
            && self.tags_to_add.is_empty()
            && self.tags_to_remove.is_empty()
    }

    #[must_use]
    pub fn with_sets(&self, mode: BulkMode, sets: Vec<SetId>) -> Self {
        let mut next = self.clone();
        match mode {
            BulkMode::Add => next.sets_to_add = sets,
            BulkMode::Remove => next.sets_to_remove = sets,
        }
        next
    }

    #[must_use]
    pub fn with_tags(&self, mode: BulkMode, tags: Vec<TagId>) -> Self {
        let mut next = self.clone();
        match mode {
            BulkMode::Add => next.tags_to_add = tags,
            BulkMode::Remove => next.tags_to_remove = tags,
        }
        next
    }

    #[must_use]
    pub fn with_tag_search_text(&self, mode: BulkMode, text: String) -> Self {
        let mut next = self.clone();
        match mode {
            BulkMode::Add => next.tags_to_add_search_text = text,
            BulkMode::Remove => next.tags_to_remove_search_text = text,
        }
        next
    }

    /// The store payload applying the staged lists to `card_ids`.
    #[must_use]
    pub fn to_change(&self, card_ids: Vec<CardId>) -> BulkChange {
        BulkChange {
            card_ids,
            sets_to_add: self.sets_to_add.clone(),
            sets_to_remove: self.sets_to_remove.clone(),
            tags_to_add: self.tags_to_add.clone(),
            tags_to_remove: self.tags_to_remove.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_by_mode() {
        let bulk = BulkEdit::default()
            .with_tags(BulkMode::Add, vec![TagId::new("a")])
            .with_tags(BulkMode::Remove, vec![TagId::new("b")])
            .with_sets(BulkMode::Add, vec![SetId::new("1")])
            .with_tag_search_text(BulkMode::Remove, "b".into());

        assert!(!bulk.is_empty());
        assert_eq!(bulk.tags_to_remove_search_text, "b");
        assert!(bulk.tags_to_add_search_text.is_empty());

        let change = bulk.to_change(vec![CardId::new("日")]);
        assert_eq!(change.tags_to_add, vec![TagId::new("a")]);
        assert_eq!(change.tags_to_remove, vec![TagId::new("b")]);
        assert_eq!(change.sets_to_add, vec![SetId::new("1")]);
        assert!(change.sets_to_remove.is_empty());
    }
}
