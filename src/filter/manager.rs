//! Card manager state: selection, filter passes and bulk staging.

use im::OrdSet;
use tracing::debug;

use super::bulk::{BulkEdit, BulkMode};
use super::criteria::{FilterMode, FilterPass, TextField};
use super::engine::visible_card_ids;
use crate::assets::{AssetStore, BulkChange};
use crate::core::{CardId, SetId, TagId};

/// A command against the card manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardManagerCommand {
    ToggleSelection(CardId),
    ToggleMatchSelected(FilterMode),
    SetSearchText(FilterMode, String),
    ToggleTextField(FilterMode, TextField),
    SetTagSearchText(FilterMode, String),
    SetTags(FilterMode, Vec<TagId>),
    SetSets(FilterMode, Vec<SetId>),
    SetBulkTagSearchText(BulkMode, String),
    SetBulkTags(BulkMode, Vec<TagId>),
    SetBulkSets(BulkMode, Vec<SetId>),
    Reset,
}

/// Everything the card manager screen holds besides the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardManager {
    selected: OrdSet<CardId>,
    pub include: FilterPass,
    pub exclude: FilterPass,
    pub bulk: BulkEdit,
}

impl CardManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected card IDs, ascending.
    #[must_use]
    pub fn selected(&self) -> &OrdSet<CardId> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, id: &CardId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn pass(&self, mode: FilterMode) -> &FilterPass {
        match mode {
            FilterMode::Include => &self.include,
            FilterMode::Exclude => &self.exclude,
        }
    }

    /// Cards passing the current filters.
    #[must_use]
    pub fn visible_card_ids(&self, store: &AssetStore) -> Vec<CardId> {
        visible_card_ids(store, &self.selected, &self.include, &self.exclude)
    }

    /// The staged bulk edit, targeted at the visible cards.
    #[must_use]
    pub fn bulk_change(&self, store: &AssetStore) -> BulkChange {
        self.bulk.to_change(self.visible_card_ids(store))
    }

    /// Apply the staged edit to the visible cards, then reset all manager
    /// state.
    #[must_use]
    pub fn apply_bulk(&self, store: &AssetStore) -> (AssetStore, CardManager) {
        let change = self.bulk_change(store);
        debug!(cards = change.card_ids.len(), "apply bulk edit to visible cards");
        (store.apply_bulk_changes(&change), CardManager::new())
    }

    /// Drop a deleted card from the selection.
    #[must_use]
    pub fn card_deleted(&self, id: &CardId) -> CardManager {
        if !self.selected.contains(id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.selected.remove(id);
        next
    }

    /// Follow a card that moved to a new ID.
    #[must_use]
    pub fn card_renamed(&self, old: &CardId, new: &CardId) -> CardManager {
        if !self.selected.contains(old) {
            return self.clone();
        }
        let mut next = self.clone();
        next.selected.remove(old);
        next.selected.insert(new.clone());
        next
    }

    /// Drop a deleted set from both filter passes and the bulk lists.
    #[must_use]
    pub fn set_deleted(&self, id: &SetId) -> CardManager {
        let mut next = self.clone();
        for sets in [
            &mut next.include.sets,
            &mut next.exclude.sets,
            &mut next.bulk.sets_to_add,
            &mut next.bulk.sets_to_remove,
        ] {
            sets.retain(|set| set != id);
        }
        next
    }

    /// Drop a deleted tag from both filter passes and the bulk lists.
    #[must_use]
    pub fn tag_deleted(&self, id: &TagId) -> CardManager {
        let mut next = self.clone();
        for tags in [
            &mut next.include.tags,
            &mut next.exclude.tags,
            &mut next.bulk.tags_to_add,
            &mut next.bulk.tags_to_remove,
        ] {
            tags.retain(|tag| tag != id);
        }
        next
    }

    #[must_use]
    pub fn apply(&self, command: &CardManagerCommand) -> CardManager {
        let mut next = self.clone();
        match command {
            CardManagerCommand::ToggleSelection(id) => {
                if next.selected.remove(id).is_none() {
                    next.selected.insert(id.clone());
                }
            }
            CardManagerCommand::ToggleMatchSelected(mode) => {
                let pass = next.pass_mut(*mode);
                pass.match_selected = !pass.match_selected;
            }
            CardManagerCommand::SetSearchText(mode, text) => next.pass_mut(*mode).search_text = text.clone(),
            CardManagerCommand::ToggleTextField(mode, field) => {
                let pass = next.pass_mut(*mode);
                *pass = pass.toggle_field(*field);
            }
            CardManagerCommand::SetTagSearchText(mode, text) => next.pass_mut(*mode).tag_search_text = text.clone(),
            CardManagerCommand::SetTags(mode, tags) => next.pass_mut(*mode).tags = tags.clone(),
            CardManagerCommand::SetSets(mode, sets) => next.pass_mut(*mode).sets = sets.clone(),
            CardManagerCommand::SetBulkTagSearchText(mode, text) => {
                next.bulk = next.bulk.with_tag_search_text(*mode, text.clone());
            }
            CardManagerCommand::SetBulkTags(mode, tags) => next.bulk = next.bulk.with_tags(*mode, tags.clone()),
            CardManagerCommand::SetBulkSets(mode, sets) => next.bulk = next.bulk.with_sets(*mode, sets.clone()),
            CardManagerCommand::Reset => return CardManager::new(),
        }
        next
    }

    fn pass_mut(&mut self, mode: FilterMode) -> &mut FilterPass {
        match mode {
            FilterMode::Include => &mut self.include,
            FilterMode::Exclude => &mut self.exclude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::CardFields;

    fn store() -> AssetStore {
        AssetStore::new()
            .create_tag("t1")
            .create_tag("t2")
            .create_card(CardId::new("日"), CardFields::with_meaning("sun").tag("t1"), &[])
            .create_card(CardId::new("月"), CardFields::with_meaning("moon").tag("t2"), &[])
    }

    #[test]
    fn test_toggle_selection() {
        let manager = CardManager::new()
            .apply(&CardManagerCommand::ToggleSelection(CardId::new("月")))
            .apply(&CardManagerCommand::ToggleSelection(CardId::new("日")));
        let selected: Vec<_> = manager.selected().iter().map(CardId::as_str).collect();
        assert_eq!(selected, vec!["日", "月"]);

        let manager = manager.apply(&CardManagerCommand::ToggleSelection(CardId::new("日")));
        assert!(!manager.is_selected(&CardId::new("日")));
    }

    #[test]
    fn test_filter_then_bulk_then_reset() {
        let store = store();
        let manager = CardManager::new()
            .apply(&CardManagerCommand::SetTags(FilterMode::Include, vec![TagId::new("t2")]))
            .apply(&CardManagerCommand::SetBulkTags(BulkMode::Add, vec![TagId::new("t1")]));
        assert_eq!(manager.visible_card_ids(&store), vec![CardId::new("月")]);

        let (store, manager) = manager.apply_bulk(&store);
        assert_eq!(manager, CardManager::new());
        assert!(store.card(&CardId::new("月")).unwrap().has_tag(&TagId::new("t1")));
    }

    #[test]
    fn test_card_deleted_only_touches_selection() {
        let manager = CardManager::new()
            .apply(&CardManagerCommand::ToggleSelection(CardId::new("日")))
            .apply(&CardManagerCommand::ToggleTextField(FilterMode::Exclude, TextField::Hint));
        let after = manager.card_deleted(&CardId::new("日"));
        assert!(after.selected().is_empty());
        assert!(after.exclude.matches_field(TextField::Hint));
    }

    #[test]
    fn test_deleted_tag_and_set_leave_every_list() {
        let manager = CardManager::new()
            .apply(&CardManagerCommand::SetTags(FilterMode::Include, vec![TagId::new("t1"), TagId::new("t2")]))
            .apply(&CardManagerCommand::SetTags(FilterMode::Exclude, vec![TagId::new("t1")]))
            .apply(&CardManagerCommand::SetBulkTags(BulkMode::Remove, vec![TagId::new("t1")]))
            .apply(&CardManagerCommand::SetSets(FilterMode::Include, vec![SetId::new("1")]))
            .apply(&CardManagerCommand::SetBulkSets(BulkMode::Add, vec![SetId::new("1"), SetId::new("2")]));

        let after = manager.tag_deleted(&TagId::new("t1"));
        assert_eq!(after.include.tags, vec![TagId::new("t2")]);
        assert!(after.exclude.tags.is_empty());
        assert!(after.bulk.tags_to_remove.is_empty());
        assert_eq!(after.include.sets, vec![SetId::new("1")]);

        let after = after.set_deleted(&SetId::new("1"));
        assert!(after.include.sets.is_empty());
        assert_eq!(after.bulk.sets_to_add, vec![SetId::new("2")]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let manager = CardManager::new()
            .apply(&CardManagerCommand::ToggleMatchSelected(FilterMode::Include))
            .apply(&CardManagerCommand::SetSearchText(FilterMode::Exclude, "x".into()))
            .apply(&CardManagerCommand::Reset);
        assert_eq!(manager, CardManager::new());
    }
}
