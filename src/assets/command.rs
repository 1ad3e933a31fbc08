//! Asset store commands.
//!
//! Each store operation has a variant here so that collaborators can hand
//! the core plain data and get the next snapshot back through a single
//! reducer, `AssetStore::apply`.

use serde::{Deserialize, Serialize};

use super::card::CardFields;
use super::store::AssetStore;
use crate::core::{CardId, SetId, TagId};

/// Staged changes for a group of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkChange {
    pub card_ids: Vec<CardId>,
    pub sets_to_add: Vec<SetId>,
    pub sets_to_remove: Vec<SetId>,
    pub tags_to_add: Vec<TagId>,
    pub tags_to_remove: Vec<TagId>,
}

impl BulkChange {
    /// Whether applying this would leave any store unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.card_ids.is_empty()
            || (self.sets_to_add.is_empty()
                && self.sets_to_remove.is_empty()
                && self.tags_to_add.is_empty()
                && self.tags_to_remove.is_empty())
    }
}

/// Payload for creating a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCard {
    pub id: CardId,
    pub fields: CardFields,
    /// Sets the new card is appended to.
    pub sets: Vec<SetId>,
}

/// A command against the asset store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetCommand {
    CreateSet { name: String, members: Vec<CardId> },
    UpdateSet { id: SetId, name: String, members: Vec<CardId> },
    DeleteSet(SetId),
    CreateCard(NewCard),
    UpdateCard { id: CardId, fields: CardFields },
    RecreateCard { old: CardId, new: CardId, fields: CardFields },
    DeleteCard(CardId),
    CreateTag(String),
    DeleteTag(TagId),
    ToggleRetest(CardId),
    ClearAllRetestFlags,
    ApplyBulkChanges(BulkChange),
}

impl AssetCommand {
    /// Whether this command is session-only (never needs persisting).
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, AssetCommand::ToggleRetest(_) | AssetCommand::ClearAllRetestFlags)
    }
}

impl AssetStore {
    /// Apply a command, returning the next snapshot.
    #[must_use]
    pub fn apply(&self, command: &AssetCommand) -> AssetStore {
        match command {
            AssetCommand::CreateSet { name, members } => self.create_set(name.clone(), members.iter().cloned()),
            AssetCommand::UpdateSet { id, name, members } => {
                self.update_set(id, name.clone(), members.iter().cloned())
            }
            AssetCommand::DeleteSet(id) => self.delete_set(id),
            AssetCommand::CreateCard(new) => self.create_card(new.id.clone(), new.fields.clone(), &new.sets),
            AssetCommand::UpdateCard { id, fields } => self.update_card(id, fields.clone()),
            AssetCommand::RecreateCard { old, new, fields } => self.recreate_card(old, new.clone(), fields.clone()),
            AssetCommand::DeleteCard(id) => self.delete_card(id),
            AssetCommand::CreateTag(name) => self.create_tag(name.clone()),
            AssetCommand::DeleteTag(id) => self.delete_tag(id),
            AssetCommand::ToggleRetest(id) => self.toggle_retest(id),
            AssetCommand::ClearAllRetestFlags => self.clear_all_retest_flags(),
            AssetCommand::ApplyBulkChanges(change) => self.apply_bulk_changes(change),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sequence() {
        let commands = vec![
            AssetCommand::CreateTag("Time".into()),
            AssetCommand::CreateSet {
                name: "Core 1".into(),
                members: Vec::new(),
            },
            AssetCommand::CreateCard(NewCard {
                id: CardId::new("日"),
                fields: CardFields::with_meaning("sun").tag("time"),
                sets: vec![SetId::new("1")],
            }),
            AssetCommand::ToggleRetest(CardId::new("日")),
        ];

        let store = commands
            .iter()
            .fold(AssetStore::new(), |store, command| store.apply(command));

        assert_eq!(store.set_members(&SetId::new("1")), vec![CardId::new("日")]);
        assert!(store.card(&CardId::new("日")).unwrap().retest);
        assert!(store.card(&CardId::new("日")).unwrap().has_tag(&TagId::new("time")));
    }

    #[test]
    fn test_bulk_noop_detection() {
        assert!(BulkChange::default().is_noop());
        let change = BulkChange {
            card_ids: vec![CardId::new("日")],
            ..BulkChange::default()
        };
        assert!(change.is_noop());
        let change = BulkChange {
            card_ids: vec![CardId::new("日")],
            tags_to_add: vec![TagId::new("x")],
            ..BulkChange::default()
        };
        assert!(!change.is_noop());
    }

    #[test]
    fn test_ephemeral_commands() {
        assert!(AssetCommand::ClearAllRetestFlags.is_ephemeral());
        assert!(AssetCommand::ToggleRetest(CardId::new("日")).is_ephemeral());
        assert!(!AssetCommand::DeleteTag(TagId::new("x")).is_ephemeral());
    }
}
