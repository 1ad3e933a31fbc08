//! Draft card being created or edited.
//!
//! The buffer never touches the store while it is edited. `command` turns a
//! savable buffer into the asset command that commits it.

use std::fmt;

use tracing::{debug, warn};

use super::EditTarget;
use crate::app::AppMode;
use crate::assets::{AssetCommand, AssetStore, CardFields, NewCard};
use crate::core::{CardId, SetId, TagId};

/// Why a card buffer cannot be saved yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardIssue {
    /// No character entered.
    MissingCharacter,
    /// Another card already uses the character.
    IdCollision,
    /// A new card must join at least one set.
    NoSetAssigned,
    /// Nothing differs from the stored card.
    NoChanges,
}

impl fmt::Display for CardIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            CardIssue::MissingCharacter => "Enter a kanji to test",
            CardIssue::IdCollision => "A card for this kanji already exists",
            CardIssue::NoSetAssigned => "Choose a set for this card",
            CardIssue::NoChanges => "No changes made",
        };
        f.write_str(message)
    }
}

/// Edits applied to a card buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardBufferCommand {
    SetCharacter(String),
    SetHint(String),
    SetMeaning(String),
    SetKunyomi(String),
    SetOnyomi(String),
    /// Replace the tag list (sorted and deduplicated on the way in).
    SetTags(Vec<TagId>),
    AddTag(TagId),
    RemoveTag(TagId),
    AddSet(SetId),
    RemoveSet(SetId),
    SetTagSearchText(String),
    /// Create a tag in the store and attach it to the draft.
    SaveNewTag(String),
}

/// Draft copy of a card's editable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardBuffer {
    target: Option<EditTarget<CardId>>,
    pub character: String,
    pub hint: String,
    pub meaning: String,
    pub kunyomi: String,
    pub onyomi: String,
    tags: Vec<TagId>,
    sets: Vec<SetId>,
    pub tag_search_text: String,
    mode_on_exit: Option<AppMode>,
}

impl CardBuffer {
    /// An empty draft for a new card.
    #[must_use]
    pub fn new_card() -> Self {
        Self {
            target: Some(EditTarget::New),
            ..Self::default()
        }
    }

    /// An empty draft for a new card already assigned to a set.
    #[must_use]
    pub fn new_card_in_set(set: SetId) -> Self {
        Self {
            sets: vec![set],
            ..Self::new_card()
        }
    }

    /// A draft seeded from a stored card.
    ///
    /// Returns `None` if the card does not exist.
    #[must_use]
    pub fn for_card(store: &AssetStore, id: &CardId) -> Option<Self> {
        let card = store.card(id)?;
        let mut sets = store.sets_containing(id);
        sets.sort();
        Some(Self {
            target: Some(EditTarget::Existing(id.clone())),
            character: card.character().to_string(),
            hint: card.hint.clone(),
            meaning: card.meaning.clone(),
            kunyomi: card.kunyomi.clone(),
            onyomi: card.onyomi.clone(),
            tags: card.tags.iter().cloned().collect(),
            sets,
            tag_search_text: String::new(),
            mode_on_exit: None,
        })
    }

    /// Record the mode to return to once editing ends.
    #[must_use]
    pub fn with_mode_on_exit(mut self, mode: AppMode) -> Self {
        self.mode_on_exit = Some(mode);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn target(&self) -> Option<&EditTarget<CardId>> {
        self.target.as_ref()
    }

    /// Whether the buffer holds a draft at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self.target, Some(EditTarget::New))
    }

    /// Tags on the draft, ascending.
    #[must_use]
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    /// Sets the draft belongs to, ascending.
    #[must_use]
    pub fn sets(&self) -> &[SetId] {
        &self.sets
    }

    #[must_use]
    pub fn mode_on_exit(&self) -> Option<AppMode> {
        self.mode_on_exit
    }

    /// The editable fields as a store payload.
    #[must_use]
    pub fn fields(&self) -> CardFields {
        CardFields {
            meaning: self.meaning.clone(),
            hint: self.hint.clone(),
            kunyomi: self.kunyomi.clone(),
            onyomi: self.onyomi.clone(),
            tags: self.tags.clone(),
        }
    }

    // === Validity ===

    /// Whether the drafted character would collide with a different card.
    #[must_use]
    pub fn id_collision(&self, store: &AssetStore) -> bool {
        let id = CardId::new(self.character.as_str());
        match &self.target {
            Some(EditTarget::Existing(original)) if original == &id => false,
            _ => store.id_collision(&id),
        }
    }

    /// Whether the draft differs from what is stored.
    ///
    /// A new draft is dirty once any field or tag is filled in. An existing
    /// draft is compared field by field, tags as a sorted joined string.
    #[must_use]
    pub fn has_unsaved_changes(&self, store: &AssetStore) -> bool {
        match &self.target {
            None => false,
            Some(EditTarget::New) => {
                !self.character.is_empty()
                    || !self.hint.is_empty()
                    || !self.meaning.is_empty()
                    || !self.kunyomi.is_empty()
                    || !self.onyomi.is_empty()
                    || !self.tags.is_empty()
            }
            Some(EditTarget::Existing(id)) => {
                let Some(card) = store.card(id) else {
                    return false;
                };
                let stored_tags = card.tags.iter().map(TagId::as_str).collect::<Vec<_>>().join(",");
                let draft_tags = self.tags.iter().map(TagId::as_str).collect::<Vec<_>>().join(",");
                self.character != card.character()
                    || self.hint != card.hint
                    || self.meaning != card.meaning
                    || self.kunyomi != card.kunyomi
                    || self.onyomi != card.onyomi
                    || stored_tags != draft_tags
            }
        }
    }

    /// The first reason the draft cannot be saved, if any.
    #[must_use]
    pub fn issue(&self, store: &AssetStore) -> Option<CardIssue> {
        if self.character.is_empty() {
            return Some(CardIssue::MissingCharacter);
        }
        if self.id_collision(store) {
            return Some(CardIssue::IdCollision);
        }
        if self.is_new() && !self.sets.iter().any(|set| store.set(set).is_some()) {
            return Some(CardIssue::NoSetAssigned);
        }
        if !self.has_unsaved_changes(store) {
            return Some(CardIssue::NoChanges);
        }
        None
    }

    #[must_use]
    pub fn can_save(&self, store: &AssetStore) -> bool {
        self.is_active() && self.issue(store).is_none()
    }

    // === Commit ===

    /// The store command that saves this draft.
    ///
    /// An existing card whose character changed is moved to the new ID.
    /// Returns `None` when the draft is not savable.
    #[must_use]
    pub fn command(&self, store: &AssetStore) -> Option<AssetCommand> {
        if !self.can_save(store) {
            return None;
        }
        let id = CardId::new(self.character.as_str());
        match self.target.as_ref()? {
            EditTarget::New => Some(AssetCommand::CreateCard(NewCard {
                id,
                fields: self.fields(),
                sets: self.sets.clone(),
            })),
            EditTarget::Existing(original) if original == &id => Some(AssetCommand::UpdateCard {
                id,
                fields: self.fields(),
            }),
            EditTarget::Existing(original) => Some(AssetCommand::RecreateCard {
                old: original.clone(),
                new: id,
                fields: self.fields(),
            }),
        }
    }

    /// Save the draft into the store.
    ///
    /// An unsavable draft leaves the store unchanged.
    #[must_use]
    pub fn commit(&self, store: &AssetStore) -> AssetStore {
        match self.command(store) {
            Some(command) => store.apply(&command),
            None => {
                warn!(issue = ?self.issue(store), "save of unsavable card draft ignored");
                store.clone()
            }
        }
    }

    /// Discard the draft.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::default()
    }

    // === Editing ===

    /// Apply an edit, returning the next store and buffer.
    ///
    /// Only `SaveNewTag` touches the store.
    #[must_use]
    pub fn apply(&self, store: &AssetStore, command: &CardBufferCommand) -> (AssetStore, CardBuffer) {
        if !self.is_active() {
            warn!(command = ?command, "edit without a card draft ignored");
            return (store.clone(), self.clone());
        }
        let mut next = self.clone();
        match command {
            CardBufferCommand::SetCharacter(text) => next.character = text.clone(),
            CardBufferCommand::SetHint(text) => next.hint = text.clone(),
            CardBufferCommand::SetMeaning(text) => next.meaning = text.clone(),
            CardBufferCommand::SetKunyomi(text) => next.kunyomi = text.clone(),
            CardBufferCommand::SetOnyomi(text) => next.onyomi = text.clone(),
            CardBufferCommand::SetTags(tags) => {
                next.tags = tags.clone();
                next.tags.sort();
                next.tags.dedup();
            }
            CardBufferCommand::AddTag(tag) => next.insert_tag(tag.clone()),
            CardBufferCommand::RemoveTag(tag) => next.tags.retain(|t| t != tag),
            CardBufferCommand::AddSet(set) => {
                if !self.is_new() {
                    warn!(set = %set, "set change on existing card draft ignored");
                    return (store.clone(), self.clone());
                }
                if !next.sets.contains(set) {
                    next.sets.push(set.clone());
                    next.sets.sort();
                }
            }
            CardBufferCommand::RemoveSet(set) => {
                if !self.is_new() {
                    warn!(set = %set, "set change on existing card draft ignored");
                    return (store.clone(), self.clone());
                }
                next.sets.retain(|s| s != set);
            }
            CardBufferCommand::SetTagSearchText(text) => next.tag_search_text = text.clone(),
            CardBufferCommand::SaveNewTag(name) => {
                let store = store.create_tag(name.as_str());
                let id = TagId::from_name(name);
                if store.tag(&id).is_some() {
                    debug!(tag = %id, "attach new tag to draft");
                    next.insert_tag(id);
                    next.tag_search_text.clear();
                }
                return (store, next);
            }
        }
        (store.clone(), next)
    }

    // === Store follow-up ===

    /// Drop a deleted set from the draft.
    #[must_use]
    pub fn set_deleted(&self, id: &SetId) -> Self {
        let mut next = self.clone();
        next.sets.retain(|set| set != id);
        next
    }

    /// Drop a deleted tag from the draft.
    #[must_use]
    pub fn tag_deleted(&self, id: &TagId) -> Self {
        let mut next = self.clone();
        next.tags.retain(|tag| tag != id);
        next
    }

    fn insert_tag(&mut self, tag: TagId) {
        if let Err(position) = self.tags.binary_search(&tag) {
            self.tags.insert(position, tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AssetStore {
        AssetStore::new()
            .create_tag("nature")
            .create_card(CardId::new("日"), CardFields::with_meaning("sun").tag("nature"), &[])
            .create_set("Core", [CardId::new("日")])
    }

    fn edit(buffer: CardBuffer, store: &AssetStore, commands: &[CardBufferCommand]) -> CardBuffer {
        commands
            .iter()
            .fold(buffer, |buffer, command| buffer.apply(store, command).1)
    }

    #[test]
    fn test_new_card_validity() {
        let store = store();
        let buffer = CardBuffer::new_card();
        assert_eq!(buffer.issue(&store), Some(CardIssue::MissingCharacter));
        assert!(!buffer.has_unsaved_changes(&store));

        let buffer = edit(buffer, &store, &[CardBufferCommand::SetCharacter("日".into())]);
        assert_eq!(buffer.issue(&store), Some(CardIssue::IdCollision));

        let buffer = edit(buffer, &store, &[CardBufferCommand::SetCharacter("月".into())]);
        assert_eq!(buffer.issue(&store), Some(CardIssue::NoSetAssigned));

        let buffer = edit(buffer, &store, &[CardBufferCommand::AddSet(SetId::new("1"))]);
        assert!(buffer.can_save(&store));
    }

    #[test]
    fn test_new_card_commit_joins_sets() {
        let store = store();
        let buffer = edit(
            CardBuffer::new_card_in_set(SetId::new("1")),
            &store,
            &[
                CardBufferCommand::SetCharacter("月".into()),
                CardBufferCommand::SetMeaning("moon".into()),
                CardBufferCommand::AddTag(TagId::new("nature")),
            ],
        );
        let store = buffer.commit(&store);
        assert_eq!(store.card(&CardId::new("月")).unwrap().meaning, "moon");
        assert_eq!(store.set_members(&SetId::new("1")), vec![CardId::new("日"), CardId::new("月")]);
    }

    #[test]
    fn test_existing_card_dirty_check() {
        let store = store();
        let buffer = CardBuffer::for_card(&store, &CardId::new("日")).unwrap();
        assert_eq!(buffer.sets(), &[SetId::new("1")]);
        assert_eq!(buffer.issue(&store), Some(CardIssue::NoChanges));

        let changed = edit(buffer.clone(), &store, &[CardBufferCommand::SetHint("round".into())]);
        assert!(changed.can_save(&store));
        assert!(matches!(changed.command(&store), Some(AssetCommand::UpdateCard { .. })));

        let untagged = edit(buffer, &store, &[CardBufferCommand::RemoveTag(TagId::new("nature"))]);
        assert!(untagged.has_unsaved_changes(&store));
    }

    #[test]
    fn test_changed_character_recreates() {
        let store = store().create_card(CardId::new("月"), CardFields::with_meaning("moon"), &[]);
        let buffer = CardBuffer::for_card(&store, &CardId::new("日")).unwrap();

        let taken = edit(buffer.clone(), &store, &[CardBufferCommand::SetCharacter("月".into())]);
        assert_eq!(taken.issue(&store), Some(CardIssue::IdCollision));
        assert!(taken.commit(&store).ptr_eq(&store));

        let moved = edit(buffer, &store, &[CardBufferCommand::SetCharacter("曜".into())]);
        let store = moved.commit(&store);
        assert!(store.card(&CardId::new("日")).is_none());
        assert_eq!(store.set_members(&SetId::new("1")), vec![CardId::new("曜")]);
    }

    #[test]
    fn test_tags_stay_sorted() {
        let store = store().create_tag("time").create_tag("abc");
        let buffer = edit(
            CardBuffer::new_card(),
            &store,
            &[
                CardBufferCommand::AddTag(TagId::new("time")),
                CardBufferCommand::AddTag(TagId::new("abc")),
                CardBufferCommand::AddTag(TagId::new("time")),
            ],
        );
        assert_eq!(buffer.tags(), &[TagId::new("abc"), TagId::new("time")]);

        let buffer = edit(
            buffer,
            &store,
            &[CardBufferCommand::SetTags(vec![TagId::new("z"), TagId::new("a"), TagId::new("z")])],
        );
        assert_eq!(buffer.tags(), &[TagId::new("a"), TagId::new("z")]);
    }

    #[test]
    fn test_save_new_tag_creates_and_attaches() {
        let store = store();
        let buffer = edit(CardBuffer::new_card(), &store, &[CardBufferCommand::SetTagSearchText("Water".into())]);
        let (store, buffer) = buffer.apply(&store, &CardBufferCommand::SaveNewTag("Water".into()));

        assert_eq!(store.tag(&TagId::new("water")).unwrap().name, "Water");
        assert_eq!(buffer.tags(), &[TagId::new("water")]);
        assert!(buffer.tag_search_text.is_empty());
    }

    #[test]
    fn test_set_changes_ignored_on_existing_card() {
        let store = store().create_set("Other", Vec::new());
        let buffer = CardBuffer::for_card(&store, &CardId::new("日")).unwrap();
        let after = edit(buffer.clone(), &store, &[CardBufferCommand::AddSet(SetId::new("2"))]);
        assert_eq!(after, buffer);
    }

    #[test]
    fn test_idle_buffer_ignores_edits() {
        let store = store();
        let idle = CardBuffer::default();
        let (next_store, next) = idle.apply(&store, &CardBufferCommand::SaveNewTag("x".into()));
        assert_eq!(next, idle);
        assert!(next_store.ptr_eq(&store));
        assert!(!idle.can_save(&store));
    }

    #[test]
    fn test_deleted_set_leaves_draft_without_set() {
        let store = store();
        let buffer = edit(
            CardBuffer::new_card_in_set(SetId::new("1")),
            &store,
            &[CardBufferCommand::SetCharacter("月".into())],
        );
        assert!(buffer.can_save(&store));

        let store = store.delete_set(&SetId::new("1"));
        assert_eq!(buffer.issue(&store), Some(CardIssue::NoSetAssigned));

        let buffer = buffer.set_deleted(&SetId::new("1"));
        assert!(buffer.sets().is_empty());
        assert_eq!(buffer.issue(&store), Some(CardIssue::NoSetAssigned));
    }

    #[test]
    fn test_deleted_tag_leaves_draft() {
        let store = store();
        let buffer = CardBuffer::for_card(&store, &CardId::new("日")).unwrap();
        assert_eq!(buffer.tags(), &[TagId::new("nature")]);
        assert!(buffer.tag_deleted(&TagId::new("nature")).tags().is_empty());
        assert_eq!(buffer.tag_deleted(&TagId::new("other")), buffer);
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(CardIssue::NoSetAssigned.to_string(), "Choose a set for this card");
    }
}
