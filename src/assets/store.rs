//! The normalized asset store.
//!
//! `AssetStore` is the single source of truth for cards, sets and tags. It
//! is an immutable value: every operation takes `&self` and returns a new
//! store. The `im` collections make that cheap, since untouched maps and
//! entries are shared between the old and new snapshot.
//!
//! ## Referential integrity
//!
//! - Every set member is an existing card.
//! - Every card tag is an existing tag.
//! - Every entry of the set order is an existing set, and vice versa.
//!
//! Deletes cascade synchronously to keep these true.
//!
//! ## Preconditions
//!
//! Commands naming an ID that does not exist (or a card ID that already
//! exists, for creation) are ignored: the operation returns an unchanged
//! snapshot and logs a warning. Callers are expected to run the edit buffer
//! validity checks first.

use im::{OrdMap, Vector};
use tracing::{debug, warn};

use super::card::{Card, CardFields};
use super::command::BulkChange;
use super::set::{CardSet, Tag};
use crate::core::{CardId, SetId, TagId};

/// Normalized collections of cards, sets and tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetStore {
    cards: OrdMap<CardId, Card>,
    sets: OrdMap<SetId, CardSet>,
    tags: OrdMap<TagId, Tag>,
    /// Display/iteration order of sets.
    set_order: Vector<SetId>,
}

impl AssetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a store from already validated parts.
    pub(crate) fn from_parts(
        cards: OrdMap<CardId, Card>,
        sets: OrdMap<SetId, CardSet>,
        tags: OrdMap<TagId, Tag>,
        set_order: Vector<SetId>,
    ) -> Self {
        Self {
            cards,
            sets,
            tags,
            set_order,
        }
    }

    // === Lookup ===

    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn set(&self, id: &SetId) -> Option<&CardSet> {
        self.sets.get(id)
    }

    #[must_use]
    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.get(id)
    }

    /// Iterate over cards in ascending ID order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Iterate over card IDs in ascending order.
    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.keys()
    }

    /// Iterate over sets in display order.
    pub fn sets(&self) -> impl Iterator<Item = &CardSet> {
        self.set_order.iter().filter_map(move |id| self.sets.get(id))
    }

    /// The ordered sequence of set IDs.
    #[must_use]
    pub fn set_order(&self) -> &Vector<SetId> {
        &self.set_order
    }

    /// Iterate over tags in ascending ID order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.sets.is_empty() && self.tags.is_empty()
    }

    /// Check whether a card with this ID already exists.
    #[must_use]
    pub fn id_collision(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// The ID `create_set` will allocate next: one past the largest numeric ID.
    #[must_use]
    pub fn next_set_id(&self) -> SetId {
        let max = self.sets.keys().filter_map(SetId::number).max().unwrap_or(0);
        SetId::from_number(max + 1)
    }

    /// IDs of all sets containing a card, in display order.
    #[must_use]
    pub fn sets_containing(&self, card: &CardId) -> Vec<SetId> {
        self.sets()
            .filter(|set| set.contains(card))
            .map(|set| set.id.clone())
            .collect()
    }

    /// Member list of a set (empty if the set does not exist).
    #[must_use]
    pub fn set_members(&self, id: &SetId) -> Vec<CardId> {
        self.sets
            .get(id)
            .map(|set| set.members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// IDs of all cards carrying a tag, ascending.
    #[must_use]
    pub fn cards_with_tag(&self, tag: &TagId) -> Vec<CardId> {
        self.cards()
            .filter(|card| card.has_tag(tag))
            .map(|card| card.id.clone())
            .collect()
    }

    /// IDs of all cards flagged for retest, ascending.
    #[must_use]
    pub fn retest_card_ids(&self) -> Vec<CardId> {
        self.cards()
            .filter(|card| card.retest)
            .map(|card| card.id.clone())
            .collect()
    }

    #[must_use]
    pub fn has_retest_cards(&self) -> bool {
        self.cards().any(|card| card.retest)
    }

    /// Tags whose ID contains the (lower-cased) search text, minus those
    /// already chosen.
    #[must_use]
    pub fn tag_suggestions(&self, search_text: &str, chosen: &[TagId]) -> Vec<&Tag> {
        let needle = search_text.to_lowercase();
        self.tags()
            .filter(|tag| tag.id.as_str().contains(&needle))
            .filter(|tag| !chosen.contains(&tag.id))
            .collect()
    }

    /// Whether the search text names an existing tag exactly.
    #[must_use]
    pub fn tag_exists_for(&self, search_text: &str) -> bool {
        self.tags.contains_key(&TagId::from_name(search_text))
    }

    /// Check whether two snapshots share their entity maps (and have the same
    /// set order).
    ///
    /// Operations that change nothing return a store for which this holds.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.cards.ptr_eq(&other.cards)
            && self.sets.ptr_eq(&other.sets)
            && self.tags.ptr_eq(&other.tags)
            && self.set_order == other.set_order
    }

    // === Sets ===

    /// Create a set with the next free numeric ID, appended to the set order.
    #[must_use]
    pub fn create_set(&self, name: impl Into<String>, members: impl IntoIterator<Item = CardId>) -> Self {
        let id = self.next_set_id();
        let set = CardSet::new(id.clone(), name, self.known_cards(members));
        debug!(set = %id, members = set.len(), "create set");

        let mut next = self.clone();
        next.sets.insert(id.clone(), set);
        next.set_order.push_back(id);
        next
    }

    /// Replace a set's name and member list.
    #[must_use]
    pub fn update_set(&self, id: &SetId, name: impl Into<String>, members: impl IntoIterator<Item = CardId>) -> Self {
        if !self.sets.contains_key(id) {
            warn!(set = %id, "update of unknown set ignored");
            return self.clone();
        }
        let set = CardSet::new(id.clone(), name, self.known_cards(members));
        debug!(set = %id, members = set.len(), "update set");

        let mut next = self.clone();
        next.sets.insert(id.clone(), set);
        next
    }

    /// Remove a set and drop it from the set order.
    #[must_use]
    pub fn delete_set(&self, id: &SetId) -> Self {
        if !self.sets.contains_key(id) {
            warn!(set = %id, "delete of unknown set ignored");
            return self.clone();
        }
        debug!(set = %id, "delete set");

        let mut next = self.clone();
        next.sets.remove(id);
        next.set_order.retain(|s| s != id);
        next
    }

    // === Cards ===

    /// Insert a new card and append it to each of the given sets.
    #[must_use]
    pub fn create_card(&self, id: CardId, fields: CardFields, sets: &[SetId]) -> Self {
        if id.is_empty() {
            warn!("create of card with empty id ignored");
            return self.clone();
        }
        if self.id_collision(&id) {
            warn!(card = %id, "create of duplicate card ignored");
            return self.clone();
        }
        let card = Card::new(id.clone(), self.known_tag_fields(fields));
        debug!(card = %id, sets = sets.len(), "create card");

        let mut next = self.clone();
        next.cards.insert(id.clone(), card);
        for set_id in sets {
            match next.sets.get_mut(set_id) {
                Some(set) => {
                    set.push_unique(id.clone());
                }
                None => warn!(card = %id, set = %set_id, "unknown set skipped"),
            }
        }
        next
    }

    /// Replace a card's editable fields, keeping its retest flag.
    #[must_use]
    pub fn update_card(&self, id: &CardId, fields: CardFields) -> Self {
        let Some(card) = self.cards.get(id) else {
            warn!(card = %id, "update of unknown card ignored");
            return self.clone();
        };
        debug!(card = %id, "update card");
        let updated = card.with_fields(self.known_tag_fields(fields));

        let mut next = self.clone();
        next.cards.insert(id.clone(), updated);
        next
    }

    /// Move a card to a new ID (delete + recreate).
    ///
    /// Set memberships and the retest flag carry over to the new card, which
    /// takes the old card's position in each set.
    #[must_use]
    pub fn recreate_card(&self, old: &CardId, new: CardId, fields: CardFields) -> Self {
        if old == &new {
            return self.update_card(old, fields);
        }
        let Some(card) = self.cards.get(old) else {
            warn!(card = %old, "recreate of unknown card ignored");
            return self.clone();
        };
        if new.is_empty() || self.id_collision(&new) {
            warn!(card = %old, to = %new, "recreate onto empty or taken id ignored");
            return self.clone();
        }
        debug!(card = %old, to = %new, "recreate card");

        let mut replacement = Card::new(new.clone(), self.known_tag_fields(fields));
        replacement.retest = card.retest;

        let mut next = self.clone();
        next.cards.remove(old);
        next.cards.insert(new.clone(), replacement);
        for set_id in self.sets_containing(old) {
            if let Some(set) = next.sets.get_mut(&set_id) {
                if let Some(index) = set.members.index_of(old) {
                    set.members.set(index, new.clone());
                }
            }
        }
        next
    }

    /// Remove a card and scrub it from every set.
    #[must_use]
    pub fn delete_card(&self, id: &CardId) -> Self {
        if !self.cards.contains_key(id) {
            warn!(card = %id, "delete of unknown card ignored");
            return self.clone();
        }
        debug!(card = %id, "delete card");

        let mut next = self.clone();
        next.cards.remove(id);
        for set_id in self.sets_containing(id) {
            if let Some(set) = next.sets.get_mut(&set_id) {
                set.remove(id);
            }
        }
        next
    }

    /// Flip the retest flag on one card.
    #[must_use]
    pub fn toggle_retest(&self, id: &CardId) -> Self {
        let Some(card) = self.cards.get(id) else {
            warn!(card = %id, "retest toggle on unknown card ignored");
            return self.clone();
        };
        let mut updated = card.clone();
        updated.retest = !updated.retest;

        let mut next = self.clone();
        next.cards.insert(id.clone(), updated);
        next
    }

    /// Reset every retest flag.
    ///
    /// When no card is flagged the returned store shares all storage with
    /// `self` (`ptr_eq` holds), so callers can detect "nothing changed".
    #[must_use]
    pub fn clear_all_retest_flags(&self) -> Self {
        if !self.has_retest_cards() {
            return self.clone();
        }
        let mut next = self.clone();
        for card_id in self.retest_card_ids() {
            if let Some(card) = next.cards.get_mut(&card_id) {
                card.retest = false;
            }
        }
        next
    }

    // === Tags ===

    /// Create (or rename) a tag. The ID is the lower-cased name.
    #[must_use]
    pub fn create_tag(&self, name: impl Into<String>) -> Self {
        let tag = Tag::from_name(name);
        if tag.id.is_empty() {
            warn!("create of tag with empty name ignored");
            return self.clone();
        }
        debug!(tag = %tag.id, "create tag");

        let mut next = self.clone();
        next.tags.insert(tag.id.clone(), tag);
        next
    }

    /// Remove a tag and scrub it from every card.
    #[must_use]
    pub fn delete_tag(&self, id: &TagId) -> Self {
        if !self.tags.contains_key(id) {
            warn!(tag = %id, "delete of unknown tag ignored");
            return self.clone();
        }
        debug!(tag = %id, "delete tag");

        let mut next = self.clone();
        next.tags.remove(id);
        for card_id in self.cards_with_tag(id) {
            if let Some(card) = next.cards.get_mut(&card_id) {
                card.tags.remove(id);
            }
        }
        next
    }

    // === Bulk ===

    /// Apply staged tag and set changes to a group of cards.
    ///
    /// Tags are added before they are removed, so a tag in both lists ends up
    /// removed. Sets are likewise added to before they are removed from.
    /// An empty card list returns the store unchanged.
    #[must_use]
    pub fn apply_bulk_changes(&self, change: &BulkChange) -> Self {
        if change.card_ids.is_empty() {
            return self.clone();
        }
        debug!(
            cards = change.card_ids.len(),
            tags_added = change.tags_to_add.len(),
            tags_removed = change.tags_to_remove.len(),
            sets_added = change.sets_to_add.len(),
            sets_removed = change.sets_to_remove.len(),
            "apply bulk changes"
        );

        let mut next = self.clone();
        let cards = self.known_cards(change.card_ids.iter().cloned());

        if !change.tags_to_add.is_empty() || !change.tags_to_remove.is_empty() {
            let tags_to_add = self.known_tags(&change.tags_to_add);
            for card_id in &cards {
                let Some(card) = self.cards.get(card_id) else { continue };
                let mut tags = card.tags.clone();
                for tag in &tags_to_add {
                    tags.insert(tag.clone());
                }
                for tag in &change.tags_to_remove {
                    tags.remove(tag);
                }
                if tags != card.tags {
                    if let Some(card) = next.cards.get_mut(card_id) {
                        card.tags = tags;
                    }
                }
            }
        }

        for set_id in &change.sets_to_add {
            match next.sets.get(set_id) {
                Some(set) if cards.iter().all(|card_id| set.contains(card_id)) => {}
                Some(_) => {
                    if let Some(set) = next.sets.get_mut(set_id) {
                        for card_id in &cards {
                            set.push_unique(card_id.clone());
                        }
                    }
                }
                None => warn!(set = %set_id, "bulk add to unknown set skipped"),
            }
        }

        for set_id in &change.sets_to_remove {
            match next.sets.get(set_id) {
                Some(set) if !cards.iter().any(|card_id| set.contains(card_id)) => {}
                Some(_) => {
                    if let Some(set) = next.sets.get_mut(set_id) {
                        for card_id in &cards {
                            set.remove(card_id);
                        }
                    }
                }
                None => warn!(set = %set_id, "bulk remove from unknown set skipped"),
            }
        }

        next
    }

    // === Helpers ===

    fn known_cards(&self, cards: impl IntoIterator<Item = CardId>) -> Vec<CardId> {
        cards
            .into_iter()
            .filter(|id| {
                let known = self.cards.contains_key(id);
                if !known {
                    warn!(card = %id, "unknown card skipped");
                }
                known
            })
            .collect()
    }

    fn known_tags(&self, tags: &[TagId]) -> Vec<TagId> {
        tags.iter()
            .filter(|id| {
                let known = self.tags.contains_key(id);
                if !known {
                    warn!(tag = %id, "unknown tag skipped");
                }
                known
            })
            .cloned()
            .collect()
    }

    fn known_tag_fields(&self, mut fields: CardFields) -> CardFields {
        fields.tags = self.known_tags(&fields.tags);
        fields
    }
}
