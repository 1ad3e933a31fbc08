//! Set and tag entities.

use im::Vector;

use crate::core::{CardId, SetId, TagId};

/// A named, user-curated group of cards.
///
/// Member order is whatever the user built up; duplicates are never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSet {
    pub id: SetId,
    pub name: String,
    pub members: Vector<CardId>,
}

impl CardSet {
    /// Create a set, dropping duplicate members (first occurrence wins).
    pub fn new(id: SetId, name: impl Into<String>, members: impl IntoIterator<Item = CardId>) -> Self {
        let mut set = Self {
            id,
            name: name.into(),
            members: Vector::new(),
        };
        for card in members {
            set.push_unique(card);
        }
        set
    }

    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.members.contains(card)
    }

    /// Append a card unless it is already a member.
    ///
    /// Returns true if the card was added.
    pub fn push_unique(&mut self, card: CardId) -> bool {
        if self.contains(&card) {
            false
        } else {
            self.members.push_back(card);
            true
        }
    }

    /// Remove a card from the member list.
    ///
    /// Returns true if the card was a member.
    pub fn remove(&mut self, card: &CardId) -> bool {
        match self.members.index_of(card) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A label attached to cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    /// Create a tag from its display name; the ID is the lower-cased name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: TagId::from_name(&name),
            name,
        }
    }
}
