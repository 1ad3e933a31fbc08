//! Filter criteria for the card manager.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::assets::Card;
use crate::core::{SetId, TagId};

/// Which pass a criterion belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Keep only cards matching every active predicate.
    Include,
    /// Drop cards matching any active predicate.
    Exclude,
}

/// A card field the search text can be matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TextField {
    Character,
    Hint,
    Meaning,
    Kunyomi,
    Onyomi,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::Character,
        TextField::Hint,
        TextField::Meaning,
        TextField::Kunyomi,
        TextField::Onyomi,
    ];

    /// The field's text on a card.
    #[must_use]
    pub fn of(self, card: &Card) -> &str {
        match self {
            TextField::Character => card.character(),
            TextField::Hint => &card.hint,
            TextField::Meaning => &card.meaning,
            TextField::Kunyomi => &card.kunyomi,
            TextField::Onyomi => &card.onyomi,
        }
    }
}

/// One filter pass: a conjunction of independently toggled predicates.
///
/// All toggles off and all lists empty means the pass does nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPass {
    /// Restrict to (include) or drop (exclude) the selected cards.
    pub match_selected: bool,
    pub search_text: String,
    /// Fields the search text is matched against. Empty means no text
    /// predicate.
    pub text_fields: OrdSet<TextField>,
    /// Search box state of the tag picker.
    pub tag_search_text: String,
    pub tags: Vec<TagId>,
    pub sets: Vec<SetId>,
}

impl FilterPass {
    /// Whether no predicate is active.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        !self.match_selected && self.text_fields.is_empty() && self.tags.is_empty() && self.sets.is_empty()
    }

    #[must_use]
    pub fn matches_field(&self, field: TextField) -> bool {
        self.text_fields.contains(&field)
    }

    /// Flip one text-field toggle.
    #[must_use]
    pub fn toggle_field(&self, field: TextField) -> Self {
        let mut next = self.clone();
        if next.text_fields.remove(&field).is_none() {
            next.text_fields.insert(field);
        }
        next
    }

    /// Fields whose text contains the search string.
    ///
    /// Only toggled fields are checked. An empty search string is contained
    /// in every field.
    pub(crate) fn text_hits<'a>(&'a self, card: &'a Card) -> impl Iterator<Item = TextField> + 'a {
        self.text_fields
            .iter()
            .copied()
            .filter(move |field| field.of(card).contains(self.search_text.as_str()))
    }
}
