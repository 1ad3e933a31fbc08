//! On-disk records of the export document.
//!
//! ```text
//! {
//!   "allSets": ["1", "2"],
//!   "assets": {
//!     "kanji": { "日": { "character": "日", "meaning": "sun", "notes": "", ... } },
//!     "sets":  { "1": { "id": "1", "name": "Core 1", "kanji": ["日"] } },
//!     "tags":  { "time": { "id": "time", "name": "Time" } }
//!   },
//!   "unexportedChanges": false
//! }
//! ```
//!
//! Empty tags and readings are left out of card records, and the retest
//! flag is never written.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets::{Card, CardFields, CardSet, Tag};
use crate::core::{CardId, SetId, TagId};

/// The whole export document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub all_sets: Vec<SetId>,
    pub assets: AssetsRecord,
    #[serde(default)]
    pub unexported_changes: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsRecord {
    pub kanji: BTreeMap<String, CardRecord>,
    pub sets: BTreeMap<String, SetRecord>,
    #[serde(default)]
    pub tags: BTreeMap<String, TagRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub character: CardId,
    pub meaning: String,
    /// The hint.
    pub notes: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub onyomi: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kunyomi: String,
    /// Read if present, never written.
    #[serde(default, skip_serializing)]
    pub retest: bool,
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        Self {
            character: card.id.clone(),
            meaning: card.meaning.clone(),
            notes: card.hint.clone(),
            tags: card.tags.iter().cloned().collect(),
            onyomi: card.onyomi.clone(),
            kunyomi: card.kunyomi.clone(),
            retest: false,
        }
    }
}

impl CardRecord {
    #[must_use]
    pub fn into_card(self) -> Card {
        let fields = CardFields {
            meaning: self.meaning,
            hint: self.notes,
            kunyomi: self.kunyomi,
            onyomi: self.onyomi,
            tags: self.tags,
        };
        let mut card = Card::new(self.character, fields);
        card.retest = self.retest;
        card
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    pub id: SetId,
    pub name: String,
    pub kanji: Vec<CardId>,
}

impl From<&CardSet> for SetRecord {
    fn from(set: &CardSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            kanji: set.members.iter().cloned().collect(),
        }
    }
}

impl SetRecord {
    #[must_use]
    pub fn into_set(self) -> CardSet {
        CardSet::new(self.id, self.name, self.kanji)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: TagId,
    /// Defaults to the ID when absent.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<&Tag> for TagRecord {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            name: Some(tag.name.clone()),
        }
    }
}

impl TagRecord {
    #[must_use]
    pub fn into_tag(self) -> Tag {
        let name = self.name.unwrap_or_else(|| self.id.as_str().to_string());
        Tag { id: self.id, name }
    }
}
