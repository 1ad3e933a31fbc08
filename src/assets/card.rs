//! Card entity.

use im::OrdSet;

use crate::core::{CardId, TagId};

/// Editable fields of a card.
///
/// This is the payload of create/update commands. The card ID is passed
/// separately because it is never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFields {
    pub meaning: String,
    pub hint: String,
    pub kunyomi: String,
    pub onyomi: String,
    pub tags: Vec<TagId>,
}

impl CardFields {
    /// Fields with only a meaning set.
    pub fn with_meaning(meaning: impl Into<String>) -> Self {
        Self {
            meaning: meaning.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    #[must_use]
    pub fn kunyomi(mut self, kunyomi: impl Into<String>) -> Self {
        self.kunyomi = kunyomi.into();
        self
    }

    #[must_use]
    pub fn onyomi(mut self, onyomi: impl Into<String>) -> Self {
        self.onyomi = onyomi.into();
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<TagId>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A quizzable item.
///
/// Tags are held in an ordered set, so they are always sorted ascending and
/// never duplicated. Set membership lives on the set, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub meaning: String,
    pub hint: String,
    pub kunyomi: String,
    pub onyomi: String,
    pub tags: OrdSet<TagId>,
    /// Session-only marker, never exported.
    pub retest: bool,
}

impl Card {
    /// Create a card from its ID and editable fields.
    pub fn new(id: CardId, fields: CardFields) -> Self {
        Self {
            id,
            meaning: fields.meaning,
            hint: fields.hint,
            kunyomi: fields.kunyomi,
            onyomi: fields.onyomi,
            tags: fields.tags.into_iter().collect(),
            retest: false,
        }
    }

    /// The character this card studies (same as its ID).
    #[must_use]
    pub fn character(&self) -> &str {
        self.id.as_str()
    }

    /// Replace the editable fields, keeping ID and retest flag.
    #[must_use]
    pub fn with_fields(&self, fields: CardFields) -> Self {
        Self {
            retest: self.retest,
            ..Self::new(self.id.clone(), fields)
        }
    }

    /// Extract the editable fields.
    #[must_use]
    pub fn fields(&self) -> CardFields {
        CardFields {
            meaning: self.meaning.clone(),
            hint: self.hint.clone(),
            kunyomi: self.kunyomi.clone(),
            onyomi: self.onyomi.clone(),
            tags: self.tags.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: &TagId) -> bool {
        self.tags.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_sorted_and_deduplicated() {
        let fields = CardFields::with_meaning("sun")
            .tag("time")
            .tag("nature")
            .tag("time");
        let card = Card::new(CardId::new("日"), fields);

        let tags: Vec<_> = card.tags.iter().map(TagId::as_str).collect();
        assert_eq!(tags, vec!["nature", "time"]);
        assert!(!card.retest);
    }

    #[test]
    fn test_with_fields_preserves_retest() {
        let mut card = Card::new(CardId::new("月"), CardFields::with_meaning("moon"));
        card.retest = true;

        let updated = card.with_fields(CardFields::with_meaning("month").onyomi("げつ"));
        assert_eq!(updated.id, CardId::new("月"));
        assert_eq!(updated.meaning, "month");
        assert_eq!(updated.onyomi, "げつ");
        assert!(updated.retest);
    }

    #[test]
    fn test_fields_roundtrip() {
        let fields = CardFields::with_meaning("fire")
            .hint("flames")
            .kunyomi("ひ")
            .onyomi("か")
            .tag("element");
        let card = Card::new(CardId::new("火"), fields.clone());
        assert_eq!(card.fields(), fields);
        assert_eq!(card.character(), "火");
    }
}
