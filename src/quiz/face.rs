//! What a card shows under each quiz mode.

use wana_kana::ConvertJapanese;

use super::mode::{CardState, QuizMode};
use crate::assets::Card;

/// Whether a question is a single character or a multi-character word.
///
/// Lets the renderer size the question text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VocabularyKind {
    Character,
    Compound,
}

impl VocabularyKind {
    /// Classify an ID by its character count.
    #[must_use]
    pub fn of(text: &str) -> Self {
        if text.chars().count() == 1 {
            VocabularyKind::Character
        } else {
            VocabularyKind::Compound
        }
    }
}

/// A card projected into question, hint and answer text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFace {
    pub question: String,
    pub hint: String,
    pub answer: String,
    pub kind: VocabularyKind,
}

impl CardFace {
    /// Project a card under a quiz mode.
    ///
    /// In meaning mode the question lists the readings, kunyomi first, with
    /// the onyomi written in katakana.
    #[must_use]
    pub fn new(card: &Card, mode: QuizMode) -> Self {
        let character = card.character().to_string();
        let kind = VocabularyKind::of(&character);
        match mode {
            QuizMode::Character => Self {
                question: character,
                hint: card.hint.clone(),
                answer: card.meaning.clone(),
                kind,
            },
            QuizMode::Meaning => Self {
                question: readings(card),
                hint: card.meaning.clone(),
                answer: character,
                kind: VocabularyKind::Compound,
            },
            QuizMode::Kunyomi => Self {
                question: character,
                hint: card.meaning.clone(),
                answer: card.kunyomi.clone(),
                kind,
            },
            QuizMode::Onyomi => Self {
                question: character,
                hint: card.meaning.clone(),
                answer: card.onyomi.clone(),
                kind,
            },
        }
    }

    /// The text visible in a reveal state: question only, then the hint,
    /// then the answer.
    #[must_use]
    pub fn visible(&self, state: CardState) -> Vec<&str> {
        match state {
            CardState::Question => vec![self.question.as_str()],
            CardState::Hint => vec![self.question.as_str(), self.hint.as_str()],
            CardState::Answer => vec![self.question.as_str(), self.answer.as_str()],
        }
    }
}

fn readings(card: &Card) -> String {
    let separator = if !card.kunyomi.is_empty() && !card.onyomi.is_empty() {
        "/"
    } else {
        ""
    };
    format!("{}{}{}", card.kunyomi, separator, card.onyomi.as_str().to_katakana())
}
