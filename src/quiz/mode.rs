//! Quiz modes and card reveal states.

use serde::{Deserialize, Serialize};

/// Which field is asked and which is answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    /// Show the character, answer with its meaning.
    #[default]
    Character,
    /// Show the readings, answer with the character.
    Meaning,
    /// Show the character, answer with its kunyomi.
    Kunyomi,
    /// Show the character, answer with its onyomi.
    Onyomi,
}

impl QuizMode {
    /// All modes in declared order.
    pub const ALL: [QuizMode; 4] = [
        QuizMode::Character,
        QuizMode::Meaning,
        QuizMode::Kunyomi,
        QuizMode::Onyomi,
    ];

    /// The modes the user can switch to from this one, in declared order.
    #[must_use]
    pub fn alternatives(self) -> Vec<QuizMode> {
        Self::ALL.into_iter().filter(|&mode| mode != self).collect()
    }

    /// The next mode in declared order, wrapping around.
    #[must_use]
    pub fn next(self) -> QuizMode {
        let index = Self::ALL.iter().position(|&mode| mode == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Caption for the control that switches into this mode.
    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            QuizMode::Character => "Test characters",
            QuizMode::Meaning => "Test meanings",
            QuizMode::Kunyomi => "Test kunyomi",
            QuizMode::Onyomi => "Test onyomi",
        }
    }
}

/// How much of the current card is revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Question,
    Hint,
    Answer,
}

impl CardState {
    /// Next state in the `question -> hint -> answer -> question` cycle.
    #[must_use]
    pub fn next(self) -> CardState {
        match self {
            CardState::Question => CardState::Hint,
            CardState::Hint => CardState::Answer,
            CardState::Answer => CardState::Question,
        }
    }
}
