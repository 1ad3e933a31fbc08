//! Quiz commands and the session reducer.

use serde::{Deserialize, Serialize};

use super::mode::QuizMode;
use super::session::{QuizSelector, QuizSession};
use crate::assets::AssetStore;
use crate::core::QuizRng;

/// A command against the quiz session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizCommand {
    Start(QuizSelector),
    StartDefault,
    Restart,
    Flip,
    ChangeMode(QuizMode),
    StartRetest,
    ToggleRetestCurrent,
    Stop,
}

impl QuizSession {
    /// Apply a command, returning the next store and session.
    ///
    /// Most commands leave the store untouched; starting a run clears the
    /// retest flags and toggling flags the current card.
    #[must_use]
    pub fn apply(&self, store: &AssetStore, command: &QuizCommand, rng: &mut QuizRng) -> (AssetStore, QuizSession) {
        match command {
            QuizCommand::Start(selector) => self.start(store, selector.clone(), rng),
            QuizCommand::StartDefault => self.start_default(store, rng),
            QuizCommand::Restart => self.restart(store, rng),
            QuizCommand::Flip => (store.clone(), self.flip()),
            QuizCommand::ChangeMode(mode) => (store.clone(), self.change_quiz_mode(*mode)),
            QuizCommand::StartRetest => self.start_retest(store, rng),
            QuizCommand::ToggleRetestCurrent => (self.toggle_retest_current(store), self.clone()),
            QuizCommand::Stop => (store.clone(), self.stop()),
        }
    }
}
