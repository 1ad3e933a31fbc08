//! Quiz session state machine.
//!
//! A session is a shuffled run of card IDs plus a cursor. Each card cycles
//! `question -> hint -> answer -> question`; the last transition moves the
//! cursor to the next card.
//!
//! ## Lifecycle
//!
//! - `start`: shuffle the cards of a set or tag, clear every retest flag
//! - `flip`: reveal more of the current card, or move on
//! - `start_retest`: shuffle the flagged cards, clear the flags
//! - `stop`: forget the run (used when switching to card management)
//!
//! Operations that start a run also touch the asset store (retest flags),
//! so they take the store and return the next one alongside the session.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::mode::{CardState, QuizMode};
use crate::assets::AssetStore;
use crate::core::{CardId, QuizRng, SetId, TagId};

/// What a quiz run was built from.
///
/// A run is scoped by a set or by a tag, never both.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizSelector {
    Set(SetId),
    Tag(TagId),
}

impl QuizSelector {
    /// Resolve the selector to the unshuffled member list.
    ///
    /// An unknown set resolves to an empty list.
    #[must_use]
    pub fn resolve(&self, store: &AssetStore) -> Vec<CardId> {
        match self {
            QuizSelector::Set(id) => store.set_members(id),
            QuizSelector::Tag(id) => store.cards_with_tag(id),
        }
    }
}

/// The active quiz run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSession {
    selector: Option<QuizSelector>,
    cards: Vector<CardId>,
    index: usize,
    card_state: CardState,
    mode: QuizMode,
    retesting: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(QuizMode::default())
    }
}

impl QuizSession {
    /// Create an idle session in the given mode.
    #[must_use]
    pub fn new(mode: QuizMode) -> Self {
        Self {
            selector: None,
            cards: Vector::new(),
            index: 0,
            card_state: CardState::Question,
            mode,
            retesting: false,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn selector(&self) -> Option<&QuizSelector> {
        self.selector.as_ref()
    }

    #[must_use]
    pub fn current_set_id(&self) -> Option<&SetId> {
        match &self.selector {
            Some(QuizSelector::Set(id)) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_tag_id(&self) -> Option<&TagId> {
        match &self.selector {
            Some(QuizSelector::Tag(id)) => Some(id),
            _ => None,
        }
    }

    /// The shuffled run.
    #[must_use]
    pub fn cards(&self) -> &Vector<CardId> {
        &self.cards
    }

    #[must_use]
    pub fn current_card_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn card_state(&self) -> CardState {
        self.card_state
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn is_retesting(&self) -> bool {
        self.retesting
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// No quiz available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card under the cursor, if the cursor is inside the run.
    #[must_use]
    pub fn current_card_id(&self) -> Option<&CardId> {
        self.cards.get(self.index)
    }

    /// Whether `flip` is allowed.
    ///
    /// False on an empty run and on the answer of the last card.
    #[must_use]
    pub fn can_flip(&self) -> bool {
        if self.index >= self.cards.len() {
            return false;
        }
        !(self.card_state == CardState::Answer && self.index + 1 >= self.cards.len())
    }

    /// Whether there is a run to restart.
    #[must_use]
    pub fn can_restart(&self) -> bool {
        self.selector.is_some()
    }

    /// Whether a run is in progress (started and not yet at its last answer).
    #[must_use]
    pub fn in_progress(&self) -> bool {
        !self.cards.is_empty() && self.can_flip()
    }

    // === Transitions ===

    /// Start a run over the cards of a set or tag.
    ///
    /// Clears every retest flag. An empty member list gives a valid, empty
    /// run.
    #[must_use]
    pub fn start(&self, store: &AssetStore, selector: QuizSelector, rng: &mut QuizRng) -> (AssetStore, QuizSession) {
        let members = selector.resolve(store);
        let shuffled = rng.draw_shuffle(&members);
        debug!(selector = ?selector, cards = shuffled.len(), "start quiz");

        let session = QuizSession {
            selector: Some(selector),
            cards: shuffled.into_iter().collect(),
            index: 0,
            card_state: CardState::Question,
            mode: self.mode,
            retesting: false,
        };
        (store.clear_all_retest_flags(), session)
    }

    /// Start a run over the first set in display order.
    ///
    /// With no sets, the session is stopped instead.
    #[must_use]
    pub fn start_default(&self, store: &AssetStore, rng: &mut QuizRng) -> (AssetStore, QuizSession) {
        match store.set_order().front() {
            Some(id) => self.start(store, QuizSelector::Set(id.clone()), rng),
            None => {
                debug!("no sets, default quiz unavailable");
                (store.clone(), self.stop())
            }
        }
    }

    /// Start the current selector again with a fresh shuffle.
    #[must_use]
    pub fn restart(&self, store: &AssetStore, rng: &mut QuizRng) -> (AssetStore, QuizSession) {
        match &self.selector {
            Some(selector) => self.start(store, selector.clone(), rng),
            None => {
                warn!("restart without a quiz ignored");
                (store.clone(), self.clone())
            }
        }
    }

    /// Reveal more of the current card, or move to the next one.
    #[must_use]
    pub fn flip(&self) -> QuizSession {
        if !self.can_flip() {
            warn!(index = self.index, len = self.cards.len(), "flip not allowed, ignored");
            return self.clone();
        }
        let card_state = self.card_state.next();
        let index = if card_state == CardState::Question {
            self.index + 1
        } else {
            self.index
        };
        QuizSession {
            card_state,
            index,
            ..self.clone()
        }
    }

    /// Switch which field is asked.
    #[must_use]
    pub fn change_quiz_mode(&self, mode: QuizMode) -> QuizSession {
        QuizSession {
            mode,
            ..self.clone()
        }
    }

    /// Start a run over every card flagged for retest, clearing the flags.
    ///
    /// The selector is kept so that the set or tag run can be restarted.
    #[must_use]
    pub fn start_retest(&self, store: &AssetStore, rng: &mut QuizRng) -> (AssetStore, QuizSession) {
        let flagged = store.retest_card_ids();
        let shuffled = rng.draw_shuffle(&flagged);
        debug!(cards = shuffled.len(), "start retest");

        let session = QuizSession {
            cards: shuffled.into_iter().collect(),
            index: 0,
            card_state: CardState::Question,
            retesting: true,
            ..self.clone()
        };
        (store.clear_all_retest_flags(), session)
    }

    /// Flip the retest flag of the card under the cursor.
    #[must_use]
    pub fn toggle_retest_current(&self, store: &AssetStore) -> AssetStore {
        match self.current_card_id() {
            Some(id) => store.toggle_retest(id),
            None => {
                warn!("retest toggle without a current card ignored");
                store.clone()
            }
        }
    }

    /// Forget the current run, keeping the quiz mode.
    #[must_use]
    pub fn stop(&self) -> QuizSession {
        QuizSession::new(self.mode)
    }

    /// Drop a deleted card from the run.
    ///
    /// If it sat before the cursor the cursor moves back with it, so the
    /// same card stays current.
    #[must_use]
    pub fn card_deleted(&self, id: &CardId) -> QuizSession {
        let Some(position) = self.cards.index_of(id) else {
            return self.clone();
        };
        let mut cards = self.cards.clone();
        cards.remove(position);

        let removed_current = position == self.index;
        let index = if position < self.index { self.index - 1 } else { self.index };
        QuizSession {
            cards,
            index,
            card_state: if removed_current { CardState::Question } else { self.card_state },
            ..self.clone()
        }
    }

    /// Follow a card that moved to a new ID.
    #[must_use]
    pub fn card_renamed(&self, old: &CardId, new: &CardId) -> QuizSession {
        let Some(position) = self.cards.index_of(old) else {
            return self.clone();
        };
        let mut cards = self.cards.clone();
        cards.set(position, new.clone());
        QuizSession {
            cards,
            ..self.clone()
        }
    }
}
