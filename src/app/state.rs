//! The application snapshot.
//!
//! ## AppState
//!
//! One owned value threading every subsystem:
//! - Configuration and the quiz RNG
//! - Active screen
//! - Asset store, quiz session, edit buffers, card manager
//! - Loader state and the unexported/unflushed change flags
//!
//! Commands go through `AppState::dispatch` (see `app::command`); the
//! accessors here are the read side the renderer uses.

use crate::assets::AssetStore;
use crate::core::{CardId, EngineConfig, QuizRng, QuizRngState};
use crate::editor::{CardBuffer, CardIssue, SetBuffer};
use crate::filter::CardManager;
use crate::persist::LoaderState;
use crate::quiz::{CardFace, QuizSession};

use super::mode::AppMode;

/// Complete application state.
///
/// Cloning is cheap: the store and every list in it are `im` collections.
#[derive(Clone, Debug)]
pub struct AppState {
    // === Configuration ===
    pub(crate) config: EngineConfig,
    pub(crate) rng: QuizRng,

    // === Screen ===
    pub(crate) mode: AppMode,

    // === Subsystems ===
    pub(crate) store: AssetStore,
    pub(crate) quiz: QuizSession,
    pub(crate) card_buffer: CardBuffer,
    pub(crate) set_buffer: SetBuffer,
    pub(crate) card_manager: CardManager,
    pub(crate) loader: LoaderState,

    // === Persistence flags ===
    /// Store content changed since the last export.
    pub(crate) unexported_changes: bool,
    /// A `WriteLocal` was emitted and the transport has not confirmed it
    /// with `Command::Flushed`.
    pub(crate) unflushed_changes: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AppState {
    /// Fresh state: empty store, load panel showing.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rng: QuizRng::new(config.seed),
            mode: AppMode::LoadPanel,
            store: AssetStore::new(),
            quiz: QuizSession::new(config.initial_quiz_mode),
            card_buffer: CardBuffer::default(),
            set_buffer: SetBuffer::default(),
            card_manager: CardManager::new(),
            loader: LoaderState::new(config.export_file_name.clone()),
            unexported_changes: false,
            unflushed_changes: false,
            config,
        }
    }

    /// Resume the shuffle sequence from a captured RNG state.
    #[must_use]
    pub fn with_rng_state(mut self, state: &QuizRngState) -> Self {
        self.rng = QuizRng::from_state(state);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn rng_state(&self) -> QuizRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    #[must_use]
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn card_buffer(&self) -> &CardBuffer {
        &self.card_buffer
    }

    #[must_use]
    pub fn set_buffer(&self) -> &SetBuffer {
        &self.set_buffer
    }

    #[must_use]
    pub fn card_manager(&self) -> &CardManager {
        &self.card_manager
    }

    #[must_use]
    pub fn loader(&self) -> &LoaderState {
        &self.loader
    }

    #[must_use]
    pub fn unexported_changes(&self) -> bool {
        self.unexported_changes
    }

    #[must_use]
    pub fn unflushed_changes(&self) -> bool {
        self.unflushed_changes
    }

    // === Derived views ===

    /// The current quiz card as shown in the active quiz mode.
    #[must_use]
    pub fn current_face(&self) -> Option<CardFace> {
        let id = self.quiz.current_card_id()?;
        let card = self.store.card(id)?;
        Some(CardFace::new(card, self.quiz.mode()))
    }

    /// Whether a retest run can be started.
    #[must_use]
    pub fn can_retest(&self) -> bool {
        self.store.has_retest_cards()
    }

    /// Whether the current quiz card is flagged for retest.
    #[must_use]
    pub fn current_card_flagged(&self) -> bool {
        self.quiz
            .current_card_id()
            .and_then(|id| self.store.card(id))
            .is_some_and(|card| card.retest)
    }

    /// Cards shown in the card manager.
    #[must_use]
    pub fn visible_card_ids(&self) -> Vec<CardId> {
        self.card_manager.visible_card_ids(&self.store)
    }

    /// Why the card draft cannot be saved, if it cannot.
    #[must_use]
    pub fn card_issue(&self) -> Option<CardIssue> {
        self.card_buffer.issue(&self.store)
    }

    #[must_use]
    pub fn can_save_card(&self) -> bool {
        self.card_buffer.can_save(&self.store)
    }

    #[must_use]
    pub fn can_save_set(&self) -> bool {
        self.set_buffer.can_save(&self.store)
    }
}
