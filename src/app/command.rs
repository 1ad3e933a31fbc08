//! Application commands, effects and the top-level reducer.
//!
//! `AppState::dispatch` is the single entry point for the UI. It returns the
//! next snapshot plus the effects the transport has to carry out. The core
//! never performs I/O itself.

use tracing::{debug, info, warn};

use super::mode::AppMode;
use super::state::AppState;
use crate::assets::{AssetCommand, AssetStore};
use crate::core::{CardId, SetId, TagId};
use crate::editor::{CardBuffer, CardBufferCommand, EditTarget, SetBuffer, SetBufferCommand};
use crate::error::Result;
use crate::filter::{CardManager, CardManagerCommand};
use crate::persist::{self, DataSource};
use crate::quiz::QuizCommand;

/// A UI event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Raw text read by the transport (`None` when it had nothing).
    Load { raw: Option<String>, origin: DataSource },
    FileSelectionChanged(bool),
    Export,
    /// The transport finished the last `WriteLocal`.
    Flushed,
    ChangeMode(AppMode),

    Asset(AssetCommand),
    Quiz(QuizCommand),

    EditNewCard,
    EditNewCardInSet(SetId),
    EditCard(CardId),
    /// Open the card at the quiz cursor.
    EditCurrentCard,
    CardBuffer(CardBufferCommand),
    SaveCard,

    EditNewSet,
    EditSet(SetId),
    SetBuffer(SetBufferCommand),
    SaveSet,

    /// Discard whichever draft is open and return to where editing began.
    CancelEdit,

    CardManager(CardManagerCommand),
    /// Apply the staged bulk edit to the visible cards.
    ApplyBulk,
}

/// Work the transport has to do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Persist the snapshot to local storage.
    WriteLocal { key: String, contents: String },
    /// Offer the export document as a download.
    Download { file_name: String, contents: String },
}

/// Result of dispatching a command.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: AppState,
    pub effects: Vec<Effect>,
}

impl AppState {
    /// Apply a command.
    ///
    /// Fails only if encoding the store for a flush or export fails. Load
    /// failures are not errors here: they are recorded in the loader state.
    pub fn dispatch(&self, command: Command) -> Result<Transition> {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match command {
            Command::Load { raw, origin } => next.load(raw.as_deref(), origin, &mut effects)?,
            Command::FileSelectionChanged(selected) => {
                next.loader = next.loader.file_selection_changed(selected);
            }
            Command::Export => {
                let contents = persist::serialize(&next.store, false)?;
                let file_name = next.config.export_file();
                info!(file = %file_name, "export");
                effects.push(Effect::Download { file_name, contents });
                next.unexported_changes = false;
                next.flush(&mut effects)?;
            }
            Command::Flushed => next.unflushed_changes = false,
            Command::ChangeMode(mode) => next.change_mode(mode),

            Command::Asset(asset) => next.apply_asset(&asset, &mut effects)?,
            Command::Quiz(quiz) => {
                let (store, session) = next.quiz.apply(&next.store, &quiz, &mut next.rng);
                next.store = store;
                next.quiz = session;
            }

            Command::EditNewCard => next.open_card_buffer(CardBuffer::new_card()),
            Command::EditNewCardInSet(set) => next.open_card_buffer(CardBuffer::new_card_in_set(set)),
            Command::EditCard(id) => next.edit_card(&id),
            Command::EditCurrentCard => match next.quiz.current_card_id().cloned() {
                Some(id) => next.edit_card(&id),
                None => warn!("no current card to edit"),
            },
            Command::CardBuffer(edit) => {
                let (store, buffer) = next.card_buffer.apply(&next.store, &edit);
                next.card_buffer = buffer;
                next.replace_store(store, &mut effects)?;
            }
            Command::SaveCard => next.save_card(&mut effects)?,

            Command::EditNewSet => next.open_set_buffer(SetBuffer::new_set()),
            Command::EditSet(id) => match SetBuffer::for_set(&next.store, &id) {
                Some(buffer) => next.open_set_buffer(buffer),
                None => warn!(set = %id, "edit of unknown set ignored"),
            },
            Command::SetBuffer(edit) => next.set_buffer = next.set_buffer.apply(&edit),
            Command::SaveSet => next.save_set(&mut effects)?,

            Command::CancelEdit => next.close_editors(),

            Command::CardManager(manager) => next.card_manager = next.card_manager.apply(&manager),
            Command::ApplyBulk => {
                let (store, manager) = next.card_manager.apply_bulk(&next.store);
                next.card_manager = manager;
                next.replace_store(store, &mut effects)?;
            }
        }

        Ok(Transition { state: next, effects })
    }

    fn load(&mut self, raw: Option<&str>, origin: DataSource, effects: &mut Vec<Effect>) -> Result<()> {
        let loaded = match persist::deserialize(raw, origin) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(%origin, error = %e, "load failed");
                self.loader = self.loader.data_bad(origin);
                return Ok(());
            }
        };

        self.store = loaded.store;
        self.unexported_changes = origin == DataSource::Local && loaded.unexported_changes;
        self.loader = self.loader.data_loaded();
        self.card_buffer = CardBuffer::default();
        self.set_buffer = SetBuffer::default();
        self.card_manager = CardManager::new();
        self.flush(effects)?;

        let (store, quiz) = self.quiz.start_default(&self.store, &mut self.rng);
        self.store = store;
        self.quiz = quiz;
        self.mode = AppMode::Quiz;
        Ok(())
    }

    fn change_mode(&mut self, mode: AppMode) {
        if mode.is_editor() {
            warn!(%mode, "editor modes are entered through an edit command");
            return;
        }
        if mode == AppMode::CardManager {
            self.quiz = self.quiz.stop();
        }
        if mode == AppMode::Quiz && self.quiz.selector().is_none() {
            let (store, quiz) = self.quiz.start_default(&self.store, &mut self.rng);
            self.store = store;
            self.quiz = quiz;
        }
        debug!(from = %self.mode, to = %mode, "change mode");
        self.mode = mode;
    }

    fn apply_asset(&mut self, command: &AssetCommand, effects: &mut Vec<Effect>) -> Result<()> {
        let store = self.store.apply(command);
        if store.ptr_eq(&self.store) {
            return Ok(());
        }

        match command {
            AssetCommand::DeleteCard(id) => self.card_deleted(id),
            AssetCommand::RecreateCard { old, new, .. } => self.card_renamed(old, new),
            AssetCommand::DeleteSet(id) => self.set_deleted(id),
            AssetCommand::DeleteTag(id) => self.tag_deleted(id),
            _ => {}
        }

        if command.is_ephemeral() {
            self.store = store;
            Ok(())
        } else {
            self.replace_store(store, effects)
        }
    }

    fn card_deleted(&mut self, id: &CardId) {
        self.quiz = self.quiz.card_deleted(id);
        self.card_manager = self.card_manager.card_deleted(id);
        self.set_buffer = self.set_buffer.card_deleted(id);
        if self.card_buffer.target() == Some(&EditTarget::Existing(id.clone())) {
            debug!(card = %id, "draft of deleted card discarded");
            self.close_editors();
        }
    }

    fn set_deleted(&mut self, id: &SetId) {
        if self.quiz.current_set_id() == Some(id) {
            self.quiz = self.quiz.stop();
        }
        self.card_buffer = self.card_buffer.set_deleted(id);
        self.card_manager = self.card_manager.set_deleted(id);
        if self.set_buffer.target() == Some(&EditTarget::Existing(id.clone())) {
            debug!(set = %id, "draft of deleted set discarded");
            self.close_editors();
        }
    }

    fn tag_deleted(&mut self, id: &TagId) {
        if self.quiz.current_tag_id() == Some(id) {
            self.quiz = self.quiz.stop();
        }
        self.card_buffer = self.card_buffer.tag_deleted(id);
        self.card_manager = self.card_manager.tag_deleted(id);
    }

    fn card_renamed(&mut self, old: &CardId, new: &CardId) {
        self.quiz = self.quiz.card_renamed(old, new);
        self.card_manager = self.card_manager.card_renamed(old, new);
    }

    fn edit_card(&mut self, id: &CardId) {
        match CardBuffer::for_card(&self.store, id) {
            Some(buffer) => self.open_card_buffer(buffer),
            None => warn!(card = %id, "edit of unknown card ignored"),
        }
    }

    fn open_card_buffer(&mut self, buffer: CardBuffer) {
        let return_to = self.return_mode();
        self.card_buffer = buffer.with_mode_on_exit(return_to);
        self.mode = AppMode::CardEditor;
    }

    fn open_set_buffer(&mut self, buffer: SetBuffer) {
        let return_to = self.return_mode();
        self.set_buffer = buffer.with_mode_on_exit(return_to);
        self.mode = AppMode::SetEditor;
    }

    /// Where an editor opened now should return to.
    ///
    /// Opening one editor from another returns to where the first began.
    fn return_mode(&self) -> AppMode {
        match self.mode {
            AppMode::CardEditor => self.card_buffer.mode_on_exit().unwrap_or(AppMode::Quiz),
            AppMode::SetEditor => self.set_buffer.mode_on_exit().unwrap_or(AppMode::Quiz),
            mode => mode,
        }
    }

    fn save_card(&mut self, effects: &mut Vec<Effect>) -> Result<()> {
        let Some(command) = self.card_buffer.command(&self.store) else {
            warn!(issue = ?self.card_buffer.issue(&self.store), "save of unsavable card draft ignored");
            return Ok(());
        };
        self.apply_asset(&command, effects)?;
        self.close_editors();
        Ok(())
    }

    fn save_set(&mut self, effects: &mut Vec<Effect>) -> Result<()> {
        let Some(command) = self.set_buffer.command(&self.store) else {
            warn!("save of unsavable set draft ignored");
            return Ok(());
        };
        self.apply_asset(&command, effects)?;
        self.close_editors();
        Ok(())
    }

    fn close_editors(&mut self) {
        let return_to = match self.mode {
            AppMode::CardEditor => self.card_buffer.mode_on_exit(),
            AppMode::SetEditor => self.set_buffer.mode_on_exit(),
            _ => None,
        };
        self.card_buffer = CardBuffer::default();
        self.set_buffer = SetBuffer::default();
        if let Some(mode) = return_to {
            self.mode = mode;
        } else if self.mode.is_editor() {
            self.mode = AppMode::Quiz;
        }
    }

    /// Install a changed store, marking it unexported and flushing it.
    fn replace_store(&mut self, store: AssetStore, effects: &mut Vec<Effect>) -> Result<()> {
        if store.ptr_eq(&self.store) {
            return Ok(());
        }
        self.store = store;
        self.unexported_changes = true;
        self.flush(effects)
    }

    fn flush(&mut self, effects: &mut Vec<Effect>) -> Result<()> {
        let contents = persist::serialize(&self.store, self.unexported_changes)?;
        effects.push(Effect::WriteLocal {
            key: self.config.storage_key.clone(),
            contents,
        });
        self.unflushed_changes = true;
        Ok(())
    }
}

/// Convenience for running a command sequence in tests and tools.
impl AppState {
    /// Dispatch commands in order, collecting every effect.
    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) -> Result<Transition> {
        let mut state = self.clone();
        let mut effects = Vec::new();
        for command in commands {
            let transition = state.dispatch(command)?;
            state = transition.state;
            effects.extend(transition.effects);
        }
        Ok(Transition { state, effects })
    }
}
