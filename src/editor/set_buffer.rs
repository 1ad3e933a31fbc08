//! Draft set being created or edited.

use tracing::warn;

use super::EditTarget;
use crate::app::AppMode;
use crate::assets::{AssetCommand, AssetStore};
use crate::core::{CardId, SetId};

/// Edits applied to a set buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetBufferCommand {
    SetName(String),
    RemoveMember(CardId),
}

/// Draft copy of a set's name and member list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetBuffer {
    target: Option<EditTarget<SetId>>,
    pub name: String,
    members: Vec<CardId>,
    mode_on_exit: Option<AppMode>,
}

impl SetBuffer {
    #[must_use]
    pub fn new_set() -> Self {
        Self {
            target: Some(EditTarget::New),
            ..Self::default()
        }
    }

    /// A draft seeded from a stored set, or `None` if it does not exist.
    #[must_use]
    pub fn for_set(store: &AssetStore, id: &SetId) -> Option<Self> {
        let set = store.set(id)?;
        Some(Self {
            target: Some(EditTarget::Existing(id.clone())),
            name: set.name.clone(),
            members: set.members.iter().cloned().collect(),
            mode_on_exit: None,
        })
    }

    #[must_use]
    pub fn with_mode_on_exit(mut self, mode: AppMode) -> Self {
        self.mode_on_exit = Some(mode);
        self
    }

    #[must_use]
    pub fn target(&self) -> Option<&EditTarget<SetId>> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self.target, Some(EditTarget::New))
    }

    #[must_use]
    pub fn members(&self) -> &[CardId] {
        &self.members
    }

    #[must_use]
    pub fn mode_on_exit(&self) -> Option<AppMode> {
        self.mode_on_exit
    }

    /// Whether the draft can be saved.
    ///
    /// A new set needs a name. An existing set needs a changed name or
    /// member list.
    #[must_use]
    pub fn can_save(&self, store: &AssetStore) -> bool {
        match &self.target {
            None => false,
            Some(EditTarget::New) => !self.name.is_empty(),
            Some(EditTarget::Existing(id)) => match store.set(id) {
                Some(set) => {
                    set.name != self.name || !set.members.iter().eq(self.members.iter())
                }
                None => false,
            },
        }
    }

    /// The store command that saves this draft, or `None` if not savable.
    #[must_use]
    pub fn command(&self, store: &AssetStore) -> Option<AssetCommand> {
        if !self.can_save(store) {
            return None;
        }
        match self.target.as_ref()? {
            EditTarget::New => Some(AssetCommand::CreateSet {
                name: self.name.clone(),
                members: self.members.clone(),
            }),
            EditTarget::Existing(id) => Some(AssetCommand::UpdateSet {
                id: id.clone(),
                name: self.name.clone(),
                members: self.members.clone(),
            }),
        }
    }

    #[must_use]
    pub fn commit(&self, store: &AssetStore) -> AssetStore {
        match self.command(store) {
            Some(command) => store.apply(&command),
            None => {
                warn!(draft = ?self.target, "save of unsavable set draft ignored");
                store.clone()
            }
        }
    }

    #[must_use]
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Drop a deleted card from the draft's members.
    #[must_use]
    pub fn card_deleted(&self, id: &CardId) -> Self {
        let mut next = self.clone();
        next.members.retain(|member| member != id);
        next
    }

    #[must_use]
    pub fn apply(&self, command: &SetBufferCommand) -> SetBuffer {
        if !self.is_active() {
            warn!(command = ?command, "edit without a set draft ignored");
            return self.clone();
        }
        let mut next = self.clone();
        match command {
            SetBufferCommand::SetName(name) => next.name = name.clone(),
            SetBufferCommand::RemoveMember(card) => next.members.retain(|id| id != card),
        }
        next
    }
}
