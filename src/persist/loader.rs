//! Load bookkeeping: where data came from and whether it was usable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where raw data was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// A file the user picked.
    File,
    /// The browser's local storage.
    Local,
    /// A bundled deck fetched over the network.
    Remote,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataSource::File => "file",
            DataSource::Local => "local",
            DataSource::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// Whether any deck has been loaded yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataState {
    /// Nothing attempted yet.
    #[default]
    Uninitialized,
    /// A load was attempted and failed, nothing is loaded.
    NoData,
    DataLoaded,
}

/// State of the load panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderState {
    pub data_state: DataState,
    pub local_storage_is_bad: bool,
    pub file_selected: bool,
    pub selected_file_is_bad: bool,
    /// Base name offered for exports.
    pub current_file_name: String,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self::new("Quiz")
    }
}

impl LoaderState {
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            data_state: DataState::Uninitialized,
            local_storage_is_bad: false,
            file_selected: false,
            selected_file_is_bad: false,
            current_file_name: file_name.into(),
        }
    }

    /// Record a failed load.
    ///
    /// A first failure moves `Uninitialized` to `NoData`; data that was
    /// already loaded stays loaded.
    #[must_use]
    pub fn data_bad(&self, origin: DataSource) -> Self {
        let mut next = self.clone();
        if next.data_state == DataState::Uninitialized {
            next.data_state = DataState::NoData;
        }
        match origin {
            DataSource::File => next.selected_file_is_bad = true,
            DataSource::Local => next.local_storage_is_bad = true,
            DataSource::Remote => {}
        }
        next
    }

    #[must_use]
    pub fn data_loaded(&self) -> Self {
        Self {
            data_state: DataState::DataLoaded,
            ..self.clone()
        }
    }

    /// A new file choice clears the "bad file" marker.
    #[must_use]
    pub fn file_selection_changed(&self, selected: bool) -> Self {
        Self {
            file_selected: selected,
            selected_file_is_bad: false,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data_state == DataState::DataLoaded
    }
}
