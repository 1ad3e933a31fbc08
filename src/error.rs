//! Error types.
//!
//! Only the load, export and logging boundaries can fail. Commands applied to
//! a snapshot never return errors: a command whose precondition does not hold
//! is ignored and logged (see `assets::store`).

use thiserror::Error;

use crate::persist::DataSource;

/// Errors surfaced by the import/export boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport had nothing to hand over (e.g. empty local storage).
    #[error("no data available from {origin}")]
    MissingData { origin: DataSource },

    /// The raw text is not parseable JSON.
    #[error("malformed input from {origin}: {source}")]
    MalformedInput {
        origin: DataSource,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parsed but does not describe a valid asset store.
    #[error("invalid asset data from {origin}: {reason}")]
    InvalidAsset { origin: DataSource, reason: String },

    /// Encoding the store failed.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    /// The data source a load error refers to, if any.
    #[must_use]
    pub fn origin(&self) -> Option<DataSource> {
        match self {
            Error::MissingData { origin }
            | Error::MalformedInput { origin, .. }
            | Error::InvalidAsset { origin, .. } => Some(*origin),
            Error::Serialize(_) | Error::Logging(_) => None,
        }
    }

    /// Whether this is one of the "data bad" load failures.
    #[must_use]
    pub fn is_data_bad(&self) -> bool {
        self.origin().is_some()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
