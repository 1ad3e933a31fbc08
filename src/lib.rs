//! # kanji-deck
//!
//! State and derivation engine for a kanji flashcard quiz.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: Every operation takes `&self` and returns
//!    the next value. Unchanged parts are shared, so "nothing happened" is
//!    observable with `AssetStore::ptr_eq`.
//!
//! 2. **Commands as data**: Each subsystem has one reducer over a command
//!    enum. The UI layer only ever builds commands and renders snapshots.
//!
//! 3. **No I/O in the core**: Loading takes raw text, saving returns text.
//!    Local storage and downloads are `Effect`s the transport performs.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so every
//!   command can return a fresh snapshot.
//!
//! - **Ignored, not failed**: A command whose precondition does not hold
//!   leaves the snapshot unchanged and logs a warning. Only the load and
//!   export boundaries return `Error`.
//!
//! ## Modules
//!
//! - `core`: Card, set and tag IDs, the quiz RNG, configuration
//! - `assets`: Cards, sets, tags and the asset store
//! - `quiz`: Quiz sessions, modes and card faces
//! - `editor`: Card and set draft buffers
//! - `filter`: Card manager filters, selection and bulk edits
//! - `persist`: Export document format and load bookkeeping
//! - `app`: Application snapshot and top-level dispatch
//! - `logging`: Subscriber setup for hosts

pub mod core;
pub mod error;
pub mod assets;
pub mod quiz;
pub mod editor;
pub mod filter;
pub mod persist;
pub mod app;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{CardId, SetId, TagId, EngineConfig, QuizRng, QuizRngState};

pub use crate::error::{Error, Result};

pub use crate::assets::{
    AssetStore, AssetCommand, BulkChange, NewCard,
    Card, CardFields, CardSet, Tag,
};

pub use crate::quiz::{CardFace, CardState, QuizCommand, QuizMode, QuizSelector, QuizSession};

pub use crate::editor::{
    CardBuffer, CardBufferCommand, CardIssue,
    EditTarget, SetBuffer, SetBufferCommand,
};

pub use crate::filter::{
    BulkEdit, BulkMode, CardManager, CardManagerCommand,
    FilterMode, FilterPass, TextField,
};

pub use crate::persist::{DataSource, DataState, LoadedData, LoaderState};

pub use crate::app::{AppMode, AppState, Command, Effect, Transition};

pub use crate::logging::{init_logging, LogConfig, LogFormat};
