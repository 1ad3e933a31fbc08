//! Edit buffers: drafts of cards and sets.
//!
//! ## Key Types
//!
//! - `CardBuffer`: Draft card with dirty and validity checks
//! - `SetBuffer`: Draft set with dirty and validity checks
//! - `EditTarget`: Whether a draft creates a new entity or edits a stored one
//!
//! Buffers are working copies. Nothing reaches the store until the buffer
//! is committed, and a committed or cancelled buffer is reset to empty.

pub mod card_buffer;
pub mod set_buffer;

pub use card_buffer::{CardBuffer, CardBufferCommand, CardIssue};
pub use set_buffer::{SetBuffer, SetBufferCommand};

/// What a draft will be saved as.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditTarget<Id> {
    New,
    Existing(Id),
}
