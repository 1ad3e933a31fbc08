//! Application layer: the snapshot the UI renders and the reducer it feeds.
//!
//! ## Key Types
//!
//! - `AppState`: Store, quiz, editors, card manager and loader in one value
//! - `AppMode`: Which screen is active
//! - `Command`: Every UI event, dispatched through `AppState::dispatch`
//! - `Effect`: Persistence work handed back to the transport

pub mod mode;
pub mod state;
pub mod command;

pub use mode::AppMode;
pub use state::AppState;
pub use command::{Command, Effect, Transition};
