//! Core building blocks: identifiers, RNG, configuration.
//!
//! Everything above this layer (store, quiz, editors, filters) works in
//! terms of these types.

pub mod ids;
pub mod rng;
pub mod config;

pub use ids::{CardId, SetId, TagId};
pub use rng::{QuizRng, QuizRngState};
pub use config::EngineConfig;
