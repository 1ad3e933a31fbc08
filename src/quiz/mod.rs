//! Quiz session engine.
//!
//! ## Key Types
//!
//! - `QuizSession`: The shuffled run, cursor and reveal state
//! - `QuizSelector`: Whether a run was built from a set or a tag
//! - `QuizMode`: Which field is asked
//! - `CardState`: How much of the current card is revealed
//! - `CardFace`: A card's question, hint and answer under a mode
//! - `QuizCommand`: Tagged commands dispatched through `QuizSession::apply`

pub mod mode;
pub mod session;
pub mod face;
pub mod command;

pub use mode::{CardState, QuizMode};
pub use session::{QuizSelector, QuizSession};
pub use face::{CardFace, VocabularyKind};
pub use command::QuizCommand;
