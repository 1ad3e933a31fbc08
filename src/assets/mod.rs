//! Asset store: cards, sets and tags.
//!
//! ## Key Types
//!
//! - `Card`: A quizzable character with meaning, hint, readings and tags
//! - `CardSet`: A named group of cards used to scope a quiz
//! - `Tag`: A lower-cased label attachable to many cards
//! - `AssetStore`: Immutable, normalized collections of the above
//! - `AssetCommand`: Tagged commands dispatched through `AssetStore::apply`

pub mod card;
pub mod set;
pub mod store;
pub mod command;

pub use card::{Card, CardFields};
pub use set::{CardSet, Tag};
pub use store::AssetStore;
pub use command::{AssetCommand, BulkChange, NewCard};
