//! Filter and bulk edit engine behind the card manager.
//!
//! ## Key Types
//!
//! - `FilterPass`: One include or exclude pass of toggleable predicates
//! - `CardManager`: Selection, both passes and staged bulk edits
//! - `BulkEdit`: Tags and sets staged for the visible cards
//!
//! `visible_card_ids` is a pure function of the store and the manager
//! state; nothing is cached.

pub mod criteria;
pub mod engine;
pub mod bulk;
pub mod manager;

pub use criteria::{FilterMode, FilterPass, TextField};
pub use engine::visible_card_ids;
pub use bulk::{BulkEdit, BulkMode};
pub use manager::{CardManager, CardManagerCommand};
