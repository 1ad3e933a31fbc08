//! Serialization layer and load bookkeeping.
//!
//! The core performs no I/O. The transport hands `deserialize` whatever text
//! it read and writes out whatever `serialize` returns.

pub mod record;
pub mod codec;
pub mod loader;

pub use codec::{deserialize, serialize, to_document, LoadedData};
pub use loader::{DataSource, DataState, LoaderState};
pub use record::DocumentRecord;
