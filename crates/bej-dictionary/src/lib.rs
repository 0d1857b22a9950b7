#![warn(clippy::pedantic)]

pub mod dictionary;
pub mod entry;
pub mod error;
pub mod header;

pub use dictionary::{Dictionary, EntryRef, Subset, WalkSummary};
pub use entry::{ChildRange, DictionaryEntry};
pub use error::DictionaryError;
pub use header::DictionaryHeader;
