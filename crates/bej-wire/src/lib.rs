#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod format;
pub mod header;
pub mod nnint;
pub mod sfl;

pub use cursor::ByteCursor;
pub use error::WireError;
pub use format::{Format, Selector};
pub use header::{BejHeader, SchemaClass};
pub use sfl::Sfl;
