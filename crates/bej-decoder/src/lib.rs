#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod json;
pub mod scalar;

pub use config::DecoderConfig;
pub use decoder::{BejDecoder, DecodeOutcome, decode_to_json};
pub use error::DecodeError;
