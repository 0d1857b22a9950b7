use bej_wire::{Format, WireError};

/// Errors that can occur while decoding a BEJ payload to JSON.
///
/// Byte-level problems (truncation, bad nnint, bad schema class) come up
/// from `bej-wire` unchanged inside [`DecodeError::Wire`]. Everything else
/// is about what the bytes *mean*.
///
/// ```text
///   DecodeError
///   ├── Wire(WireError)        ← Truncated, BadVarint, UnknownSchemaClass
///   ├── UnsupportedFormat      ← Choice, ResourceLink, PropertyAnnotation, unknown tag
///   ├── AnnotationEncountered  ← annotation value outside a set member
///   ├── LengthMismatch         ← Real did not consume its declared length
///   ├── InvalidScalar          ← wrong length for Integer/Boolean/String/Real
///   ├── DepthExceeded          ← nesting deeper than the configured limit
///   └── Io(std::io::Error)     ← the output sink failed
/// ```
///
/// Missing schema information is *not* an error: unresolved names degrade
/// to `"_<seq>"` keys and unresolved enum variants to their index.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A value used a format tag the decoder does not implement.
    #[error("unsupported format {format} at offset {offset}")]
    UnsupportedFormat { format: Format, offset: usize },

    /// A value tagged with the annotation selector was reached somewhere
    /// other than as a set member, where it would have been skipped.
    ///
    /// Kept apart from malformed-data errors: the payload may be fine, the
    /// decoder just has no annotation dictionary.
    #[error("annotation value (sequence {sequence}) at offset {offset} cannot be decoded")]
    AnnotationEncountered { sequence: u64, offset: usize },

    /// A Real's self-describing length did not match what its fields used.
    #[error("real at offset {offset} declared {declared} bytes but consumed {consumed}")]
    LengthMismatch {
        offset: usize,
        declared: u64,
        consumed: usize,
    },

    #[error("invalid {format} at offset {offset}: {reason} (length {length})")]
    InvalidScalar {
        format: Format,
        offset: usize,
        length: u64,
        reason: &'static str,
    },

    #[error("nesting exceeds maximum depth {limit} at offset {offset}")]
    DepthExceeded { limit: usize, offset: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
