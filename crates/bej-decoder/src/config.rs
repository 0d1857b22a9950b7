/// Decoder settings.
///
/// ```text
/// ┌────────────────────────┬─────────┬─────────────────────────────────────────────┐
/// │ Field                  │ Default │ Purpose                                     │
/// ├────────────────────────┼─────────┼─────────────────────────────────────────────┤
/// │ max_depth              │ 64      │ Deepest Set/Array nesting accepted          │
/// │ indent                 │ 2       │ Spaces per nesting level in the JSON output │
/// │ max_real_leading_zeros │ 1024    │ Longest zero run accepted in a Real         │
/// └────────────────────────┴─────────┴─────────────────────────────────────────────┘
/// ```
///
/// The depth limit turns hostile or corrupt payloads into a clean
/// [`DecodeError::DepthExceeded`](crate::DecodeError::DepthExceeded)
/// instead of a stack overflow. The leading-zero limit bounds the output a
/// single Real can produce: the count is an nnint, so eight bytes of input
/// could otherwise ask for 2^64 zeros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_depth: usize,
    pub indent: usize,
    pub max_real_leading_zeros: u64,
}

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Real leading-zero limit used when none is configured.
pub const DEFAULT_MAX_REAL_LEADING_ZEROS: u64 = 1024;

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            indent: 2,
            max_real_leading_zeros: DEFAULT_MAX_REAL_LEADING_ZEROS,
        }
    }
}
