/// Byte-level failures while reading BEJ wire primitives.
///
/// Every variant that comes out of a read carries the cursor offset at
/// which the problem was detected, so a hex dump of the payload is enough
/// to locate it.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A read needed more bytes than the buffer has left.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// An nnint length byte was outside 0..=8.
    #[error("bad nnint at offset {offset}: length byte {length} exceeds 8")]
    BadVarint { offset: usize, length: u8 },

    /// The document header's schema class byte was neither major (0x00)
    /// nor annotation (0x01).
    #[error("unknown schema class {value:#04X}, expected 0x00 or 0x01")]
    UnknownSchemaClass { value: u8 },
}

// Offsets are always absolute positions in the buffer the cursor was
// created over, never relative to the current value.
