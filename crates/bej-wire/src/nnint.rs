use crate::cursor::ByteCursor;
use crate::error::WireError;

/// Largest number of value bytes an nnint may carry.
pub const MAX_NNINT_BYTES: u8 = 8;

// An nnint is BEJ's "non-negative integer": a single count byte followed by
// that many value bytes, least significant first.
//
//   [0x00]             → 0
//   [0x01, 0x41]       → 65
//   [0x02, 0x39, 0x05] → 0x0539 = 1337
//
// Unlike LEB128 there is no continuation bit. The count byte says up front
// how much to read, which makes bounds checking a single comparison.

/// Read an nnint from the cursor.
///
/// # Errors
///
/// - [`WireError::BadVarint`] if the count byte is greater than 8.
/// - [`WireError::Truncated`] if the value bytes run past the end.
pub fn read_nnint(cur: &mut ByteCursor<'_>) -> Result<u64, WireError> {
    let bytes = read_value_bytes(cur)?;
    Ok(bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Read an nnint-framed *signed* value: same framing as [`read_nnint`],
/// but the value bytes are two's complement and sign-extended.
///
/// Used by the whole part and exponent of a Real.
///
/// # Errors
///
/// Same as [`read_nnint`].
pub fn read_signed_nnint(cur: &mut ByteCursor<'_>) -> Result<i64, WireError> {
    let bytes = read_value_bytes(cur)?;
    Ok(sign_extend_le(bytes))
}

fn read_value_bytes<'a>(cur: &mut ByteCursor<'a>) -> Result<&'a [u8], WireError> {
    let offset = cur.position();
    let count = cur.read_u8()?;
    if count > MAX_NNINT_BYTES {
        return Err(WireError::BadVarint {
            offset,
            length: count,
        });
    }
    cur.read(usize::from(count))
}

/// Interpret up to 8 little-endian bytes as a two's complement `i64`.
///
/// When fewer than 8 bytes are given and the top bit of the last (most
/// significant) byte is set, the missing high bytes are filled with `0xFF`.
/// An empty slice is 0.
///
/// ```text
///   [0xFF]       → -1
///   [0xFF, 0x7F] → 32767
///   [0x80]       → -128
/// ```
pub fn sign_extend_le(bytes: &[u8]) -> i64 {
    debug_assert!(bytes.len() <= 8);
    let mut raw = [0u8; 8];
    raw[..bytes.len()].copy_from_slice(bytes);
    if let Some(&msb) = bytes.last()
        && msb & 0x80 != 0
    {
        raw[bytes.len()..].fill(0xFF);
    }
    i64::from_le_bytes(raw)
}

/// Append the shortest nnint encoding of `value` to `buf`.
///
/// Zero encodes as a bare `0x00` count byte. Returns the number of bytes
/// written (1–9).
pub fn encode_nnint(value: u64, buf: &mut Vec<u8>) -> usize {
    let width = 8 - (value.leading_zeros() / 8) as usize;
    buf.push(width as u8);
    buf.extend_from_slice(&value.to_le_bytes()[..width]);
    width + 1
}

/// Shortest little-endian two's complement form of `value`, at least one
/// byte long. Returns the backing array and the number of bytes used.
pub fn signed_le_bytes(value: i64) -> ([u8; 8], usize) {
    let raw = value.to_le_bytes();
    let width = (1..=8)
        .find(|&n| sign_extend_le(&raw[..n]) == value)
        .unwrap_or(8);
    (raw, width)
}

/// Append an nnint-framed signed value (count byte + two's complement
/// bytes) to `buf`. Returns the number of bytes written.
pub fn encode_signed_nnint(value: i64, buf: &mut Vec<u8>) -> usize {
    let (raw, width) = signed_le_bytes(value);
    buf.push(width as u8);
    buf.extend_from_slice(&raw[..width]);
    width + 1
}
