use std::borrow::Cow;
use std::fmt;

use bej_wire::nnint::{read_nnint, read_signed_nnint, sign_extend_le};
use bej_wire::{ByteCursor, Format, WireError};

use crate::error::DecodeError;

/// Largest String payload accepted (2^31 bytes).
pub const MAX_STRING_LEN: u64 = 1 << 31;

fn invalid(format: Format, cur: &ByteCursor<'_>, length: u64, reason: &'static str) -> DecodeError {
    DecodeError::InvalidScalar {
        format,
        offset: cur.position(),
        length,
        reason,
    }
}

/// Integer: 1–8 little-endian two's complement bytes.
///
/// # Errors
///
/// [`DecodeError::InvalidScalar`] for length 0 or above 8; truncation from
/// the cursor.
pub fn decode_integer(cur: &mut ByteCursor<'_>, length: u64) -> Result<i64, DecodeError> {
    if !(1..=8).contains(&length) {
        return Err(invalid(Format::Integer, cur, length, "length must be 1..=8"));
    }
    let bytes = cur.read(length as usize)?;
    Ok(sign_extend_le(bytes))
}

/// Boolean: exactly one byte, zero is false and anything else true.
///
/// # Errors
///
/// [`DecodeError::InvalidScalar`] unless the length is exactly 1.
pub fn decode_boolean(cur: &mut ByteCursor<'_>, length: u64) -> Result<bool, DecodeError> {
    if length != 1 {
        return Err(invalid(Format::Boolean, cur, length, "length must be 1"));
    }
    Ok(cur.read_u8()? != 0)
}

/// String: `length` raw bytes with an optional trailing NUL.
///
/// Bytes that are not UTF-8 are replaced with U+FFFD so the emitted JSON
/// is always valid UTF-8.
///
/// # Errors
///
/// [`DecodeError::InvalidScalar`] for length 0 or above 2^31.
pub fn decode_string<'a>(
    cur: &mut ByteCursor<'a>,
    length: u64,
) -> Result<Cow<'a, str>, DecodeError> {
    if length == 0 || length > MAX_STRING_LEN {
        return Err(invalid(Format::String, cur, length, "length must be 1..=2^31"));
    }
    let mut bytes = cur.read(length as usize)?;
    if let [rest @ .., 0] = bytes {
        bytes = rest;
    }
    Ok(String::from_utf8_lossy(bytes))
}

/// Null: the payload is consumed and ignored.
///
/// # Errors
///
/// Truncation if fewer than `length` bytes remain.
pub fn skip_null(cur: &mut ByteCursor<'_>, length: u64) -> Result<(), DecodeError> {
    cur.skip(length)?;
    Ok(())
}

/// A Real decomposed into its wire fields.
///
/// Rendered symbolically, never through `f64`, so the digits on the wire
/// are exactly the digits in the output:
///
/// ```text
///   whole=3 leading_zeros=0 fraction=14159 exponent=0  → 3.14159
///   whole=-2 leading_zeros=2 fraction=5 exponent=-3    → -2.005e-3
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Real {
    pub whole: i64,
    pub leading_zeros: u64,
    pub fraction: u64,
    pub exponent: i64,
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.", self.whole)?;
        for _ in 0..self.leading_zeros {
            f.write_str("0")?;
        }
        write!(f, "{}", self.fraction)?;
        if self.exponent != 0 {
            write!(f, "e{}", self.exponent)?;
        }
        Ok(())
    }
}

/// Real: signed whole part, leading-zero count, fraction, signed exponent,
/// all nnint framed, and together exactly `length` bytes long.
///
/// The declared window is taken from `cur` first and the fields are read
/// inside it, so a Real whose fields need more or fewer bytes than it
/// declares is always a length mismatch, wherever it sits in the payload.
///
/// # Errors
///
/// - [`DecodeError::LengthMismatch`] if the fields do not use exactly
///   `length` bytes. When they run past the window, `consumed` is the
///   least number of bytes they would have needed.
/// - [`DecodeError::InvalidScalar`] if the leading-zero count is above
///   `max_leading_zeros`.
/// - Truncation if fewer than `length` bytes remain; bad nnints inside
///   the window.
pub fn decode_real(
    cur: &mut ByteCursor<'_>,
    length: u64,
    max_leading_zeros: u64,
) -> Result<Real, DecodeError> {
    let start = cur.position();
    let window = cur.read(usize::try_from(length).unwrap_or(usize::MAX))?;
    let mut fields = ByteCursor::new(window);

    // Offsets inside `fields` are relative to the window.
    let in_window = |e: WireError| match e {
        WireError::Truncated { offset, needed, .. } => DecodeError::LengthMismatch {
            offset: start,
            declared: length,
            consumed: offset + needed,
        },
        WireError::BadVarint {
            offset,
            length: count,
        } => DecodeError::Wire(WireError::BadVarint {
            offset: start + offset,
            length: count,
        }),
        other => DecodeError::Wire(other),
    };

    let whole = read_signed_nnint(&mut fields).map_err(in_window)?;
    let leading_zeros = read_nnint(&mut fields).map_err(in_window)?;
    if leading_zeros > max_leading_zeros {
        return Err(DecodeError::InvalidScalar {
            format: Format::Real,
            offset: start,
            length,
            reason: "too many leading zeros",
        });
    }
    let fraction = read_nnint(&mut fields).map_err(in_window)?;
    let exponent = read_signed_nnint(&mut fields).map_err(in_window)?;

    if !fields.is_empty() {
        return Err(DecodeError::LengthMismatch {
            offset: start,
            declared: length,
            consumed: fields.position(),
        });
    }

    Ok(Real {
        whole,
        leading_zeros,
        fraction,
        exponent,
    })
}
