use crate::cursor::ByteCursor;
use crate::error::WireError;
use crate::format::{Format, Selector};
use crate::nnint::{encode_nnint, read_nnint};

/// The sequence/format/length header in front of every BEJ value.
///
/// ```text
/// ┌───────────────────────────────────────────────────────┐
/// │ seq_sel  (nnint)   bit 0 = selector, bits 1.. = seq   │
/// │ format   (u8)      high nibble = format tag           │
/// │                    low nibble  = value flags          │
/// │ length   (nnint)   payload bytes (scalars)            │
/// └───────────────────────────────────────────────────────┘
/// ```
///
/// For Set and Array the length is present on the wire but the decoder
/// relies on the element count that follows the SFL instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sfl {
    /// Sequence number with the selector bit already shifted out.
    pub sequence: u64,
    pub selector: Selector,
    pub format: Format,
    /// Value-local flags (low nibble of the format byte).
    pub flags: u8,
    pub length: u64,
}

impl Sfl {
    /// Parse an SFL triple and advance past it.
    ///
    /// # Errors
    ///
    /// - [`WireError::Truncated`] if the buffer ends inside the triple.
    /// - [`WireError::BadVarint`] if either nnint is malformed.
    pub fn read_from(cur: &mut ByteCursor<'_>) -> Result<Self, WireError> {
        let seq_sel = read_nnint(cur)?;
        let format_byte = cur.read_u8()?;
        let length = read_nnint(cur)?;

        Ok(Self {
            sequence: seq_sel >> 1,
            selector: Selector::from_bit(seq_sel),
            format: Format::from_nibble(format_byte >> 4),
            flags: format_byte & 0x0F,
            length,
        })
    }

    /// Parse an SFL without consuming it.
    ///
    /// The decoder itself parses once and carries the result forward; this
    /// exists for tools that only want to look at what comes next.
    ///
    /// # Errors
    ///
    /// Same as [`read_from`](Self::read_from). The cursor is restored
    /// whether or not the parse succeeds.
    pub fn peek(cur: &mut ByteCursor<'_>) -> Result<Self, WireError> {
        let mark = cur.save();
        let result = Self::read_from(cur);
        cur.restore(mark);
        result
    }

    /// The sequence number as a dictionary key, if it fits in 16 bits.
    ///
    /// Dictionary sequence numbers are `u16`; anything wider cannot match
    /// an entry.
    pub fn dictionary_sequence(&self) -> Option<u16> {
        u16::try_from(self.sequence).ok()
    }

    /// Append this SFL to `buf` using shortest nnint encodings.
    ///
    /// Only fixture builders and tests write SFLs; there is no encoder.
    pub fn write_to(&self, buf: &mut Vec<u8>) -> usize {
        let start = buf.len();
        encode_nnint((self.sequence << 1) | self.selector.bit(), buf);
        buf.push((self.format.nibble() << 4) | (self.flags & 0x0F));
        encode_nnint(self.length, buf);
        buf.len() - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_boolean() {
        // seq 0 major, format boolean (0x7), length 1
        let bytes = [0x01, 0x00, 0x70, 0x01, 0x01];
        let mut cur = ByteCursor::new(&bytes);
        let sfl = Sfl::read_from(&mut cur).unwrap();
        assert_eq!(sfl.sequence, 0);
        assert_eq!(sfl.selector, Selector::Major);
        assert_eq!(sfl.format, Format::Boolean);
        assert_eq!(sfl.flags, 0);
        assert_eq!(sfl.length, 1);
        assert_eq!(cur.position(), bytes.len());
    }

    #[test]
    fn splits_selector_and_flags() {
        // seq_sel = 7 → seq 3, annotation; format byte 0x5A → string, flags 0xA
        let bytes = [0x01, 0x07, 0x5A, 0x00];
        let sfl = Sfl::read_from(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(sfl.sequence, 3);
        assert_eq!(sfl.selector, Selector::Annotation);
        assert_eq!(sfl.format, Format::String);
        assert_eq!(sfl.flags, 0x0A);
        assert_eq!(sfl.length, 0);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut buf = Vec::new();
        let sfl = Sfl {
            sequence: 12,
            selector: Selector::Major,
            format: Format::Integer,
            flags: 0,
            length: 2,
        };
        sfl.write_to(&mut buf);
        let mut cur = ByteCursor::new(&buf);
        assert_eq!(Sfl::peek(&mut cur).unwrap(), sfl);
        assert_eq!(cur.position(), 0);
        assert_eq!(Sfl::read_from(&mut cur).unwrap(), sfl);
        assert!(cur.is_empty());
    }

    #[test]
    fn peek_restores_on_error() {
        let mut cur = ByteCursor::new(&[0x01, 0x02]);
        assert!(Sfl::peek(&mut cur).is_err());
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn wide_sequence_has_no_dictionary_key() {
        let sfl = Sfl {
            sequence: 70_000,
            selector: Selector::Major,
            format: Format::Null,
            flags: 0,
            length: 0,
        };
        assert_eq!(sfl.dictionary_sequence(), None);
        assert_eq!(Sfl { sequence: 5, ..sfl }.dictionary_sequence(), Some(5));
    }
}
