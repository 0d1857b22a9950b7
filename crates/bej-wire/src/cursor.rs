use crate::error::WireError;

/// Bounds-checked sequential reader over an immutable byte slice.
///
/// The cursor never owns the data. It only tracks a read position, and
/// every read is checked against the bytes that remain, so a length taken
/// from the wire can never index past the end of the buffer.
///
/// ```text
///   buf:  [ 00 00 00 00 | 00 00 | 00 | 00 00 01 01 00 ... ]
///                                      ^
///                                      pos
/// ```
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

/// A saved cursor position, produced by [`ByteCursor::save`].
///
/// Marks are plain positions; restoring one only rewinds (or advances) the
/// read position of the cursor it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(usize);

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn save(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn restore(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Read exactly `n` bytes and advance past them.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Truncated`] if fewer than `n` bytes remain. The
    /// position is left unchanged on failure.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(WireError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read a fixed-size array, e.g. the 4 version bytes of a header.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Truncated`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Read a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Truncated`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read(1)?[0])
    }

    /// Skip `len` bytes whose length came off the wire.
    ///
    /// Takes a `u64` so callers can pass SFL lengths straight through; a
    /// length that does not fit in `usize` is reported as truncation.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Truncated`] if the skip would run past the end.
    pub fn skip(&mut self, len: u64) -> Result<(), WireError> {
        let n = usize::try_from(len).map_err(|_| WireError::Truncated {
            offset: self.pos,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        self.read(n).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let mut cur = ByteCursor::new(&[1, 2, 3, 4]);
        assert_eq!(cur.read(2).unwrap(), &[1, 2]);
        assert_eq!(cur.position(), 2);
        assert_eq!(cur.read_u8().unwrap(), 3);
        assert_eq!(cur.remaining(), 1);
    }

    #[test]
    fn read_past_end_is_truncated_and_does_not_move() {
        let mut cur = ByteCursor::new(&[1, 2, 3]);
        cur.read_u8().unwrap();
        let err = cur.read(5).unwrap_err();
        assert!(matches!(
            err,
            WireError::Truncated {
                offset: 1,
                needed: 5,
                available: 2
            }
        ));
        assert_eq!(cur.position(), 1);
    }

    #[test]
    fn save_and_restore_rewinds() {
        let mut cur = ByteCursor::new(&[9, 8, 7]);
        let mark = cur.save();
        cur.read(2).unwrap();
        cur.restore(mark);
        assert_eq!(cur.read_u8().unwrap(), 9);
    }

    #[test]
    fn read_array_copies_bytes() {
        let mut cur = ByteCursor::new(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01]);
        let arr: [u8; 4] = cur.read_array().unwrap();
        assert_eq!(arr, [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(cur.remaining(), 1);
    }

    #[test]
    fn skip_huge_length_is_truncated() {
        let mut cur = ByteCursor::new(&[0; 4]);
        assert!(matches!(
            cur.skip(u64::MAX),
            Err(WireError::Truncated { .. })
        ));
        cur.skip(4).unwrap();
        assert!(cur.is_empty());
    }
}
