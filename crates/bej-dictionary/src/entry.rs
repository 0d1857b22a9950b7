use std::ops::Range;

use bej_wire::Format;

use crate::error::DictionaryError;
use crate::header::{ENTRY_SIZE, HEADER_SIZE};

/// Contiguous run of child entries inside the dictionary's entry array.
///
/// The file stores a byte offset to the first child record; the loader
/// turns that into an index so navigation never touches raw offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildRange {
    pub first: usize,
    pub count: usize,
}

impl ChildRange {
    pub fn indices(self) -> Range<usize> {
        self.first..self.first + self.count
    }
}

/// One schema node, as loaded from a 10-byte record.
///
/// ```text
/// ┌────────┬─────────┬───────────────────────────────────────────┐
/// │ Offset │ Size    │ Field                                     │
/// ├────────┼─────────┼───────────────────────────────────────────┤
/// │ 0x00   │ 1 byte  │ format (high nibble) │ flags (low nibble) │
/// │ 0x01   │ 2 bytes │ sequence                                  │
/// │ 0x03   │ 2 bytes │ child_pointer (absolute byte offset, 0)   │
/// │ 0x05   │ 2 bytes │ child_count                               │
/// │ 0x07   │ 1 byte  │ name_len                                  │
/// │ 0x08   │ 2 bytes │ name_offset   (absolute byte offset, 0)   │
/// └────────┴─────────┴───────────────────────────────────────────┘
/// ```
///
/// The name is not stored here as a string. The entry keeps the location
/// of the name inside the dictionary buffer and
/// [`EntryRef::name`](crate::EntryRef::name) hands out a borrow of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub format: Format,
    /// Opaque pass-through bits, never interpreted by the decoder.
    pub flags: u8,
    pub sequence: u16,
    pub children: Option<ChildRange>,
    pub(crate) name: Option<Range<usize>>,
}

impl DictionaryEntry {
    /// Parse entry `index` from the full dictionary buffer.
    ///
    /// The caller has already checked that the entry table fits in `buf`.
    pub(crate) fn parse(
        buf: &[u8],
        index: usize,
        entry_count: u16,
    ) -> Result<Self, DictionaryError> {
        let at = HEADER_SIZE + index * ENTRY_SIZE;
        let rec = &buf[at..at + ENTRY_SIZE];

        let child_pointer = u16::from_le_bytes([rec[3], rec[4]]);
        let child_count = u16::from_le_bytes([rec[5], rec[6]]);
        let name_len = rec[7];
        let name_offset = u16::from_le_bytes([rec[8], rec[9]]);

        Ok(Self {
            format: Format::from_nibble(rec[0] >> 4),
            flags: rec[0] & 0x0F,
            sequence: u16::from_le_bytes([rec[1], rec[2]]),
            children: resolve_children(index, child_pointer, child_count, entry_count)?,
            name: resolve_name(buf, index, name_offset, name_len)?,
        })
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }
}

fn resolve_children(
    entry: usize,
    pointer: u16,
    count: u16,
    entry_count: u16,
) -> Result<Option<ChildRange>, DictionaryError> {
    if pointer == 0 {
        return Ok(None);
    }

    let rel = usize::from(pointer)
        .checked_sub(HEADER_SIZE)
        .filter(|rel| rel % ENTRY_SIZE == 0)
        .ok_or(DictionaryError::ChildPointerMisaligned { entry, pointer })?;

    let first = rel / ENTRY_SIZE;
    if first + usize::from(count) > usize::from(entry_count) {
        return Err(DictionaryError::ChildRangeOutOfBounds {
            entry,
            first,
            count,
            entry_count,
        });
    }

    Ok(Some(ChildRange {
        first,
        count: usize::from(count),
    }))
}

// Names are stored NUL-terminated with the terminator counted in name_len.
// The window is validated against the buffer, the terminator is dropped,
// and an empty result means the entry is anonymous.
fn resolve_name(
    buf: &[u8],
    entry: usize,
    offset: u16,
    len: u8,
) -> Result<Option<Range<usize>>, DictionaryError> {
    if offset == 0 || len == 0 {
        return Ok(None);
    }

    let start = usize::from(offset);
    let end = start + usize::from(len);
    let window = buf.get(start..end).ok_or(DictionaryError::NameOutOfBounds {
        entry,
        offset,
        len,
        size: buf.len(),
    })?;

    let trimmed = window.len() - window.iter().rev().take_while(|&&b| b == 0).count();
    if trimmed == 0 {
        return Ok(None);
    }
    if std::str::from_utf8(&window[..trimmed]).is_err() {
        return Err(DictionaryError::NameNotUtf8 { entry });
    }

    Ok(Some(start..start + trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pointer_means_no_children() {
        assert_eq!(resolve_children(0, 0, 5, 10).unwrap(), None);
    }

    #[test]
    fn pointer_converts_to_index() {
        // third record starts at 12 + 2 * 10
        let range = resolve_children(0, 32, 3, 5).unwrap().unwrap();
        assert_eq!(range, ChildRange { first: 2, count: 3 });
        assert_eq!(range.indices(), 2..5);
    }

    #[test]
    fn misaligned_pointer_rejected() {
        assert!(matches!(
            resolve_children(4, 33, 1, 10),
            Err(DictionaryError::ChildPointerMisaligned {
                entry: 4,
                pointer: 33
            })
        ));
        // inside the header
        assert!(matches!(
            resolve_children(0, 2, 1, 10),
            Err(DictionaryError::ChildPointerMisaligned { .. })
        ));
    }

    #[test]
    fn range_past_table_rejected() {
        assert!(matches!(
            resolve_children(1, 32, 4, 5),
            Err(DictionaryError::ChildRangeOutOfBounds {
                first: 2,
                count: 4,
                ..
            })
        ));
    }

    #[test]
    fn name_terminator_stripped() {
        let buf = b"xxxxName\0";
        assert_eq!(resolve_name(buf, 0, 4, 5).unwrap(), Some(4..8));
    }

    #[test]
    fn empty_or_absent_name_is_anonymous() {
        let buf = b"xxxx\0\0";
        assert_eq!(resolve_name(buf, 0, 4, 2).unwrap(), None);
        assert_eq!(resolve_name(buf, 0, 0, 2).unwrap(), None);
        assert_eq!(resolve_name(buf, 0, 4, 0).unwrap(), None);
    }

    #[test]
    fn name_past_buffer_rejected() {
        let buf = b"xxxxName";
        assert!(matches!(
            resolve_name(buf, 3, 6, 5),
            Err(DictionaryError::NameOutOfBounds { entry: 3, .. })
        ));
    }

    #[test]
    fn name_must_be_utf8() {
        let buf = [b'x', 0xFF, 0xFE, 0];
        assert!(matches!(
            resolve_name(&buf, 1, 1, 3),
            Err(DictionaryError::NameNotUtf8 { entry: 1 })
        ));
    }
}
