use crate::error::DictionaryError;

/// Size of the dictionary header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Size of one entry record in bytes.
pub const ENTRY_SIZE: usize = 10;

/// The fixed header at the start of every schema dictionary.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Field                            │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 1 byte  │ version_tag                      │
/// │ 0x01   │ 1 byte  │ dict_flags                       │
/// │ 0x02   │ 2 bytes │ entry_count   (LE)               │
/// │ 0x04   │ 4 bytes │ schema_version (LE)              │
/// │ 0x08   │ 4 bytes │ dict_size     (LE)               │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DictionaryHeader {
    pub version_tag: u8,
    pub flags: u8,
    pub entry_count: u16,
    pub schema_version: u32,
    /// Size the producer declared. Recorded, not enforced.
    pub dict_size: u32,
}

impl DictionaryHeader {
    /// # Errors
    ///
    /// Returns [`DictionaryError::TooShort`] if `buf` is under 12 bytes.
    pub fn read_from(buf: &[u8]) -> Result<Self, DictionaryError> {
        if buf.len() < HEADER_SIZE {
            return Err(DictionaryError::TooShort { len: buf.len() });
        }
        Ok(Self {
            version_tag: buf[0],
            flags: buf[1],
            entry_count: u16::from_le_bytes([buf[2], buf[3]]),
            schema_version: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            dict_size: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }

    /// Bytes occupied by the header plus the whole entry table.
    pub fn table_end(&self) -> usize {
        HEADER_SIZE + usize::from(self.entry_count) * ENTRY_SIZE
    }
}
