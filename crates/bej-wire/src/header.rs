use crate::cursor::ByteCursor;
use crate::error::WireError;

/// Size of the fixed BEJ document header in bytes.
pub const HEADER_SIZE: usize = 7;

/// Which dictionary the root value of a payload is encoded against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaClass {
    Major,
    Annotation,
}

impl SchemaClass {
    /// # Errors
    ///
    /// Returns [`WireError::UnknownSchemaClass`] for anything but 0 or 1.
    pub fn from_raw(raw: u8) -> Result<Self, WireError> {
        match raw {
            0x00 => Ok(Self::Major),
            0x01 => Ok(Self::Annotation),
            value => Err(WireError::UnknownSchemaClass { value }),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Major => 0x00,
            Self::Annotation => 0x01,
        }
    }
}

/// BEJ document header: the first 7 bytes of every payload.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Version (opaque, not checked)    │
/// │ 0x04   │ 2 bytes │ Flags (opaque, not checked)      │
/// │ 0x06   │ 1 byte  │ Schema class: 0x00 or 0x01       │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BejHeader {
    pub version: [u8; 4],
    pub flags: [u8; 2],
    pub schema_class: SchemaClass,
}

impl BejHeader {
    /// Parse the header from the front of the cursor.
    ///
    /// # Errors
    ///
    /// - [`WireError::Truncated`] if fewer than 7 bytes are available.
    /// - [`WireError::UnknownSchemaClass`] if byte 6 is not 0 or 1.
    pub fn read_from(cur: &mut ByteCursor<'_>) -> Result<Self, WireError> {
        let version = cur.read_array::<4>()?;
        let flags = cur.read_array::<2>()?;
        let schema_class = SchemaClass::from_raw(cur.read_u8()?)?;
        Ok(Self {
            version,
            flags,
            schema_class,
        })
    }

    /// Append the 7 header bytes to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.version);
        buf.extend_from_slice(&self.flags);
        buf.push(self.schema_class.raw());
    }
}

impl Default for BejHeader {
    fn default() -> Self {
        Self {
            version: [0; 4],
            flags: [0; 2],
            schema_class: SchemaClass::Major,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_zero_header() {
        let mut cur = ByteCursor::new(&[0u8; HEADER_SIZE]);
        let header = BejHeader::read_from(&mut cur).unwrap();
        assert_eq!(header, BejHeader::default());
        assert_eq!(cur.position(), HEADER_SIZE);
    }

    #[test]
    fn keeps_version_and_flags_verbatim() {
        let bytes = [0x00, 0xF0, 0xF1, 0xF1, 0x01, 0x02, 0x01];
        let header = BejHeader::read_from(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(header.version, [0x00, 0xF0, 0xF1, 0xF1]);
        assert_eq!(header.flags, [0x01, 0x02]);
        assert_eq!(header.schema_class, SchemaClass::Annotation);

        let mut out = Vec::new();
        header.write_to(&mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn rejects_unknown_schema_class() {
        let bytes = [0, 0, 0, 0, 0, 0, 0x02];
        let result = BejHeader::read_from(&mut ByteCursor::new(&bytes));
        assert!(matches!(
            result,
            Err(WireError::UnknownSchemaClass { value: 0x02 })
        ));
    }

    #[test]
    fn rejects_short_header() {
        let result = BejHeader::read_from(&mut ByteCursor::new(&[0u8; 5]));
        assert!(matches!(result, Err(WireError::Truncated { .. })));
    }
}
