/// Reasons a schema dictionary is rejected at load time.
///
/// Every variant means the same thing to a caller: the dictionary is
/// corrupt and nothing was loaded. The variants only exist so the message
/// can say *where*.
///
/// ```text
///   DictionaryError
///   ├── TooShort               ← buffer smaller than the 12-byte header
///   ├── NoEntries              ← entry_count is zero, no root entry
///   ├── TableTruncated         ← entry table runs past the buffer
///   ├── ChildPointerMisaligned ← pointer not on an entry record boundary
///   ├── ChildRangeOutOfBounds  ← children extend past the entry table
///   ├── NameOutOfBounds        ← name window runs past the buffer
///   └── NameNotUtf8            ← name bytes are not UTF-8
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("corrupt dictionary: {len} bytes is smaller than the 12-byte header")]
    TooShort { len: usize },

    #[error("corrupt dictionary: entry count is zero")]
    NoEntries,

    #[error(
        "corrupt dictionary: {entry_count} entries need {needed} bytes, buffer has {available}"
    )]
    TableTruncated {
        entry_count: u16,
        needed: usize,
        available: usize,
    },

    #[error("corrupt dictionary: entry {entry} child pointer {pointer:#06X} is not an entry boundary")]
    ChildPointerMisaligned { entry: usize, pointer: u16 },

    #[error(
        "corrupt dictionary: entry {entry} children {first}..{first}+{count} exceed {entry_count} entries"
    )]
    ChildRangeOutOfBounds {
        entry: usize,
        first: usize,
        count: u16,
        entry_count: u16,
    },

    #[error("corrupt dictionary: entry {entry} name at {offset:#06X} (+{len}) exceeds {size} bytes")]
    NameOutOfBounds {
        entry: usize,
        offset: u16,
        len: u8,
        size: usize,
    },

    #[error("corrupt dictionary: entry {entry} name is not valid UTF-8")]
    NameNotUtf8 { entry: usize },
}
