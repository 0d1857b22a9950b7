/// BEJ value format tags: the high nibble of every SFL format byte and of
/// every dictionary entry's first byte.
///
/// ```text
/// ┌────────┬────────────────────┬─────────────────────────────────┐
/// │ Nibble │ Variant            │ Decoder support                 │
/// ├────────┼────────────────────┼─────────────────────────────────┤
/// │ 0x0    │ Set                │ yes                             │
/// │ 0x1    │ Array              │ yes                             │
/// │ 0x3    │ Integer            │ yes                             │
/// │ 0x4    │ Enum               │ yes                             │
/// │ 0x5    │ String             │ yes                             │
/// │ 0x6    │ Real               │ yes                             │
/// │ 0x7    │ Boolean            │ yes                             │
/// │ 0x9    │ Choice             │ recognized, not decoded         │
/// │ 0xA    │ Null               │ yes                             │
/// │ 0xE    │ ResourceLink       │ recognized, not decoded         │
/// │ 0xF    │ PropertyAnnotation │ recognized, not decoded         │
/// └────────┴────────────────────┴─────────────────────────────────┘
/// ```
///
/// Any other nibble becomes `Unknown(n)` so the raw tag can be reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Set,
    Array,
    Integer,
    Enum,
    String,
    Real,
    Boolean,
    Choice,
    Null,
    ResourceLink,
    PropertyAnnotation,
    Unknown(u8),
}

impl Format {
    /// Parse a 4-bit format tag. Only the low nibble of `nibble` is used.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => Self::Set,
            0x1 => Self::Array,
            0x3 => Self::Integer,
            0x4 => Self::Enum,
            0x5 => Self::String,
            0x6 => Self::Real,
            0x7 => Self::Boolean,
            0x9 => Self::Choice,
            0xA => Self::Null,
            0xE => Self::ResourceLink,
            0xF => Self::PropertyAnnotation,
            other => Self::Unknown(other),
        }
    }

    pub fn nibble(self) -> u8 {
        match self {
            Self::Set => 0x0,
            Self::Array => 0x1,
            Self::Integer => 0x3,
            Self::Enum => 0x4,
            Self::String => 0x5,
            Self::Real => 0x6,
            Self::Boolean => 0x7,
            Self::Choice => 0x9,
            Self::Null => 0xA,
            Self::ResourceLink => 0xE,
            Self::PropertyAnnotation => 0xF,
            Self::Unknown(n) => n,
        }
    }

    /// Lowercase display name, used in diagnostics and `bej dict` output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Array => "array",
            Self::Integer => "integer",
            Self::Enum => "enum",
            Self::String => "string",
            Self::Real => "real",
            Self::Boolean => "boolean",
            Self::Choice => "choice",
            Self::Null => "null",
            Self::ResourceLink => "resource_link",
            Self::PropertyAnnotation => "property_annotation",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(n) => write!(f, "unknown({n:#03x})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Which dictionary namespace a value's sequence number belongs to.
///
/// Carried in the low bit of every SFL sequence nnint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Field defined by the major (schema) dictionary.
    Major,
    /// Field defined by the annotation dictionary.
    Annotation,
}

impl Selector {
    pub fn from_bit(bit: u64) -> Self {
        if bit & 1 == 0 {
            Self::Major
        } else {
            Self::Annotation
        }
    }

    pub fn bit(self) -> u64 {
        match self {
            Self::Major => 0,
            Self::Annotation => 1,
        }
    }
}
