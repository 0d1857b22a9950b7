//! Fixture builders for the BEJ integration tests, benches and the
//! fixture generator binary.
//!
//! Two builders produce the byte-level inputs the decoder consumes:
//!
//! - [`DictionaryBuilder`] lays out a [`SchemaNode`] tree as a binary
//!   schema dictionary: breadth-first so every node's children are
//!   contiguous, names pooled after the entry table.
//! - [`PayloadBuilder`] serializes a [`Value`] tree as a BEJ document:
//!   7-byte header, then SFL-framed values with exact lengths.
//!
//! [`thermal`] bundles a small Redfish-style Thermal schema and a payload
//! that exercises every decodable format.

#![allow(clippy::pedantic)]

use std::collections::VecDeque;

use bej_dictionary::Dictionary;
use bej_wire::nnint::{encode_nnint, encode_signed_nnint, signed_le_bytes};
use bej_wire::{BejHeader, Format, SchemaClass, Selector, Sfl};

// ── Dictionary ────────────────────────────────────────────────────────────────

/// One node of a schema tree, before layout.
#[derive(Clone, Debug)]
pub struct SchemaNode {
    pub format: Format,
    pub flags: u8,
    pub sequence: u16,
    /// Empty for anonymous entries.
    pub name: String,
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    pub fn new(format: Format, sequence: u16, name: &str) -> Self {
        Self {
            format,
            flags: 0,
            sequence,
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    /// An unnamed entry, e.g. the element type under an array.
    pub fn anonymous(format: Format, sequence: u16) -> Self {
        Self::new(format, sequence, "")
    }

    pub fn child(mut self, node: SchemaNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// An enum field whose variants are `names` in sequence order.
    pub fn enumeration(sequence: u16, name: &str, variants: &[&str]) -> Self {
        Self::new(Format::Enum, sequence, name).children(
            variants
                .iter()
                .zip(0u16..)
                .map(|(v, seq)| Self::new(Format::String, seq, v)),
        )
    }
}

/// Serializes a [`SchemaNode`] tree into the binary dictionary format.
///
/// ```text
///   header (12)  │ entry 0 (root) │ root's children │ next level … │ names
/// ```
#[derive(Clone, Debug)]
pub struct DictionaryBuilder {
    root: SchemaNode,
    version_tag: u8,
    schema_version: u32,
}

impl DictionaryBuilder {
    pub fn new(root: SchemaNode) -> Self {
        Self {
            root,
            version_tag: 0,
            schema_version: 0xF1F0_F000,
        }
    }

    pub fn schema_version(mut self, version: u32) -> Self {
        self.schema_version = version;
        self
    }

    pub fn version_tag(mut self, tag: u8) -> Self {
        self.version_tag = tag;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        // Breadth-first flattening: (node, index of first child).
        let mut flat: Vec<(&SchemaNode, usize)> = vec![(&self.root, 0)];
        let mut queue = VecDeque::from([0usize]);
        while let Some(i) = queue.pop_front() {
            let node = flat[i].0;
            let first = flat.len();
            flat[i].1 = first;
            for child in &node.children {
                queue.push_back(flat.len());
                flat.push((child, 0));
            }
        }

        let table_end = 12 + flat.len() * 10;
        let mut table = Vec::with_capacity(table_end);
        let mut names = Vec::new();

        for &(node, first) in &flat {
            table.push((node.format.nibble() << 4) | (node.flags & 0x0F));
            table.extend_from_slice(&node.sequence.to_le_bytes());
            let pointer = if node.children.is_empty() {
                0
            } else {
                (12 + first * 10) as u16
            };
            table.extend_from_slice(&pointer.to_le_bytes());
            table.extend_from_slice(&(node.children.len() as u16).to_le_bytes());
            if node.name.is_empty() {
                table.extend_from_slice(&[0, 0, 0]);
            } else {
                table.push((node.name.len() + 1) as u8);
                table.extend_from_slice(&((table_end + names.len()) as u16).to_le_bytes());
                names.extend_from_slice(node.name.as_bytes());
                names.push(0);
            }
        }

        let total = table_end + names.len();
        let mut out = Vec::with_capacity(total);
        out.push(self.version_tag);
        out.push(0);
        out.extend_from_slice(&(flat.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.schema_version.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&table);
        out.extend_from_slice(&names);
        out
    }

    pub fn load(&self) -> Dictionary {
        Dictionary::load(self.build()).expect("builder produced an invalid dictionary")
    }
}

// ── Payload ───────────────────────────────────────────────────────────────────

/// A BEJ value, before encoding.
#[derive(Clone, Debug)]
pub enum Value {
    Set(Vec<Member>),
    Array(Vec<Member>),
    Integer(i64),
    Enum(u64),
    /// Encoded with a trailing NUL.
    String(String),
    Real {
        whole: i64,
        leading_zeros: u64,
        fraction: u64,
        exponent: i64,
    },
    Boolean(bool),
    Null,
    /// Arbitrary format and payload bytes, for malformed or unsupported
    /// values. Length is the byte count unless overridden.
    Raw {
        format: Format,
        bytes: Vec<u8>,
        length: Option<u64>,
    },
}

impl Value {
    pub fn string(s: &str) -> Self {
        Self::String(s.to_string())
    }

    pub fn set(members: impl IntoIterator<Item = Member>) -> Self {
        Self::Set(members.into_iter().collect())
    }

    /// Array elements, numbered 0, 1, 2… in order.
    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(
            elements
                .into_iter()
                .zip(0u64..)
                .map(|(v, seq)| Member::new(seq, v))
                .collect(),
        )
    }

    pub fn real(whole: i64, leading_zeros: u64, fraction: u64, exponent: i64) -> Self {
        Self::Real {
            whole,
            leading_zeros,
            fraction,
            exponent,
        }
    }

    pub fn raw(format: Format, bytes: &[u8]) -> Self {
        Self::Raw {
            format,
            bytes: bytes.to_vec(),
            length: None,
        }
    }

    fn format(&self) -> Format {
        match self {
            Self::Set(_) => Format::Set,
            Self::Array(_) => Format::Array,
            Self::Integer(_) => Format::Integer,
            Self::Enum(_) => Format::Enum,
            Self::String(_) => Format::String,
            Self::Real { .. } => Format::Real,
            Self::Boolean(_) => Format::Boolean,
            Self::Null => Format::Null,
            Self::Raw { format, .. } => *format,
        }
    }

    /// The bytes after the SFL, and the length the SFL should declare.
    fn body(&self) -> (Vec<u8>, Option<u64>) {
        let mut out = Vec::new();
        let mut length = None;
        match self {
            Self::Set(members) | Self::Array(members) => {
                encode_nnint(members.len() as u64, &mut out);
                for m in members {
                    m.write_to(&mut out);
                }
            }
            Self::Integer(v) => {
                let (raw, width) = signed_le_bytes(*v);
                out.extend_from_slice(&raw[..width]);
            }
            Self::Enum(index) => {
                encode_nnint(*index, &mut out);
            }
            Self::String(s) => {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            Self::Real {
                whole,
                leading_zeros,
                fraction,
                exponent,
            } => {
                encode_signed_nnint(*whole, &mut out);
                encode_nnint(*leading_zeros, &mut out);
                encode_nnint(*fraction, &mut out);
                encode_signed_nnint(*exponent, &mut out);
            }
            Self::Boolean(b) => out.push(u8::from(*b)),
            Self::Null => {}
            Self::Raw {
                bytes,
                length: declared,
                ..
            } => {
                out.extend_from_slice(bytes);
                length = *declared;
            }
        }
        (out, length)
    }
}

/// A value plus the sequence number and selector it is framed with.
#[derive(Clone, Debug)]
pub struct Member {
    pub sequence: u64,
    pub selector: Selector,
    pub value: Value,
}

impl Member {
    pub fn new(sequence: u64, value: Value) -> Self {
        Self {
            sequence,
            selector: Selector::Major,
            value,
        }
    }

    /// A member framed with the annotation selector.
    pub fn annotation(sequence: u64, value: Value) -> Self {
        Self {
            sequence,
            selector: Selector::Annotation,
            value,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let (body, declared) = self.value.body();
        Sfl {
            sequence: self.sequence,
            selector: self.selector,
            format: self.value.format(),
            flags: 0,
            length: declared.unwrap_or(body.len() as u64),
        }
        .write_to(buf);
        buf.extend_from_slice(&body);
    }
}

/// Shorthand for [`Member::new`].
pub fn member(sequence: u64, value: Value) -> Member {
    Member::new(sequence, value)
}

/// Serializes a root [`Value`] as a complete BEJ document.
#[derive(Clone, Debug)]
pub struct PayloadBuilder {
    header: BejHeader,
    root: Member,
    trailing: Vec<u8>,
}

impl PayloadBuilder {
    pub fn new(root: Value) -> Self {
        Self {
            header: BejHeader::default(),
            root: Member::new(0, root),
            trailing: Vec::new(),
        }
    }

    pub fn version(mut self, version: [u8; 4]) -> Self {
        self.header.version = version;
        self
    }

    pub fn schema_class(mut self, class: SchemaClass) -> Self {
        self.header.schema_class = class;
        self
    }

    /// Frame the root with the annotation selector.
    pub fn root_annotation(mut self) -> Self {
        self.root.selector = Selector::Annotation;
        self
    }

    /// Append bytes after the root value.
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.header.write_to(&mut out);
        self.root.write_to(&mut out);
        out.extend_from_slice(&self.trailing);
        out
    }
}

// ── Canned fixtures ───────────────────────────────────────────────────────────

/// A Redfish-style Thermal resource.
pub mod thermal {
    use super::*;

    /// ```text
    /// Thermal (set)
    /// ├── 0 Fans (array) ── anonymous set
    /// │   ├── 0 MemberId (string)
    /// │   ├── 1 Name (string)
    /// │   ├── 2 Reading (integer)
    /// │   ├── 3 ReadingUnits (enum: Percent, RPM)
    /// │   └── 4 Status (set)
    /// │       ├── 0 Health (enum: Critical, OK, Warning)
    /// │       └── 1 State (enum: Absent, Enabled, StandbyOffline)
    /// ├── 1 Id (string)
    /// ├── 2 Name (string)
    /// ├── 3 PowerSaving (boolean)
    /// ├── 4 Redundancy (null)
    /// └── 5 Temperatures (array) ── anonymous set
    ///     ├── 0 Name (string)
    ///     ├── 1 ReadingCelsius (real)
    ///     └── 2 UpperThresholdCritical (integer)
    /// ```
    pub fn schema() -> DictionaryBuilder {
        let status = SchemaNode::new(Format::Set, 4, "Status").children([
            SchemaNode::enumeration(0, "Health", &["Critical", "OK", "Warning"]),
            SchemaNode::enumeration(1, "State", &["Absent", "Enabled", "StandbyOffline"]),
        ]);
        let fan = SchemaNode::anonymous(Format::Set, 0).children([
            SchemaNode::new(Format::String, 0, "MemberId"),
            SchemaNode::new(Format::String, 1, "Name"),
            SchemaNode::new(Format::Integer, 2, "Reading"),
            SchemaNode::enumeration(3, "ReadingUnits", &["Percent", "RPM"]),
            status,
        ]);
        let temperature = SchemaNode::anonymous(Format::Set, 0).children([
            SchemaNode::new(Format::String, 0, "Name"),
            SchemaNode::new(Format::Real, 1, "ReadingCelsius"),
            SchemaNode::new(Format::Integer, 2, "UpperThresholdCritical"),
        ]);

        DictionaryBuilder::new(SchemaNode::new(Format::Set, 0, "Thermal").children([
            SchemaNode::new(Format::Array, 0, "Fans").child(fan),
            SchemaNode::new(Format::String, 1, "Id"),
            SchemaNode::new(Format::String, 2, "Name"),
            SchemaNode::new(Format::Boolean, 3, "PowerSaving"),
            SchemaNode::new(Format::Null, 4, "Redundancy"),
            SchemaNode::new(Format::Array, 5, "Temperatures").child(temperature),
        ]))
    }

    pub fn fan(id: &str, reading: i64, health: u64) -> Value {
        Value::set([
            member(0, Value::string(id)),
            member(1, Value::string(&format!("Fan{id}"))),
            member(2, Value::Integer(reading)),
            member(3, Value::Enum(1)),
            member(
                4,
                Value::set([member(0, Value::Enum(health)), member(1, Value::Enum(1))]),
            ),
        ])
    }

    pub fn payload() -> PayloadBuilder {
        PayloadBuilder::new(Value::set([
            member(
                0,
                Value::array([fan("0", 4200, 1), fan("1", 3900, 2)]),
            ),
            member(1, Value::string("Thermal")),
            member(2, Value::string("Thermal Metrics")),
            member(3, Value::Boolean(false)),
            member(4, Value::Null),
            member(
                5,
                Value::array([Value::set([
                    member(0, Value::string("CPU1")),
                    member(1, Value::real(41, 0, 5, 0)),
                    member(2, Value::Integer(95)),
                ])]),
            ),
        ]))
    }
}
