use std::io::Write;

use bej_dictionary::{Dictionary, EntryRef, Subset};
use bej_wire::nnint::read_nnint;
use bej_wire::{BejHeader, ByteCursor, Format, Selector, Sfl};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::json::JsonWriter;
use crate::scalar;

/// What a successful decode saw besides the JSON it wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub header: BejHeader,
    /// Bytes of the payload used by the header and the root value.
    pub consumed: usize,
    /// Bytes left after the root value. Not an error; reported so tools
    /// can flag it.
    pub trailing: usize,
}

/// BEJ → JSON decoder bound to one major schema dictionary.
///
/// The decoder borrows the dictionary and keeps no state between calls,
/// so one instance (or many sharing one dictionary) can decode any number
/// of payloads, from any number of threads.
///
/// Decoding runs in two steps:
///
///   1. **Header**: the 7-byte document header is parsed and its schema
///      class checked.
///   2. **Root value**: one value is decoded by recursive descent. Each
///      Set or Array narrows the dictionary scope for its members; scalar
///      leaves are decoded by the functions in [`scalar`].
///
/// # Example
///
/// ```rust,no_run
/// use bej_decoder::BejDecoder;
/// use bej_dictionary::Dictionary;
///
/// let dictionary = Dictionary::load(std::fs::read("Thermal_v1.bin")?)?;
/// let payload = std::fs::read("thermal.bej")?;
/// let json = BejDecoder::new(&dictionary).decode_to_string(&payload)?;
/// println!("{json}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BejDecoder<'d> {
    dictionary: &'d Dictionary,
    config: DecoderConfig,
}

impl<'d> BejDecoder<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self::with_config(dictionary, DecoderConfig::default())
    }

    pub fn with_config(dictionary: &'d Dictionary, config: DecoderConfig) -> Self {
        Self { dictionary, config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `payload` and stream the JSON text into `out`.
    ///
    /// Output is written as decoding proceeds. If an error is returned,
    /// `out` may already hold an incomplete JSON fragment; use
    /// [`decode_to_string`](Self::decode_to_string) when only complete
    /// documents should ever be observed.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] for truncation, bad nnints, or a schema
    ///   class other than 0/1.
    /// - [`DecodeError::UnsupportedFormat`], [`DecodeError::InvalidScalar`],
    ///   [`DecodeError::LengthMismatch`], [`DecodeError::AnnotationEncountered`]
    ///   and [`DecodeError::DepthExceeded`] for values that cannot be
    ///   rendered.
    /// - [`DecodeError::Io`] if `out` fails.
    pub fn decode_to_writer<W: Write>(
        &self,
        payload: &[u8],
        out: W,
    ) -> Result<DecodeOutcome, DecodeError> {
        let mut cur = ByteCursor::new(payload);
        let header = BejHeader::read_from(&mut cur)?;

        tracing::debug!(
            version = ?header.version,
            schema_class = ?header.schema_class,
            bytes = payload.len(),
            "decoding BEJ payload"
        );

        let indent = vec![b' '; self.config.indent];
        let mut walk = Walk {
            dict: self.dictionary,
            cur,
            json: JsonWriter::new(out, &indent),
            config: &self.config,
        };
        let root = walk.read_sfl()?;
        walk.value(root, Scope::Unbound, 0)?;

        let consumed = walk.cur.position();
        let trailing = walk.cur.remaining();
        if trailing > 0 {
            tracing::debug!(trailing, "bytes left after root value");
        }

        Ok(DecodeOutcome {
            header,
            consumed,
            trailing,
        })
    }

    /// Decode `payload` into a complete JSON string.
    ///
    /// Nothing is returned unless the whole payload decoded.
    ///
    /// # Errors
    ///
    /// Same as [`decode_to_writer`](Self::decode_to_writer), except `Io`.
    pub fn decode_to_string(&self, payload: &[u8]) -> Result<String, DecodeError> {
        let mut buf = Vec::new();
        self.decode_to_writer(payload, &mut buf)?;
        // names are &str and strings are decoded lossily, so this is UTF-8
        Ok(String::from_utf8(buf)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }
}

/// Decode `payload` against `dictionary` with the default configuration.
///
/// # Errors
///
/// See [`BejDecoder::decode_to_writer`].
pub fn decode_to_json(payload: &[u8], dictionary: &Dictionary) -> Result<String, DecodeError> {
    BejDecoder::new(dictionary).decode_to_string(payload)
}

/// Where in the dictionary the value being decoded should be looked up.
#[derive(Clone, Copy, Debug)]
enum Scope<'d> {
    /// Look the value up by sequence number among these siblings.
    Within(Subset<'d>),
    /// Array elements: by sequence number, else the array's single
    /// element-type entry. Encoders number elements by index, while a
    /// dictionary describes every element with one child of the array
    /// entry, so only element 0 would ever match by sequence.
    Elements(Subset<'d>),
    /// No bound subtree: the document root, a member the dictionary could
    /// not name, or an element of such an array. A Set here takes the
    /// dictionary root's children; anything else degrades.
    Unbound,
}

impl<'d> Scope<'d> {
    fn resolve(self, sfl: &Sfl) -> Option<EntryRef<'d>> {
        let seq = sfl.dictionary_sequence();
        match self {
            Self::Within(subset) => seq.and_then(|s| subset.child_by_sequence(s)),
            Self::Elements(subset) => seq
                .and_then(|s| subset.child_by_sequence(s))
                .or_else(|| subset.only()),
            Self::Unbound => None,
        }
    }
}

/// Per-call decode state. Lives for exactly one payload.
struct Walk<'d, 'p, 'c, W> {
    dict: &'d Dictionary,
    cur: ByteCursor<'p>,
    json: JsonWriter<'c, W>,
    config: &'c DecoderConfig,
}

impl<'d, W: Write> Walk<'d, '_, '_, W> {
    fn read_sfl(&mut self) -> Result<Sfl, DecodeError> {
        Ok(Sfl::read_from(&mut self.cur)?)
    }

    /// Decode one value whose SFL has already been read.
    fn value(&mut self, sfl: Sfl, scope: Scope<'d>, depth: usize) -> Result<(), DecodeError> {
        let offset = self.cur.position();

        if depth > self.config.max_depth {
            return Err(DecodeError::DepthExceeded {
                limit: self.config.max_depth,
                offset,
            });
        }
        if sfl.selector == Selector::Annotation {
            return Err(DecodeError::AnnotationEncountered {
                sequence: sfl.sequence,
                offset,
            });
        }

        tracing::trace!(format = %sfl.format, sequence = sfl.sequence, offset, depth, "value");

        match sfl.format {
            Format::Set => self.set(&sfl, scope, depth),
            Format::Array => self.array(&sfl, scope, depth),
            Format::Integer => {
                let v = scalar::decode_integer(&mut self.cur, sfl.length)?;
                Ok(self.json.integer(v)?)
            }
            Format::Boolean => {
                let v = scalar::decode_boolean(&mut self.cur, sfl.length)?;
                Ok(self.json.boolean(v)?)
            }
            Format::String => {
                let s = scalar::decode_string(&mut self.cur, sfl.length)?;
                Ok(self.json.string(&s)?)
            }
            Format::Real => {
                let real = scalar::decode_real(
                    &mut self.cur,
                    sfl.length,
                    self.config.max_real_leading_zeros,
                )?;
                Ok(self.json.number(real)?)
            }
            Format::Enum => self.enumeration(&sfl, scope),
            Format::Null => {
                scalar::skip_null(&mut self.cur, sfl.length)?;
                Ok(self.json.null()?)
            }
            format @ (Format::Choice
            | Format::ResourceLink
            | Format::PropertyAnnotation
            | Format::Unknown(_)) => Err(DecodeError::UnsupportedFormat { format, offset }),
        }
    }

    fn set(&mut self, sfl: &Sfl, scope: Scope<'d>, depth: usize) -> Result<(), DecodeError> {
        let count = read_nnint(&mut self.cur)?;

        let members = match scope {
            Scope::Unbound => Scope::Within(self.dict.root_children()),
            bound => bound.resolve(sfl).map_or_else(
                || {
                    tracing::debug!(sequence = sfl.sequence, "set has no schema entry");
                    Scope::Unbound
                },
                |entry| Scope::Within(entry.children()),
            ),
        };

        self.json.begin_object()?;
        let mut first = true;

        for _ in 0..count {
            let member = self.read_sfl()?;

            if member.selector == Selector::Annotation {
                tracing::debug!(
                    sequence = member.sequence,
                    length = member.length,
                    "skipping annotation member"
                );
                self.cur.skip(member.length)?;
                continue;
            }

            match members.resolve(&member).and_then(EntryRef::name) {
                Some(name) => {
                    self.json.key(name, first)?;
                    self.value(member, members, depth + 1)?;
                }
                None => {
                    tracing::debug!(sequence = member.sequence, "unresolved set member");
                    self.json.positional_key(member.sequence, first)?;
                    self.value(member, Scope::Unbound, depth + 1)?;
                }
            }
            self.json.end_member()?;
            first = false;
        }

        self.json.end_object()?;
        Ok(())
    }

    fn array(&mut self, sfl: &Sfl, scope: Scope<'d>, depth: usize) -> Result<(), DecodeError> {
        let count = read_nnint(&mut self.cur)?;

        let elements = scope
            .resolve(sfl)
            .map_or(Scope::Unbound, |entry| Scope::Elements(entry.children()));

        self.json.begin_array()?;
        for i in 0..count {
            let element = self.read_sfl()?;
            self.json.begin_element(i == 0)?;
            self.value(element, elements, depth + 1)?;
            self.json.end_element()?;
        }
        self.json.end_array()?;
        Ok(())
    }

    /// Enum values name a variant of *their field*: the field entry is
    /// found by the enum's own sequence number, the variant by the value
    /// among that entry's children.
    fn enumeration(&mut self, sfl: &Sfl, scope: Scope<'d>) -> Result<(), DecodeError> {
        let index = read_nnint(&mut self.cur)?;

        let variant = scope.resolve(sfl).and_then(|field| {
            let seq = u16::try_from(index).ok()?;
            field.children().child_by_sequence(seq)?.name()
        });

        match variant {
            Some(name) => Ok(self.json.string(name)?),
            None => {
                tracing::debug!(sequence = sfl.sequence, index, "unresolved enum variant");
                Ok(self.json.unsigned(index)?)
            }
        }
    }
}
