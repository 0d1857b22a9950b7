use std::fmt::Display;
use std::io::{self, Write};

use serde_json::ser::{Formatter, PrettyFormatter};

/// Streaming JSON sink driven by `serde_json`'s [`PrettyFormatter`].
///
/// The decoder does not build a `serde_json::Value`: members come off the
/// wire one at a time, may repeat a key, and must appear in wire order.
/// Instead it calls the formatter's container protocol directly and lets
/// `serde_json` own layout and string escaping.
///
/// Call sequence for one object:
///
/// ```text
///   {                    ← begin_object
///     "Name": value,     ← key(name, first=true), value, end_member
///     "_4": value        ← positional_key(4, first=false), value, end_member
///   }                    ← end_object
///
///   {}                   ← begin_object + end_object
/// ```
///
/// Arrays follow the same shape with `begin_element`/`end_element`.
pub struct JsonWriter<'i, W> {
    out: W,
    fmt: PrettyFormatter<'i>,
}

impl<'i, W: Write> JsonWriter<'i, W> {
    /// `indent` is the whitespace written once per nesting level.
    pub fn new(out: W, indent: &'i [u8]) -> Self {
        Self {
            out,
            fmt: PrettyFormatter::with_indent(indent),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // ── Objects ───────────────────────────────────────────────────────────

    pub fn begin_object(&mut self) -> io::Result<()> {
        self.fmt.begin_object(&mut self.out)
    }

    /// Start a member named `name`. The value follows, then
    /// [`end_member`](Self::end_member).
    pub fn key(&mut self, name: &str, first: bool) -> io::Result<()> {
        self.fmt.begin_object_key(&mut self.out, first)?;
        self.string(name)?;
        self.fmt.end_object_key(&mut self.out)?;
        self.fmt.begin_object_value(&mut self.out)
    }

    /// Start a member the dictionary could not name: `"_<seq>"`.
    pub fn positional_key(&mut self, sequence: u64, first: bool) -> io::Result<()> {
        self.fmt.begin_object_key(&mut self.out, first)?;
        write!(self.out, "\"_{sequence}\"")?;
        self.fmt.end_object_key(&mut self.out)?;
        self.fmt.begin_object_value(&mut self.out)
    }

    pub fn end_member(&mut self) -> io::Result<()> {
        self.fmt.end_object_value(&mut self.out)
    }

    pub fn end_object(&mut self) -> io::Result<()> {
        self.fmt.end_object(&mut self.out)
    }

    // ── Arrays ────────────────────────────────────────────────────────────

    pub fn begin_array(&mut self) -> io::Result<()> {
        self.fmt.begin_array(&mut self.out)
    }

    pub fn begin_element(&mut self, first: bool) -> io::Result<()> {
        self.fmt.begin_array_value(&mut self.out, first)
    }

    pub fn end_element(&mut self) -> io::Result<()> {
        self.fmt.end_array_value(&mut self.out)
    }

    pub fn end_array(&mut self) -> io::Result<()> {
        self.fmt.end_array(&mut self.out)
    }

    // ── Scalars ───────────────────────────────────────────────────────────

    /// A quoted, escaped string literal.
    pub fn string(&mut self, s: &str) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, s).map_err(io::Error::from)
    }

    pub fn integer(&mut self, v: i64) -> io::Result<()> {
        self.fmt.write_i64(&mut self.out, v)
    }

    pub fn unsigned(&mut self, v: u64) -> io::Result<()> {
        self.fmt.write_u64(&mut self.out, v)
    }

    pub fn boolean(&mut self, v: bool) -> io::Result<()> {
        self.fmt.write_bool(&mut self.out, v)
    }

    pub fn null(&mut self) -> io::Result<()> {
        self.fmt.write_null(&mut self.out)
    }

    /// A number already in JSON form, written verbatim (Reals).
    pub fn number(&mut self, v: impl Display) -> io::Result<()> {
        self.fmt.write_raw_fragment(&mut self.out, &v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(build: impl FnOnce(&mut JsonWriter<'_, Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = JsonWriter::new(Vec::new(), b"  ");
        build(&mut w).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(render(|w| w.string("Thermal")), "\"Thermal\"");
        assert_eq!(render(|w| w.string("Größe €")), "\"Größe €\"");
    }

    #[test]
    fn short_escapes() {
        assert_eq!(render(|w| w.string("a\"b\\c")), r#""a\"b\\c""#);
        assert_eq!(render(|w| w.string("\u{8}\u{c}\n\r\t")), r#""\b\f\n\r\t""#);
    }

    #[test]
    fn other_controls_as_lowercase_unicode() {
        assert_eq!(render(|w| w.string("\u{1}x\u{1f}")), r#""\u0001x\u001f""#);
    }

    #[test]
    fn container_layout() {
        let text = render(|w| {
            w.begin_object()?;
            w.key("A", true)?;
            w.integer(1)?;
            w.end_member()?;
            w.positional_key(4, false)?;
            w.begin_array()?;
            w.end_array()?;
            w.end_member()?;
            w.end_object()
        });
        assert_eq!(text, "{\n  \"A\": 1,\n  \"_4\": []\n}");
    }

    #[test]
    fn nested_empty_object_inside_array() {
        let text = render(|w| {
            w.begin_array()?;
            w.begin_element(true)?;
            w.begin_object()?;
            w.end_object()?;
            w.end_element()?;
            w.begin_element(false)?;
            w.null()?;
            w.end_element()?;
            w.end_array()
        });
        assert_eq!(text, "[\n  {},\n  null\n]");
    }

    #[test]
    fn duplicate_keys_are_kept() {
        let text = render(|w| {
            w.begin_object()?;
            for (i, v) in [true, false].into_iter().enumerate() {
                w.key("State", i == 0)?;
                w.boolean(v)?;
                w.end_member()?;
            }
            w.end_object()
        });
        assert_eq!(text, "{\n  \"State\": true,\n  \"State\": false\n}");
    }

    #[test]
    fn custom_indent_width() {
        let mut w = JsonWriter::new(Vec::new(), b"    ");
        w.begin_object().unwrap();
        w.key("x", true).unwrap();
        w.unsigned(7).unwrap();
        w.end_member().unwrap();
        w.end_object().unwrap();
        assert_eq!(w.into_inner(), b"{\n    \"x\": 7\n}");
    }
}
