/// Implementation of `bej dict`.
///
/// Loads a schema dictionary and prints its header followed by the entry
/// tree, walked depth-first from the root.
///
/// # Text output
///
/// ```text
/// Dictionary: 6 entries, version tag 0x00, schema version 0xF1F0F000, 214 bytes
/// [0] set seq=0 "Thermal"
///   [1] boolean seq=0 "Enabled"
///   [2] integer seq=1 "Reading"
///   [3] enum seq=2 "State"
///     [4] string seq=0 "Off"
///     [5] string seq=1 "On"
/// ```
///
/// Child links that point back at an ancestor are not followed; the tree
/// ends with a `!` line counting them. A file whose links multiply the
/// paths at every level stops after a bounded number of entries, also
/// flagged with a `!` line.
///
/// # JSON output
///
/// `--format json` emits the header and a flat entry list (entries in file
/// order, each with its child range) for tooling that wants to build its
/// own view.
use std::fmt::Write as _;

use anyhow::{Context, Result};
use bej_dictionary::{Dictionary, DictionaryEntry, EntryRef};
use serde::Serialize;

use crate::cmd_decode::load_dictionary;
use crate::{DictArgs, DictFormat};

/// Run the `bej dict` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a well-formed
/// dictionary, or the JSON report cannot be serialized.
pub fn run(args: &DictArgs) -> Result<()> {
    let dictionary = load_dictionary(&args.file)?;

    match args.format {
        DictFormat::Text => print_tree(&dictionary, args.max_depth),
        DictFormat::Json => {
            let report = DictReport::from_dictionary(&dictionary);
            let text =
                serde_json::to_string_pretty(&report).context("cannot serialize dictionary")?;
            println!("{text}");
        }
    }
    Ok(())
}

fn print_tree(dictionary: &Dictionary, max_depth: usize) {
    let header = dictionary.header();
    println!(
        "Dictionary: {} entr{}, version tag 0x{:02X}, schema version 0x{:08X}, {} bytes",
        dictionary.len(),
        if dictionary.len() == 1 { "y" } else { "ies" },
        header.version_tag,
        header.schema_version,
        dictionary.as_bytes().len()
    );

    let summary = dictionary.walk(max_depth, |depth, entry| {
        println!("{:indent$}{}", "", entry_line(entry), indent = depth * 2);
    });
    if summary.cycles > 0 {
        println!(
            "! {} child link{} back to an ancestor not expanded",
            summary.cycles,
            if summary.cycles == 1 { "" } else { "s" }
        );
    }
    if summary.exhausted {
        println!("! walk stopped after {} entries", summary.visited);
    }
}

fn entry_line(entry: EntryRef<'_>) -> String {
    let mut line = format!(
        "[{}] {} seq={}",
        entry.index(),
        entry.format().name(),
        entry.sequence()
    );
    if entry.flags() != 0 {
        let _ = write!(line, " flags=0x{:X}", entry.flags());
    }
    match entry.name() {
        Some(name) => {
            let _ = write!(line, " {name:?}");
        }
        None => line.push_str(" (anonymous)"),
    }
    line
}

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DictReport<'d> {
    version_tag: u8,
    flags: u8,
    entry_count: u16,
    schema_version: u32,
    dict_size: u32,
    entries: Vec<EntryReport<'d>>,
}

#[derive(Serialize)]
struct EntryReport<'d> {
    index: usize,
    format: &'static str,
    flags: u8,
    sequence: u16,
    name: Option<&'d str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<ChildrenReport>,
}

#[derive(Serialize)]
struct ChildrenReport {
    first: usize,
    count: usize,
}

impl<'d> DictReport<'d> {
    fn from_dictionary(dictionary: &'d Dictionary) -> Self {
        let header = dictionary.header();
        let entries = (0..dictionary.len())
            .filter_map(|i| dictionary.entry(i))
            .map(|entry| {
                let DictionaryEntry {
                    format,
                    flags,
                    sequence,
                    children,
                    ..
                } = entry.entry();
                EntryReport {
                    index: entry.index(),
                    format: format.name(),
                    flags: *flags,
                    sequence: *sequence,
                    name: entry.name(),
                    children: children.map(|c| ChildrenReport {
                        first: c.first,
                        count: c.count,
                    }),
                }
            })
            .collect();

        Self {
            version_tag: header.version_tag,
            flags: header.flags,
            entry_count: header.entry_count,
            schema_version: header.schema_version,
            dict_size: header.dict_size,
            entries,
        }
    }
}
