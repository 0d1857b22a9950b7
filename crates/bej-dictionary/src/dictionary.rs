use bej_wire::Format;

use crate::entry::{ChildRange, DictionaryEntry};
use crate::error::DictionaryError;
use crate::header::DictionaryHeader;

/// A loaded schema dictionary.
///
/// The dictionary owns the raw file bytes and a flat arena of entries in
/// file order. The tree is implicit: each entry holds a [`ChildRange`]
/// into the same arena, and entry 0 is the document root.
///
/// ```text
///   entries: [ root | A | B | A.x | A.y | B.z ]
///              │      │   └──────────────────┴─ children 5..6
///              │      └─ children 3..5
///              └─ children 1..3
/// ```
///
/// Navigation hands out [`EntryRef`] and [`Subset`] views that borrow the
/// dictionary, so entry names are `&str` slices of the owned buffer and can
/// never outlive it.
///
/// A `Dictionary` is immutable once loaded and can be shared by reference
/// across any number of concurrent decodes.
#[derive(Debug)]
pub struct Dictionary {
    bytes: Vec<u8>,
    header: DictionaryHeader,
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    /// Load and validate a dictionary from its raw bytes.
    ///
    /// Validation is complete before this returns: every child range lies
    /// inside the entry table and every name lies inside the buffer. A
    /// dictionary that fails any check is never partially returned.
    ///
    /// # Errors
    ///
    /// Any [`DictionaryError`] variant; all of them mean the file is
    /// corrupt.
    pub fn load(bytes: impl Into<Vec<u8>>) -> Result<Self, DictionaryError> {
        let bytes = bytes.into();
        let header = DictionaryHeader::read_from(&bytes)?;

        if header.entry_count == 0 {
            return Err(DictionaryError::NoEntries);
        }

        let needed = header.table_end();
        if bytes.len() < needed {
            return Err(DictionaryError::TableTruncated {
                entry_count: header.entry_count,
                needed,
                available: bytes.len(),
            });
        }

        if header.dict_size as usize != bytes.len() {
            tracing::debug!(
                declared = header.dict_size,
                actual = bytes.len(),
                "dictionary size field disagrees with buffer length"
            );
        }

        let entries = (0..usize::from(header.entry_count))
            .map(|i| DictionaryEntry::parse(&bytes, i, header.entry_count))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            entries = entries.len(),
            schema_version = header.schema_version,
            bytes = bytes.len(),
            "loaded dictionary"
        );

        Ok(Self {
            bytes,
            header,
            entries,
        })
    }

    pub fn header(&self) -> &DictionaryHeader {
        &self.header
    }

    /// The raw bytes the dictionary was loaded from.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a loaded dictionary; loading rejects zero entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<EntryRef<'_>> {
        (index < self.entries.len()).then_some(EntryRef { dict: self, index })
    }

    /// Entry 0, the document root.
    pub fn root(&self) -> EntryRef<'_> {
        EntryRef {
            dict: self,
            index: 0,
        }
    }

    /// Children of the document root: the top-level properties.
    pub fn root_children(&self) -> Subset<'_> {
        self.root().children()
    }

    /// Children of the entry at `parent`, or of the root when `parent` is
    /// `None`. An index outside the dictionary yields an empty subset.
    pub fn children_of(&self, parent: Option<usize>) -> Subset<'_> {
        match parent {
            None => self.root_children(),
            Some(index) => self
                .entry(index)
                .map_or_else(|| Subset::empty(self), |e| e.children()),
        }
    }

    /// Depth-first walk from the root, calling `visit(depth, entry)` for
    /// every reachable entry. The root itself is visited at depth 0.
    ///
    /// Child ranges may point anywhere in the table, so a hostile file can
    /// describe a cycle or a lattice whose paths multiply at every level.
    /// The walk therefore:
    ///
    /// - stops descending at `max_depth`;
    /// - does not enter a child that is already on the path from the root
    ///   (counted in [`WalkSummary::cycles`]);
    /// - gives up after `len() * (max_depth + 1)` visits, which a tree can
    ///   never need.
    pub fn walk<F>(&self, max_depth: usize, mut visit: F) -> WalkSummary
    where
        F: FnMut(usize, EntryRef<'_>),
    {
        let budget = self.entries.len().saturating_mul(max_depth.saturating_add(1));
        let mut summary = WalkSummary::default();
        let mut path: Vec<usize> = Vec::new();
        let mut stack = vec![(0usize, self.root())];

        while let Some((depth, entry)) = stack.pop() {
            if summary.visited == budget {
                summary.exhausted = true;
                tracing::debug!(budget, "dictionary walk stopped at visit budget");
                break;
            }
            visit(depth, entry);
            summary.visited += 1;

            path.truncate(depth);
            path.push(entry.index());
            if depth == max_depth {
                continue;
            }

            let children: Vec<_> = entry
                .children()
                .iter()
                .filter(|child| {
                    let cyclic = path.contains(&child.index());
                    summary.cycles += usize::from(cyclic);
                    !cyclic
                })
                .collect();
            stack.extend(children.into_iter().rev().map(|c| (depth + 1, c)));
        }
        summary
    }
}

/// What a [`Dictionary::walk`] did besides visiting entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub visited: usize,
    /// Child links skipped because they point back at an ancestor.
    pub cycles: usize,
    /// The visit budget ran out before the walk finished.
    pub exhausted: bool,
}

/// A borrowed handle to one dictionary entry.
#[derive(Clone, Copy, Debug)]
pub struct EntryRef<'d> {
    dict: &'d Dictionary,
    index: usize,
}

impl<'d> EntryRef<'d> {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn entry(self) -> &'d DictionaryEntry {
        &self.dict.entries[self.index]
    }

    pub fn format(self) -> Format {
        self.entry().format
    }

    pub fn flags(self) -> u8 {
        self.entry().flags
    }

    pub fn sequence(self) -> u16 {
        self.entry().sequence
    }

    /// The display name, borrowed from the dictionary buffer.
    ///
    /// `None` for anonymous entries (array element types, internal nodes).
    pub fn name(self) -> Option<&'d str> {
        let range = self.entry().name.clone()?;
        // validated as UTF-8 at load time
        std::str::from_utf8(&self.dict.bytes[range]).ok()
    }

    pub fn children(self) -> Subset<'d> {
        match self.entry().children {
            Some(range) => Subset {
                dict: self.dict,
                range,
            },
            None => Subset::empty(self.dict),
        }
    }
}

/// The children of one entry: a contiguous slice of the arena.
#[derive(Clone, Copy, Debug)]
pub struct Subset<'d> {
    dict: &'d Dictionary,
    range: ChildRange,
}

impl<'d> Subset<'d> {
    fn empty(dict: &'d Dictionary) -> Self {
        Self {
            dict,
            range: ChildRange { first: 0, count: 0 },
        }
    }

    pub fn len(self) -> usize {
        self.range.count
    }

    pub fn is_empty(self) -> bool {
        self.range.count == 0
    }

    pub fn get(self, i: usize) -> Option<EntryRef<'d>> {
        (i < self.range.count).then_some(EntryRef {
            dict: self.dict,
            index: self.range.first + i,
        })
    }

    pub fn iter(self) -> impl Iterator<Item = EntryRef<'d>> {
        let dict = self.dict;
        self.range
            .indices()
            .map(move |index| EntryRef { dict, index })
    }

    /// Find the sibling with the given sequence number.
    ///
    /// Linear scan: sibling counts are small and the file does not promise
    /// any ordering.
    pub fn child_by_sequence(self, sequence: u16) -> Option<EntryRef<'d>> {
        self.iter().find(|e| e.sequence() == sequence)
    }

    /// The single entry of a one-element subset.
    pub fn only(self) -> Option<EntryRef<'d>> {
        if self.range.count == 1 {
            self.get(0)
        } else {
            None
        }
    }
}
