#![no_main]

use bej_dictionary::Dictionary;
use libfuzzer_sys::fuzz_target;

// Fuzz target: dictionary loading and navigation.
//
// Catches bugs in:
// - Entry table bounds
// - Child pointer arithmetic (misaligned, before the table, past the end)
// - Name windows outside the buffer and non-UTF-8 names
// - Cyclic child ranges during a walk
fuzz_target!(|data: &[u8]| {
    let Ok(dict) = Dictionary::load(data) else {
        return;
    };

    let mut visited = 0usize;
    let summary = dict.walk(16, |_, entry| {
        let _ = entry.name();
        visited += 1;
    });
    assert!(visited >= 1);
    assert_eq!(summary.visited, visited);
    assert!(visited <= dict.len() * 17);

    for entry in dict.root_children().iter() {
        let _ = dict.root_children().child_by_sequence(entry.sequence());
    }
});
