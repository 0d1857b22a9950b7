#![no_main]

use bej_wire::{ByteCursor, Sfl};
use libfuzzer_sys::fuzz_target;

// Fuzz target: SFL triple parsing.
//
// A successful parse must re-encode to no more bytes than it consumed
// (the writer always picks the shortest nnint form), and `peek` must
// agree with `read_from` without moving the cursor.
fuzz_target!(|data: &[u8]| {
    let mut cur = ByteCursor::new(data);
    let peeked = Sfl::peek(&mut cur);
    assert_eq!(cur.position(), 0);

    if let Ok(sfl) = Sfl::read_from(&mut cur) {
        assert_eq!(peeked.ok(), Some(sfl));
        let mut buf = Vec::new();
        assert!(sfl.write_to(&mut buf) <= cur.position());
    }
});
