#![no_main]

use bej_wire::nnint::{read_nnint, read_signed_nnint};
use bej_wire::ByteCursor;
use libfuzzer_sys::fuzz_target;

// Fuzz target: nnint parsing, unsigned and signed.
//
// Catches bugs in:
// - Count bytes above 8
// - Truncated value bytes
// - Sign extension of short values
fuzz_target!(|data: &[u8]| {
    let mut cur = ByteCursor::new(data);
    if read_nnint(&mut cur).is_ok() {
        assert!(cur.position() <= 9);
    }

    let mut cur = ByteCursor::new(data);
    let _ = read_signed_nnint(&mut cur);
});
