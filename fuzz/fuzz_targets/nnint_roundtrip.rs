#![no_main]

use bej_wire::nnint::{encode_nnint, encode_signed_nnint, read_nnint, read_signed_nnint};
use bej_wire::ByteCursor;
use libfuzzer_sys::fuzz_target;

// Fuzz target: nnint encode->decode roundtrip.
//
// Takes 8 bytes of fuzz input, interprets them as both a u64 and an i64,
// encodes each in shortest form, decodes, and asserts the value and the
// consumed length match.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let raw: [u8; 8] = data[..8].try_into().unwrap();

    let value = u64::from_le_bytes(raw);
    let mut buf = Vec::new();
    let written = encode_nnint(value, &mut buf);
    let mut cur = ByteCursor::new(&buf);
    assert_eq!(read_nnint(&mut cur).unwrap(), value);
    assert_eq!(cur.position(), written);

    let value = i64::from_le_bytes(raw);
    let mut buf = Vec::new();
    let written = encode_signed_nnint(value, &mut buf);
    let mut cur = ByteCursor::new(&buf);
    assert_eq!(read_signed_nnint(&mut cur).unwrap(), value);
    assert_eq!(cur.position(), written);
});
