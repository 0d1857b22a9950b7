#![no_main]

use arbitrary::Arbitrary;
use bej_decoder::{BejDecoder, DecoderConfig};
use bej_dictionary::Dictionary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    dictionary: Vec<u8>,
    payload: Vec<u8>,
}

// Fuzz target: full decoder entry point against an arbitrary dictionary.
//
// Catches bugs in:
// - Header and schema class validation
// - Set/Array recursion and the depth limit
// - Scope resolution through corrupt or hostile dictionaries
// - Scalar length checks, Real length accounting
// - Annotation skipping by declared length
fuzz_target!(|input: Input| {
    let Ok(dict) = Dictionary::load(input.dictionary) else {
        return;
    };
    let config = DecoderConfig {
        max_depth: 32,
        ..DecoderConfig::default()
    };
    let decoder = BejDecoder::with_config(&dict, config);

    let mut streamed = Vec::new();
    let streamed_ok = decoder.decode_to_writer(&input.payload, &mut streamed).is_ok();
    match decoder.decode_to_string(&input.payload) {
        Ok(json) => {
            assert!(streamed_ok);
            assert_eq!(json.as_bytes(), streamed.as_slice());
        }
        Err(_) => assert!(!streamed_ok),
    }
});
