//! Fixture generator for manual CLI runs and external decoders.
//!
//! Writes each canned schema/payload pair under `fixtures/<name>/` along
//! with the JSON this workspace's decoder renders for it, so other BEJ
//! implementations can be diffed against the same inputs.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_fixtures -p bej-tests
//! bej decode -s fixtures/thermal/dictionary.bin -b fixtures/thermal/payload.bej
//! ```
//!
//! # Generated fixtures
//!
//! | Directory          | Contents                                          |
//! |--------------------|---------------------------------------------------|
//! | thermal            | Thermal resource, every decodable format          |
//! | empty              | Root set with no members                          |
//! | degraded           | Unknown member, unknown enum value, annotation    |
//! | trailing_data      | Thermal payload + 4 trailing zero bytes           |

#![allow(clippy::pedantic)]

use std::path::Path;

use bej_decoder::decode_to_json;
use bej_tests::{DictionaryBuilder, Member, PayloadBuilder, Value, member, thermal};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir.join("fixtures");

    let schema = thermal::schema();
    write_fixture(&root.join("thermal"), &schema, &thermal::payload());
    write_fixture(&root.join("empty"), &schema, &PayloadBuilder::new(Value::set([])));
    write_fixture(&root.join("degraded"), &schema, &degraded());
    write_fixture(
        &root.join("trailing_data"),
        &schema,
        &thermal::payload().trailing(&[0; 4]),
    );

    println!("All fixtures written to {}", root.display());
}

fn degraded() -> PayloadBuilder {
    PayloadBuilder::new(Value::set([
        Member::annotation(0, Value::string("/redfish/v1/Chassis/1/Thermal")),
        member(1, Value::string("Thermal")),
        member(
            0,
            Value::array([Value::set([
                member(1, Value::string("Fan0")),
                member(3, Value::Enum(7)),
                member(12, Value::Integer(-40)),
            ])]),
        ),
        member(99, Value::real(1, 1, 25, 0)),
    ]))
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_fixture(dir: &Path, schema: &DictionaryBuilder, payload: &PayloadBuilder) {
    let dictionary = schema.build();
    let payload = payload.build();
    let json = decode_to_json(&payload, &schema.load())
        .unwrap_or_else(|e| panic!("fixture {} does not decode: {e}", dir.display()));

    write_file(&dir.join("dictionary.bin"), &dictionary);
    write_file(&dir.join("payload.bej"), &payload);
    write_file(&dir.join("expected.json"), format!("{json}\n").as_bytes());
}

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}
