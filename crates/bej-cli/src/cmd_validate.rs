/// Implementation of `bej validate`.
///
/// Loads the dictionary and performs a full decode of the payload into a
/// sink, then reports either a series of success checkmarks (`✓`) or a
/// diagnostic failure line (`✗`).
///
/// # Success output
///
/// ```text
/// ✓ Dictionary: 42 entries (schema version 0xF1F0F000)
/// ✓ Header: BEJ v1.0.F0.F1, major schema
/// ✓ Payload: 187 bytes decoded
/// ✓ Trailing: none
/// ```
///
/// Trailing bytes after the root value do not fail validation; they are
/// reported with a `!` line instead.
///
/// # Failure output
///
/// ```text
/// ✗ Error: truncated input at offset 93: needed 4 bytes, 1 available
/// ```
use std::io;

use anyhow::{Result, anyhow};
use bej_decoder::{BejDecoder, DecoderConfig};
use bej_wire::SchemaClass;

use crate::ValidateArgs;
use crate::cmd_decode::{load_dictionary, read_payload};

/// Run the `bej validate` command.
///
/// # Errors
///
/// Returns an error if either file cannot be read or the dictionary is
/// corrupt. A payload that fails to decode prints a `✗` line to stdout
/// and also returns `Err`, which the main dispatcher turns into exit
/// code 1.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let dictionary = load_dictionary(&args.schema)?;
    let payload = read_payload(&args.payload)?;

    println!(
        "✓ Dictionary: {} entr{} (schema version 0x{:08X})",
        dictionary.len(),
        if dictionary.len() == 1 { "y" } else { "ies" },
        dictionary.header().schema_version
    );

    let config = DecoderConfig {
        max_depth: args.max_depth,
        ..DecoderConfig::default()
    };
    match BejDecoder::with_config(&dictionary, config).decode_to_writer(&payload, io::sink()) {
        Ok(outcome) => {
            let v = outcome.header.version;
            println!(
                "✓ Header: BEJ v{:X}.{:X}.{:X}.{:X}, {} schema",
                v[3],
                v[2],
                v[1],
                v[0],
                match outcome.header.schema_class {
                    SchemaClass::Major => "major",
                    SchemaClass::Annotation => "annotation",
                }
            );
            println!("✓ Payload: {} bytes decoded", outcome.consumed);
            if outcome.trailing == 0 {
                println!("✓ Trailing: none");
            } else {
                println!(
                    "! Trailing: {} byte{} after the root value",
                    outcome.trailing,
                    if outcome.trailing == 1 { "" } else { "s" }
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = ?e, "payload failed validation");
            println!("✗ Error: {e}");
            Err(anyhow!("validation failed"))
        }
    }
}
