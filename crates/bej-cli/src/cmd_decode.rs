/// Implementation of `bej decode`.
///
/// Loads the schema dictionary, decodes the BEJ payload against it, and
/// writes the pretty-printed JSON to stdout or to `-o <file>`.
///
/// The JSON is buffered in full before anything is written, so a payload
/// that fails half way leaves neither a partial file nor partial stdout.
///
/// # Example
///
/// ```text
/// $ bej decode -s Thermal_v1.bin -b thermal.bej
/// {
///   "Fans": [
///     {
///       "Name": "Fan1",
///       "Reading": 4200
///     }
///   ],
///   "Status": "Enabled"
/// }
/// ```
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use bej_decoder::{BejDecoder, DecoderConfig};
use bej_dictionary::Dictionary;
use tracing::debug;

use crate::DecodeArgs;

/// Run the `bej decode` command.
///
/// # Errors
///
/// Returns an error if either input cannot be read, the dictionary is
/// corrupt, the payload fails to decode, or the output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let dictionary = load_dictionary(&args.schema)?;
    let payload = read_payload(&args.payload)?;

    let config = DecoderConfig {
        max_depth: args.max_depth,
        ..DecoderConfig::default()
    };
    let json = BejDecoder::with_config(&dictionary, config)
        .decode_to_string(&payload)
        .with_context(|| format!("failed to decode {}", args.payload.display()))?;

    if let Some(path) = &args.output {
        fs::write(path, json.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(json.as_bytes())
            .context("cannot write to stdout")?;
        handle.write_all(b"\n").context("cannot write to stdout")?;
    }

    Ok(())
}

/// Read and load a schema dictionary, naming the file in any error.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a well-formed
/// dictionary.
pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read dictionary");
    Dictionary::load(bytes).with_context(|| format!("cannot load dictionary {}", path.display()))
}

/// Read a BEJ payload, naming the file in any error.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    let payload = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    debug!(path = %path.display(), bytes = payload.len(), "read payload");
    Ok(payload)
}
