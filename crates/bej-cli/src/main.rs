/// BEJ command-line tool: decode, validate, and inspect Binary Encoded
/// JSON payloads and the schema dictionaries that describe them.
///
/// # Command overview
///
/// ```text
/// bej <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Render a BEJ payload as JSON
///   validate   Check that a BEJ payload decodes against a dictionary
///   dict       Print a schema dictionary's header and entry tree
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder diagnostics (schema fallbacks, skipped
///                    annotations) to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                            |
/// |------|----------------------------------------------------|
/// | 0    | Success                                            |
/// | 1    | Error (I/O failure, corrupt dictionary, bad BEJ)   |
///
/// All error details and logs are written to stderr so stdout can be piped
/// cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_dict;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The BEJ (Binary Encoded JSON) command-line tool.
#[derive(Parser)]
#[command(name = "bej", version, about = "Binary Encoded JSON decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder diagnostics at debug level. `RUST_LOG` overrides this.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Render a BEJ payload as pretty-printed JSON.
    Decode(DecodeArgs),
    /// Check that a BEJ payload decodes cleanly against a dictionary.
    Validate(ValidateArgs),
    /// Print a schema dictionary's header and entry tree.
    Dict(DictArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `bej decode`.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Flag             │ Effect                                           │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ -s / --schema    │ major schema dictionary (required)               │
/// │ -b / --bej       │ BEJ payload (required)                           │
/// │ -o / --output    │ write JSON to this file instead of stdout        │
/// │ --max-depth N    │ nesting limit (default 64)                       │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// Nothing is written unless the whole payload decodes.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the major schema dictionary.
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Path to the BEJ payload.
    #[arg(short = 'b', long = "bej")]
    pub payload: PathBuf,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum Set/Array nesting depth.
    #[arg(long, default_value_t = bej_decoder::config::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Arguments for `bej validate`.
///
/// Performs a full decode into a sink and reports either a set of success
/// checkmarks or a diagnostic error. Exits 0 on success, 1 on any failure.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the major schema dictionary.
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Path to the BEJ payload.
    #[arg(short = 'b', long = "bej")]
    pub payload: PathBuf,

    /// Maximum Set/Array nesting depth.
    #[arg(long, default_value_t = bej_decoder::config::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Arguments for `bej dict`.
#[derive(clap::Args)]
pub struct DictArgs {
    /// Path to the schema dictionary.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = DictFormat::Text)]
    pub format: DictFormat,

    /// Stop descending below this depth. Guards against cyclic child
    /// pointers.
    #[arg(long, default_value_t = bej_decoder::config::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DictFormat {
    /// Indented tree, one entry per line.
    Text,
    /// JSON document with the header and a flat entry list.
    Json,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Dict(args) => cmd_dict::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins; otherwise `warn`, or
/// `debug` for the bej crates with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,bej_decoder=debug,bej_dictionary=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}
