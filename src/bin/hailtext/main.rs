//! Hailtext CLI tool for decoding and re-encoding UTF-8 text.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod diagnostic;
mod input;
mod text_codepoints;
mod text_encode;
mod text_print;

#[derive(Debug, Parser)]
#[command(name = "hailtext")]
#[command(about = "UTF-8 text decoding toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a text file one decoded codepoint at a time
    Print(text_print::PrintArgs),
    /// List the codepoints of a text file with their byte offsets
    Codepoints(text_codepoints::CodepointsArgs),
    /// Encode codepoints as UTF-8
    Encode(text_encode::EncodeArgs),
}

/// Exit codes shared by all commands.
pub mod exit_codes {
    /// Command succeeded.
    pub const SUCCESS: i32 = 0;
    /// Input could not be decoded or encoded.
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(command = ?cli.command, "starting");

    let result = match cli.command {
        Command::Print(args) => text_print::run(args),
        Command::Codepoints(args) => text_codepoints::run(args),
        Command::Encode(args) => text_encode::run(args),
    };

    let code = match result {
        Ok(code) => code,
        Err(err) if input::is_io_error(&err) => {
            eprintln!("error: {:#}", err);
            exit_codes::IO_ERROR
        }
        Err(err) => return Err(err),
    };

    std::process::exit(code);
}
