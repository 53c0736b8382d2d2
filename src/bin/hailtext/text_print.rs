//! CLI handler for the `print` command.

use anyhow::Result;
use clap::Parser;
use hailtext::text::sink::{SinkError, Utf8Sink};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::diagnostic::{self, ColorScheme};
use crate::exit_codes;
use crate::input;

/// Print a text file one decoded codepoint at a time.
#[derive(Debug, Parser)]
pub struct PrintArgs {
    /// Input file (reads from stdin if omitted or `-`)
    pub file: Option<PathBuf>,

    /// Do not append a trailing newline
    #[arg(short = 'n', long)]
    pub no_newline: bool,

    /// Quiet mode: no diagnostics on decode errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// Run the print command.
pub fn run(args: PrintArgs) -> Result<i32> {
    let input = input::read(args.file.as_deref())?;
    let stdout = io::stdout();
    let mut sink = Utf8Sink::new(stdout.lock());

    let written = if args.no_newline {
        sink.write_text(&input.text)
    } else {
        sink.write_line(&input.text)
    };

    match written {
        Ok(count) => {
            sink.flush()?;
            tracing::info!(input = %input.name, codepoints = count, "printed");
            Ok(exit_codes::SUCCESS)
        }
        Err(SinkError::Decode(err)) => {
            // Terminate the partial line before the diagnostic
            let mut out = sink.into_inner();
            writeln!(out)?;
            out.flush()?;
            if !args.quiet {
                let scheme = ColorScheme::from_flags(args.color, args.no_color);
                diagnostic::print_decode_error(&err, input.text.as_bytes(), &input.name, &scheme);
            }
            Ok(exit_codes::INVALID)
        }
        Err(err) => Err(err.into()),
    }
}
