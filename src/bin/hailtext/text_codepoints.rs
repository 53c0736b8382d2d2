//! CLI handler for the `codepoints` command.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::diagnostic::{self, ColorScheme};
use crate::exit_codes;
use crate::input;

/// List every codepoint in a text file with its byte offset.
#[derive(Debug, Parser)]
pub struct CodepointsArgs {
    /// Input file (reads from stdin if omitted or `-`)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One aligned line per codepoint
    Text,
    /// One JSON object per line
    Json,
}

/// A decoded codepoint and where it came from.
#[derive(Debug, Serialize)]
struct Record {
    offset: usize,
    len: usize,
    codepoint: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    char: Option<char>,
}

impl Record {
    fn render_text(&self) -> String {
        let shown = match self.char {
            Some(c) if !c.is_control() => c.to_string(),
            _ => String::from("-"),
        };
        format!(
            "{:>8}  {}  U+{:04X}  {}",
            self.offset, self.len, self.codepoint, shown
        )
    }
}

/// Run the codepoints command.
pub fn run(args: CodepointsArgs) -> Result<i32> {
    let input = input::read(args.file.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut chars = input.text.codepoints();
    let mut count = 0usize;
    let failure = loop {
        let offset = chars.position();
        let Some(item) = chars.next() else {
            break None;
        };
        let codepoint = match item {
            Ok(cp) => cp,
            Err(err) => break Some(err),
        };
        let record = Record {
            offset,
            len: chars.position() - offset,
            codepoint,
            char: char::from_u32(codepoint),
        };
        write_record(&mut out, &record, args.format)?;
        count += 1;
    };
    out.flush()?;

    tracing::info!(
        input = %input.name,
        bytes = input.raw_len,
        codepoints = count,
        "listed codepoints"
    );

    match failure {
        None => Ok(exit_codes::SUCCESS),
        Some(err) => {
            if !args.quiet {
                let scheme = ColorScheme::from_flags(args.color, args.no_color);
                diagnostic::print_decode_error(&err, input.text.as_bytes(), &input.name, &scheme);
            }
            Ok(exit_codes::INVALID)
        }
    }
}

fn write_record(out: &mut impl Write, record: &Record, format: FormatArg) -> Result<()> {
    match format {
        FormatArg::Text => writeln!(out, "{}", record.render_text())?,
        FormatArg::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(offset: usize, codepoint: u32) -> Record {
        Record {
            offset,
            len: hailtext::text::utf8::encoded_len(codepoint).unwrap(),
            codepoint,
            char: char::from_u32(codepoint),
        }
    }

    #[test]
    fn text_rendering() {
        assert_eq!(record(0, 0x41).render_text(), "       0  1  U+0041  A");
        assert_eq!(record(12, 0x1F60A).render_text(), "      12  4  U+1F60A  😊");
        assert_eq!(record(3, 0x0A).render_text(), "       3  1  U+000A  -");
    }

    #[test]
    fn json_rendering() {
        let mut out = Vec::new();
        write_record(&mut out, &record(1, 0x20AC), FormatArg::Json).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"offset\":1,\"len\":3,\"codepoint\":8364,\"char\":\"€\"}\n"
        );
    }

    #[test]
    fn json_omits_non_scalar_char() {
        let mut out = Vec::new();
        write_record(&mut out, &record(0, 0xD800), FormatArg::Json).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"offset\":0,\"len\":3,\"codepoint\":55296}\n"
        );
    }
}
