//! CLI handler for the `encode` command.

use anyhow::{Context, Result};
use clap::Parser;
use hailtext::text::sink::Utf8Sink;
use hailtext::encode_code_point;
use std::io::{self, Write};

use crate::exit_codes;

/// Encode codepoints as UTF-8.
#[derive(Debug, Parser)]
pub struct EncodeArgs {
    /// Codepoints to encode: U+20AC, 0x20AC, 8364, or a single character
    #[arg(required = true, value_parser = parse_codepoint)]
    pub codepoints: Vec<u32>,

    /// Write the raw UTF-8 bytes instead of a hex listing
    #[arg(long)]
    pub raw: bool,
}

/// Parse a codepoint argument like "U+1F60A", "0x1F60A", "128522" or "😊".
fn parse_codepoint(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();

    let hex = trimmed
        .strip_prefix("U+")
        .or_else(|| trimmed.strip_prefix("u+"))
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"));
    if let Some(digits) = hex {
        return u32::from_str_radix(digits, 16)
            .map_err(|_| format!("Invalid hex codepoint: '{}'", s));
    }

    if let Ok(value) = trimmed.parse::<u32>() {
        return Ok(value);
    }

    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(u32::from(c)),
        _ => Err(format!(
            "Invalid codepoint: '{}'. Use a form like 'U+20AC', '0x20AC', '8364' or a single character",
            s
        )),
    }
}

/// Run the encode command.
pub fn run(args: EncodeArgs) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for &cp in &args.codepoints {
        if let Err(err) = encode_code_point(cp) {
            eprintln!("error: {}", err);
            return Ok(exit_codes::INVALID);
        }
    }

    if args.raw {
        let mut sink = Utf8Sink::new(out);
        for &cp in &args.codepoints {
            sink.write_codepoint(cp)?;
        }
        sink.flush()?;
        tracing::debug!(bytes = sink.bytes_written(), "wrote raw UTF-8");
    } else {
        for &cp in &args.codepoints {
            writeln!(out, "{}", describe(cp)?).context("failed to write to stdout")?;
        }
        out.flush()?;
    }

    Ok(exit_codes::SUCCESS)
}

/// "U+20AC  E2 82 AC"
fn describe(cp: u32) -> Result<String> {
    let encoded = encode_code_point(cp)?;
    let hex: Vec<String> = encoded.iter().map(|b| format!("{:02X}", b)).collect();
    Ok(format!("U+{:04X}  {}", cp, hex.join(" ")))
}
