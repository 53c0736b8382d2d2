//! Loading command input from a file or stdin.

use anyhow::{Context, Result};
use hailtext::TextBuffer;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Text read for a command, along with where it came from.
pub struct Input {
    /// Display name used in diagnostics.
    pub name: String,
    /// Bytes read from the source, before any NUL handling.
    pub raw_len: usize,
    /// The text, ending at the first NUL.
    pub text: TextBuffer<'static>,
}

/// Read `path`, or stdin when `path` is `None` or `-`.
pub fn read(path: Option<&Path>) -> Result<Input> {
    let (name, raw) = match path {
        Some(p) if p != Path::new("-") => {
            let raw = fs::read(p).with_context(|| format!("failed to read {}", p.display()))?;
            (p.to_string_lossy().into_owned(), raw)
        }
        _ => {
            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .context("failed to read from stdin")?;
            ("<stdin>".to_string(), raw)
        }
    };

    let raw_len = raw.len();
    let text = TextBuffer::from_bytes(raw);
    tracing::debug!(input = %name, bytes = raw_len, "loaded input");

    if text.len() < raw_len {
        tracing::warn!(
            input = %name,
            offset = text.len(),
            ignored = raw_len - text.len(),
            "input contains a NUL byte; ignoring the rest"
        );
    }

    Ok(Input {
        name,
        raw_len,
        text,
    })
}

/// Returns `true` if `err` was caused by an I/O failure.
pub fn is_io_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<io::Error>())
}
