//! Rustc-style reporting of decode errors.

use hailtext::text::utf8::format_byte;
use hailtext::{DecodeError, DecodeErrorKind};

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const LINE_NUM: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
pub struct ColorScheme {
    error: &'static str,
    location: &'static str,
    line_num: &'static str,
    caret: &'static str,
    message: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    pub fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                line_num: colors::LINE_NUM,
                caret: colors::CARET,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                line_num: "",
                caret: "",
                message: "",
                reset: "",
            }
        }
    }

    /// Pick colors from the `--color`/`--no-color` flags, falling back to
    /// whether stderr is a terminal.
    pub fn from_flags(color: bool, no_color: bool) -> Self {
        let use_color = if no_color {
            false
        } else if color {
            true
        } else {
            atty::is(atty::Stream::Stderr)
        };
        Self::new(use_color)
    }
}

/// Line and column (both 1-indexed, column in bytes) of a byte offset.
pub fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

/// Print a formatted error message with context snippet.
pub fn print_decode_error(err: &DecodeError, input: &[u8], name: &str, scheme: &ColorScheme) {
    eprint!("{}", render_decode_error(err, input, name, scheme));
}

/// Render the diagnostic printed by [`print_decode_error`].
pub fn render_decode_error(
    err: &DecodeError,
    input: &[u8],
    name: &str,
    scheme: &ColorScheme,
) -> String {
    let (line, column) = line_column(input, err.offset);
    let mut out = String::new();

    out.push_str(&format!(
        "{}error{}: {} (byte {})\n",
        scheme.error,
        scheme.reset,
        err.kind,
        format_byte(err.lead)
    ));
    out.push_str(&format!(
        "  {}--> {}:{}:{}{}\n",
        scheme.location, name, line, column, scheme.reset
    ));

    let snippet = get_error_snippet(input, err.offset, column);

    // Minimum 3 chars for alignment
    let line_num_width = line.to_string().len().max(3);
    let blank_padding = " ".repeat(line_num_width + 2);

    out.push_str(&format!("{}{}|{}\n", blank_padding, scheme.line_num, scheme.reset));
    out.push_str(&format!(
        " {}{:>width$}{} {}|{} {}\n",
        scheme.line_num,
        line,
        scheme.reset,
        scheme.line_num,
        scheme.reset,
        snippet.line_content,
        width = line_num_width
    ));
    out.push_str(&format!(
        "{}{}|{} {}{}^{}{}\n",
        blank_padding,
        scheme.line_num,
        scheme.reset,
        " ".repeat(snippet.caret_offset),
        scheme.caret,
        scheme.reset,
        format_error_hint(&err.kind, scheme)
    ));
    out.push('\n');
    out
}

/// Format an additional hint for the error kind.
fn format_error_hint(kind: &DecodeErrorKind, scheme: &ColorScheme) -> String {
    let hint = match kind {
        DecodeErrorKind::InvalidLeadByte => "bytes 0x80-0xBF and 0xF8-0xFF cannot start a sequence",
        DecodeErrorKind::TruncatedSequence => "sequence runs past the end of the input",
    };
    format!(" {}{}{}", scheme.message, hint, scheme.reset)
}

/// Information about an error snippet.
struct ErrorSnippet {
    /// The content of the line containing the error.
    line_content: String,
    /// Number of spaces before the caret.
    caret_offset: usize,
}

/// Extract the line containing `offset`, truncated around long lines.
fn get_error_snippet(input: &[u8], offset: usize, column: usize) -> ErrorSnippet {
    let offset = offset.min(input.len());
    let line_start = input[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = input[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |i| offset + i);

    // Everything before the error decoded cleanly, so the caret sits after
    // that many displayed chars; the bad tail is shown lossily.
    let prefix = String::from_utf8_lossy(&input[line_start..offset]);
    let tail = String::from_utf8_lossy(&input[offset..line_end]);
    let error_col = prefix.chars().count();
    let line_content: Vec<char> = prefix.chars().chain(tail.chars()).collect();

    let max_width = 80;
    if line_content.len() <= max_width {
        return ErrorSnippet {
            line_content: line_content.into_iter().collect(),
            caret_offset: error_col,
        };
    }

    tracing::trace!(column, chars = line_content.len(), "truncating long line");

    let text = |range: std::ops::Range<usize>| -> String { line_content[range].iter().collect() };
    if error_col < max_width / 2 {
        ErrorSnippet {
            line_content: format!("{}...", text(0..max_width)),
            caret_offset: error_col,
        }
    } else if error_col >= line_content.len() - max_width / 2 {
        let start = line_content.len() - max_width;
        ErrorSnippet {
            line_content: format!("...{}", text(start..line_content.len())),
            caret_offset: error_col - start + 3,
        }
    } else {
        let start = error_col - max_width / 2;
        let end = (start + max_width).min(line_content.len());
        ErrorSnippet {
            line_content: format!("...{}...", text(start..end)),
            caret_offset: error_col - start + 3,
        }
    }
}
