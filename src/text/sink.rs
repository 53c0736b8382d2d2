//! Writing decoded codepoints back out as UTF-8.
//!
//! [`Utf8Sink`] re-encodes codepoints one at a time into any
//! [`std::io::Write`]. [`print_codepoint`] and [`println`] target stdout.

use std::io::{self, Write};

use super::buffer::TextBuffer;
use super::utf8::{self, DecodeError, EncodeError};

/// Errors from writing text to a sink.
#[derive(Debug)]
pub enum SinkError {
    /// The text could not be decoded.
    Decode(DecodeError),
    /// A codepoint could not be encoded.
    Encode(EncodeError),
    /// The underlying writer failed.
    Io(io::Error),
}

impl core::fmt::Display for SinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "{}", err),
            Self::Encode(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "write failed: {}", err),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DecodeError> for SinkError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<EncodeError> for SinkError {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// A writer that accepts codepoints and emits their UTF-8 encoding.
///
/// # Examples
///
/// ```
/// use hailtext::{TextBuffer, Utf8Sink};
///
/// let mut sink = Utf8Sink::new(Vec::new());
/// sink.write_codepoint(0x1F60A).unwrap();
/// sink.write_line(&TextBuffer::from(" hi")).unwrap();
///
/// assert_eq!(sink.into_inner(), "😊 hi\n".as_bytes());
/// ```
#[derive(Debug)]
pub struct Utf8Sink<W> {
    inner: W,
    written: usize,
}

impl<W: Write> Utf8Sink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Total bytes written so far.
    #[inline]
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Encode and write a single codepoint. Returns the bytes written.
    pub fn write_codepoint(&mut self, cp: u32) -> Result<usize, SinkError> {
        let encoded = utf8::encode_code_point(cp)?;
        self.inner.write_all(&encoded)?;
        self.written += encoded.len();
        Ok(encoded.len())
    }

    /// Decode `text` and write it codepoint by codepoint.
    ///
    /// Returns the number of codepoints written. On a decode error, the
    /// codepoints before the bad sequence have already been written.
    pub fn write_text(&mut self, text: &TextBuffer<'_>) -> Result<usize, SinkError> {
        let mut count = 0;
        for cp in text.codepoints() {
            self.write_codepoint(cp?)?;
            count += 1;
        }
        Ok(count)
    }

    /// Like [`write_text`](Self::write_text), followed by a newline.
    pub fn write_line(&mut self, text: &TextBuffer<'_>) -> Result<usize, SinkError> {
        let count = self.write_text(text)?;
        self.write_codepoint(u32::from(b'\n'))?;
        Ok(count)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.inner.flush().map_err(SinkError::from)
    }
}

/// Write a single codepoint to stdout.
pub fn print_codepoint(cp: u32) -> Result<(), SinkError> {
    let stdout = io::stdout();
    let mut sink = Utf8Sink::new(stdout.lock());
    sink.write_codepoint(cp)?;
    sink.flush()
}

/// Write `text` and a newline to stdout. Returns the codepoints written.
pub fn println(text: &TextBuffer<'_>) -> Result<usize, SinkError> {
    let stdout = io::stdout();
    let mut sink = Utf8Sink::new(stdout.lock());
    let count = sink.write_line(text)?;
    sink.flush()?;
    Ok(count)
}
