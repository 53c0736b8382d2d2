//! UTF-8 text buffers and codepoint decoding.
//!
//! ## Decoding
//!
//! A [`TextBuffer`] owns or borrows its bytes; [`Codepoints`] walks it one
//! codepoint at a time, reporting bad lead bytes and truncated sequences
//! with the byte offset where decoding stopped.
//!
//! ```
//! use hailtext::text::{DecodeErrorKind, TextBuffer};
//!
//! let text = TextBuffer::from("a€");
//! let decoded: Vec<u32> = text.codepoints().map(Result::unwrap).collect();
//! assert_eq!(decoded, [0x61, 0x20AC]);
//!
//! // Bare continuation byte
//! let bad = TextBuffer::borrowed(&[0x80]);
//! let err = bad.codepoints().next().unwrap().unwrap_err();
//! assert_eq!(err.kind, DecodeErrorKind::InvalidLeadByte);
//! assert_eq!(err.offset, 0);
//! ```
//!
//! ## Encoding
//!
//! The [`utf8`] module turns codepoints back into bytes, and (with `std`)
//! the `sink` module writes them to any `io::Write`.

pub mod buffer;
pub mod chars;
#[cfg(feature = "std")]
pub mod sink;
pub mod utf8;

// Re-export commonly used types
pub use buffer::{TextBuffer, TextError};
pub use chars::Codepoints;
#[cfg(feature = "std")]
pub use sink::{SinkError, Utf8Sink};
pub use utf8::{decode_code_point, encode_code_point, DecodeError, DecodeErrorKind, EncodeError};
