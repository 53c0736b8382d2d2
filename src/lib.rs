//! # Hailtext
//!
//! Minimal UTF-8 text for the hail toolchain.
//!
//! This crate provides a byte buffer that owns or borrows its storage and a
//! cursor that decodes it into Unicode codepoints on demand, plus the
//! matching encoder for writing codepoints back out.
//!
//! ## Module Organization
//!
//! - [`text`] - Text buffers, codepoint iteration, UTF-8 encode/decode
//!
//! ## Quick Start
//!
//! ```
//! use hailtext::TextBuffer;
//!
//! let text = TextBuffer::from_bytes("Hello, world! 😊\0".as_bytes().to_vec());
//! assert_eq!(text.len(), 18);
//!
//! let mut chars = text.codepoints();
//! assert_eq!(chars.next(), Some(Ok('H' as u32)));
//! assert_eq!(chars.last(), Some(Ok(0x1F60A)));
//! ```
//!
//! ## Features
//!
//! - `std` (default) - File loading and the `io::Write` character sink
//! - `serde` - Serialization of the error types
//! - `cli` - The `hailtext` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Text buffers, codepoint iteration and UTF-8 encoding.
pub mod text;

// Core types
pub use text::{Codepoints, DecodeError, DecodeErrorKind, EncodeError, TextBuffer, TextError};
pub use text::{decode_code_point, encode_code_point};

#[cfg(feature = "std")]
pub use text::{SinkError, Utf8Sink};
