//! UTF-8 sequence decoding and encoding.
//!
//! This module holds the bit-level UTF-8 logic shared by the codepoint
//! iterator and the character sink:
//! - Classifying a lead byte into a sequence length
//! - Reassembling a multi-byte sequence into a codepoint
//! - Encoding a codepoint back into 1-4 bytes
//!
//! ## UTF-8 Encoding Rules
//!
//! | Bytes | First byte    | Continuation bytes | Value bits |
//! |-------|---------------|--------------------|------------|
//! | 1     | `0xxxxxxx`    | -                  | 7          |
//! | 2     | `110xxxxx`    | `10xxxxxx`         | 11         |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2     | 16         |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3     | 21         |
//!
//! ## What Is (Not) Checked
//!
//! The decoder trusts its input the way a lexer trusts a file that was
//! validated on load. It checks only what it needs to stay in bounds:
//! 1. **Lead byte**: must match one of the four patterns above
//! 2. **Length**: every continuation byte must lie inside the input
//!
//! Continuation bytes are masked to their low 6 bits without checking the
//! `10` marker, and overlong forms, surrogates and values above U+10FFFF
//! decode to whatever their bits say.

use alloc::string::String;

/// Largest value a 4-byte sequence can carry (21 bits).
pub const MAX_ENCODABLE: u32 = 0x1F_FFFF;

/// Error information for a failed decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeError {
    /// The byte offset of the offending lead byte (0-indexed).
    pub offset: usize,
    /// The lead byte found at `offset`.
    pub lead: u8,
    /// The kind of decode failure.
    pub kind: DecodeErrorKind,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} (byte 0x{:02X}) at byte {}",
            self.kind, self.lead, self.offset
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// The specific type of decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeErrorKind {
    /// The byte matches none of the four lead-byte patterns.
    /// Continuation bytes (0x80-0xBF) and 0xF8-0xFF land here.
    InvalidLeadByte,

    /// The lead byte announces more continuation bytes than remain in the input.
    TruncatedSequence,
}

impl core::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
        }
    }
}

/// A codepoint too large for a 4-byte UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodeError {
    /// The rejected codepoint.
    pub codepoint: u32,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "code point 0x{:X} exceeds the UTF-8 range (maximum 0x{:X})",
            self.codepoint, MAX_ENCODABLE
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Get the expected sequence length from a lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes or 0xF8+).
#[inline]
pub fn sequence_length(lead_byte: u8) -> usize {
    match lead_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

/// Decode one codepoint from the start of `input`.
///
/// On success, returns the decoded codepoint and the number of bytes consumed,
/// which is determined by the lead byte alone. Empty input is reported as a
/// truncated sequence.
///
/// # Examples
///
/// ```
/// use hailtext::text::utf8::{decode_code_point, DecodeErrorKind};
///
/// assert_eq!(decode_code_point(b"A"), Ok((0x41, 1)));
/// assert_eq!(decode_code_point(&[0xE2, 0x82, 0xAC]), Ok((0x20AC, 3)));
///
/// assert_eq!(decode_code_point(&[0x80]), Err(DecodeErrorKind::InvalidLeadByte));
/// assert_eq!(decode_code_point(&[0xE2, 0x82]), Err(DecodeErrorKind::TruncatedSequence));
/// ```
pub fn decode_code_point(input: &[u8]) -> Result<(u32, usize), DecodeErrorKind> {
    let Some(&lead) = input.first() else {
        return Err(DecodeErrorKind::TruncatedSequence);
    };

    let len = sequence_length(lead);
    if len == 0 {
        return Err(DecodeErrorKind::InvalidLeadByte);
    }
    if input.len() < len {
        return Err(DecodeErrorKind::TruncatedSequence);
    }

    let cp = match len {
        1 => lead as u32,
        2 => ((lead as u32 & 0x1F) << 6) | payload(input[1]),
        3 => ((lead as u32 & 0x0F) << 12) | (payload(input[1]) << 6) | payload(input[2]),
        _ => {
            ((lead as u32 & 0x07) << 18)
                | (payload(input[1]) << 12)
                | (payload(input[2]) << 6)
                | payload(input[3])
        }
    };

    Ok((cp, len))
}

/// Low 6 bits of a continuation byte.
#[inline(always)]
fn payload(byte: u8) -> u32 {
    byte as u32 & 0x3F
}

/// A codepoint encoded as 1-4 UTF-8 bytes.
///
/// Dereferences to the encoded bytes. There is no trailing NUL; callers that
/// need one append it themselves.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedCodepoint {
    bytes: [u8; 4],
    len: u8,
}

impl EncodedCodepoint {
    /// The encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of encoded bytes (1-4).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false`; every codepoint encodes to at least one byte.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::ops::Deref for EncodedCodepoint {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for EncodedCodepoint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl core::fmt::Debug for EncodedCodepoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("EncodedCodepoint")
            .field(&self.as_bytes())
            .finish()
    }
}

/// Number of bytes `cp` encodes to, or `None` above [`MAX_ENCODABLE`].
#[inline]
pub fn encoded_len(cp: u32) -> Option<usize> {
    match cp {
        0..=0x7F => Some(1),
        0x80..=0x7FF => Some(2),
        0x800..=0xFFFF => Some(3),
        0x1_0000..=MAX_ENCODABLE => Some(4),
        _ => None,
    }
}

/// Encode a codepoint as UTF-8.
///
/// Any value below 0x200000 is accepted, including surrogates and values
/// above U+10FFFF, so everything the decoder can produce encodes back to the
/// same bytes.
///
/// # Examples
///
/// ```
/// use hailtext::text::utf8::encode_code_point;
///
/// // ASCII
/// assert_eq!(encode_code_point(0x41).unwrap().as_bytes(), b"A");
///
/// // 2-byte character (é)
/// assert_eq!(encode_code_point(0xE9).unwrap().as_bytes(), "é".as_bytes());
///
/// // 4-byte character (😊)
/// assert_eq!(encode_code_point(0x1F60A).unwrap().as_bytes(), "😊".as_bytes());
///
/// // Out of range
/// assert!(encode_code_point(0x20_0000).is_err());
/// ```
pub fn encode_code_point(cp: u32) -> Result<EncodedCodepoint, EncodeError> {
    let len = encoded_len(cp).ok_or(EncodeError { codepoint: cp })?;
    let mut bytes = [0u8; 4];

    match len {
        1 => {
            bytes[0] = cp as u8;
        }
        2 => {
            bytes[0] = 0xC0 | ((cp >> 6) as u8);
            bytes[1] = 0x80 | ((cp & 0x3F) as u8);
        }
        3 => {
            bytes[0] = 0xE0 | ((cp >> 12) as u8);
            bytes[1] = 0x80 | (((cp >> 6) & 0x3F) as u8);
            bytes[2] = 0x80 | ((cp & 0x3F) as u8);
        }
        _ => {
            bytes[0] = 0xF0 | ((cp >> 18) as u8);
            bytes[1] = 0x80 | (((cp >> 12) & 0x3F) as u8);
            bytes[2] = 0x80 | (((cp >> 6) & 0x3F) as u8);
            bytes[3] = 0x80 | ((cp & 0x3F) as u8);
        }
    }

    Ok(EncodedCodepoint {
        bytes,
        len: len as u8,
    })
}

/// Format a byte as a human-readable string for error messages.
pub fn format_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        alloc::format!("0x{:02X} ({:?})", byte, byte as char)
    } else {
        alloc::format!("0x{:02X}", byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Sequence Length Tests
    // =========================================================================

    mod sequence_length_tests {
        use super::*;

        #[test]
        fn ascii_length() {
            for byte in 0x00..=0x7F {
                assert_eq!(sequence_length(byte), 1);
            }
        }

        #[test]
        fn continuation_length() {
            for byte in 0x80..=0xBF {
                assert_eq!(sequence_length(byte), 0);
            }
        }

        #[test]
        fn multi_byte_lengths() {
            assert_eq!(sequence_length(0xC0), 2);
            assert_eq!(sequence_length(0xDF), 2);
            assert_eq!(sequence_length(0xE0), 3);
            assert_eq!(sequence_length(0xEF), 3);
            assert_eq!(sequence_length(0xF0), 4);
            assert_eq!(sequence_length(0xF7), 4);
        }

        #[test]
        fn invalid_lead_length() {
            for byte in 0xF8..=0xFF {
                assert_eq!(sequence_length(byte), 0);
            }
        }
    }

    // =========================================================================
    // Decode Tests
    // =========================================================================

    mod decode {
        use super::*;

        #[test]
        fn ascii() {
            assert_eq!(decode_code_point(b"A"), Ok((0x41, 1)));
            assert_eq!(decode_code_point(b"\x00"), Ok((0x00, 1)));
            assert_eq!(decode_code_point(b"\x7F"), Ok((0x7F, 1)));
        }

        #[test]
        fn two_byte() {
            assert_eq!(decode_code_point(&[0xC2, 0x80]), Ok((0x80, 2)));
            assert_eq!(decode_code_point(&[0xDF, 0xBF]), Ok((0x7FF, 2)));
            assert_eq!(decode_code_point("é".as_bytes()), Ok((0xE9, 2)));
        }

        #[test]
        fn three_byte() {
            assert_eq!(decode_code_point(&[0xE0, 0xA0, 0x80]), Ok((0x800, 3)));
            assert_eq!(decode_code_point(&[0xE2, 0x82, 0xAC]), Ok((0x20AC, 3)));
            assert_eq!(decode_code_point("日".as_bytes()), Ok((0x65E5, 3)));
        }

        #[test]
        fn four_byte() {
            assert_eq!(
                decode_code_point(&[0xF0, 0x9F, 0x98, 0x8A]),
                Ok((0x1F60A, 4))
            );
            assert_eq!(
                decode_code_point(&[0xF4, 0x8F, 0xBF, 0xBF]),
                Ok((0x10FFFF, 4))
            );
        }

        #[test]
        fn only_leading_bytes_are_consumed() {
            // Trailing input is left for the next step
            assert_eq!(decode_code_point(b"AB"), Ok((0x41, 1)));
            assert_eq!(decode_code_point(&[0xC3, 0xA9, b'x']), Ok((0xE9, 2)));
        }

        #[test]
        fn continuation_marker_not_checked() {
            // 0x41 is not a continuation byte, but only its low 6 bits are used
            assert_eq!(decode_code_point(&[0xC2, 0x41]), Ok((0x81, 2)));
        }

        #[test]
        fn overlong_and_out_of_range_decode_by_bits() {
            assert_eq!(decode_code_point(&[0xC0, 0x80]), Ok((0x00, 2)));
            assert_eq!(
                decode_code_point(&[0xF7, 0xBF, 0xBF, 0xBF]),
                Ok((MAX_ENCODABLE, 4))
            );
        }

        #[test]
        fn invalid_lead() {
            assert_eq!(
                decode_code_point(&[0x80]),
                Err(DecodeErrorKind::InvalidLeadByte)
            );
            assert_eq!(
                decode_code_point(&[0xBF, 0x80]),
                Err(DecodeErrorKind::InvalidLeadByte)
            );
            for byte in 0xF8..=0xFF {
                assert_eq!(
                    decode_code_point(&[byte, 0x80, 0x80, 0x80]),
                    Err(DecodeErrorKind::InvalidLeadByte),
                    "byte 0x{:02X} should be rejected",
                    byte
                );
            }
        }

        #[test]
        fn truncated() {
            assert_eq!(decode_code_point(b""), Err(DecodeErrorKind::TruncatedSequence));
            assert_eq!(
                decode_code_point(&[0xC2]),
                Err(DecodeErrorKind::TruncatedSequence)
            );
            assert_eq!(
                decode_code_point(&[0xE2, 0x82]),
                Err(DecodeErrorKind::TruncatedSequence)
            );
            assert_eq!(
                decode_code_point(&[0xF0, 0x9F, 0x98]),
                Err(DecodeErrorKind::TruncatedSequence)
            );
        }
    }

    // =========================================================================
    // Encode Tests
    // =========================================================================

    mod encode {
        use super::*;

        #[test]
        fn ascii() {
            assert_eq!(encode_code_point(0x41).unwrap().as_bytes(), b"A");
            assert_eq!(encode_code_point(0x00).unwrap().as_bytes(), b"\x00");
            assert_eq!(encode_code_point(0x7F).unwrap().len(), 1);
        }

        #[test]
        fn two_byte() {
            assert_eq!(encode_code_point(0x80).unwrap().as_bytes(), &[0xC2, 0x80]);
            assert_eq!(encode_code_point(0x7FF).unwrap().as_bytes(), &[0xDF, 0xBF]);
        }

        #[test]
        fn three_byte() {
            assert_eq!(
                encode_code_point(0x800).unwrap().as_bytes(),
                &[0xE0, 0xA0, 0x80]
            );
            assert_eq!(
                encode_code_point(0x20AC).unwrap().as_bytes(),
                &[0xE2, 0x82, 0xAC]
            );
        }

        #[test]
        fn four_byte() {
            assert_eq!(
                encode_code_point(0x10000).unwrap().as_bytes(),
                &[0xF0, 0x90, 0x80, 0x80]
            );
            assert_eq!(
                encode_code_point(0x1F60A).unwrap().as_bytes(),
                &[0xF0, 0x9F, 0x98, 0x8A]
            );
        }

        #[test]
        fn beyond_unicode_still_encodes() {
            // Surrogates and values past U+10FFFF fit the 21-bit layout
            assert_eq!(
                encode_code_point(0xD800).unwrap().as_bytes(),
                &[0xED, 0xA0, 0x80]
            );
            assert_eq!(
                encode_code_point(MAX_ENCODABLE).unwrap().as_bytes(),
                &[0xF7, 0xBF, 0xBF, 0xBF]
            );
        }

        #[test]
        fn out_of_range() {
            assert_eq!(
                encode_code_point(0x20_0000),
                Err(EncodeError {
                    codepoint: 0x20_0000
                })
            );
            assert!(encode_code_point(u32::MAX).is_err());
        }

        #[test]
        fn encoded_len_boundaries() {
            assert_eq!(encoded_len(0x7F), Some(1));
            assert_eq!(encoded_len(0x80), Some(2));
            assert_eq!(encoded_len(0x7FF), Some(2));
            assert_eq!(encoded_len(0x800), Some(3));
            assert_eq!(encoded_len(0xFFFF), Some(3));
            assert_eq!(encoded_len(0x10000), Some(4));
            assert_eq!(encoded_len(0x20_0000), None);
        }

        #[test]
        fn roundtrip() {
            let test_points = [
                0x01, 0x7F, // ASCII
                0x80, 0x7FF, // 2-byte
                0x800, 0xFFFF, // 3-byte
                0x10000, 0x10FFFF, // 4-byte
            ];

            for cp in test_points {
                let encoded = encode_code_point(cp).unwrap();
                let (decoded, decoded_len) = decode_code_point(&encoded).unwrap();
                assert_eq!(cp, decoded);
                assert_eq!(encoded.len(), decoded_len);
            }
        }
    }

    // =========================================================================
    // Error Display Tests
    // =========================================================================

    mod display {
        use super::*;
        use alloc::string::ToString;

        #[test]
        fn decode_error_message() {
            let err = DecodeError {
                offset: 12,
                lead: 0xFF,
                kind: DecodeErrorKind::InvalidLeadByte,
            };
            assert_eq!(
                err.to_string(),
                "invalid UTF-8 lead byte (byte 0xFF) at byte 12"
            );
        }

        #[test]
        fn encode_error_message() {
            let err = EncodeError {
                codepoint: 0x20_0000,
            };
            assert_eq!(
                err.to_string(),
                "code point 0x200000 exceeds the UTF-8 range (maximum 0x1FFFFF)"
            );
        }

        #[test]
        fn format_byte_printable_and_not() {
            assert_eq!(format_byte(b'A'), "0x41 ('A')");
            assert_eq!(format_byte(0xC3), "0xC3");
        }
    }
}
