//! On-demand codepoint iteration over a [`TextBuffer`].

use core::iter::FusedIterator;

use super::buffer::TextBuffer;
use super::utf8::{self, DecodeError};

/// A cursor that decodes one codepoint per step.
///
/// Each call to [`next`](Iterator::next) decodes the sequence starting at
/// [`position`](Codepoints::position) and advances past it. Iteration ends
/// with `None` once the cursor reaches the end of the buffer, so U+0000 is
/// an ordinary item.
///
/// A decode failure is yielded once as `Some(Err(_))`; the iterator is fused
/// afterwards and its position stays on the offending byte.
///
/// The cursor is `Copy`: duplicating it gives an independent reader over the
/// same buffer.
///
/// # Examples
///
/// ```
/// use hailtext::TextBuffer;
///
/// let text = TextBuffer::borrowed(&[b'a', 0xE2, 0x82, 0xAC, 0xF0, 0x9F, 0x98, 0x8A]);
/// let mut chars = text.codepoints();
///
/// assert_eq!(chars.next(), Some(Ok(0x61)));
/// assert_eq!(chars.next(), Some(Ok(0x20AC)));
/// assert_eq!(chars.position(), 4);
/// assert_eq!(chars.next(), Some(Ok(0x1F60A)));
/// assert_eq!(chars.next(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Codepoints<'t> {
    position: usize,
    source: &'t TextBuffer<'t>,
    failed: bool,
}

impl<'t> Codepoints<'t> {
    /// Create a cursor at offset 0 of `source`.
    #[inline]
    pub fn new(source: &'t TextBuffer<'t>) -> Self {
        Self {
            position: 0,
            source,
            failed: false,
        }
    }

    /// Byte offset of the next sequence to decode.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The buffer being decoded.
    #[inline]
    pub fn source(&self) -> &'t TextBuffer<'t> {
        self.source
    }

    /// The bytes not yet decoded.
    #[inline]
    pub fn remaining(&self) -> &'t [u8] {
        &self.source.as_bytes()[self.position..]
    }
}

impl Iterator for Codepoints<'_> {
    type Item = Result<u32, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let rest = self.remaining();
        let &lead = rest.first()?;

        match utf8::decode_code_point(rest) {
            Ok((cp, len)) => {
                self.position += len;
                Some(Ok(cp))
            }
            Err(kind) => {
                self.failed = true;
                Some(Err(DecodeError {
                    offset: self.position,
                    lead,
                    kind,
                }))
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.source.len() - self.position;
        // At most 4 bytes per codepoint, at least 1
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl FusedIterator for Codepoints<'_> {}
