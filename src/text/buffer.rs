//! Owned or borrowed UTF-8 text buffers.
//!
//! A [`TextBuffer`] is either the sole owner of its bytes or a view into
//! bytes owned elsewhere. Owned storage is freed exactly once, when the
//! buffer is dropped or passed to [`TextBuffer::release`]; borrowed views
//! never free anything.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ops::Range;

use super::chars::Codepoints;

/// Errors from constructing or slicing a [`TextBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The requested byte range does not fit inside the buffer.
    SliceOutOfBounds {
        /// Start of the requested range.
        start: usize,
        /// End of the requested range (exclusive).
        end: usize,
        /// Length of the buffer being sliced.
        len: usize,
    },

    /// Storage for the bytes could not be allocated.
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },
}

impl core::fmt::Display for TextError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SliceOutOfBounds { start, end, len } => write!(
                f,
                "slice {}..{} out of bounds for text of {} bytes",
                start, end, len
            ),
            Self::AllocationFailed { requested } => {
                write!(f, "failed to allocate {} bytes for text", requested)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TextError {}

/// A UTF-8 byte buffer that either owns its storage or borrows it.
///
/// `len()` is a byte count, not a codepoint count.
///
/// # Examples
///
/// ```
/// use hailtext::TextBuffer;
///
/// // Ownership is transferred in; the text ends at the first NUL.
/// let text = TextBuffer::from_bytes(b"Hello, world!\0garbage".to_vec());
/// assert_eq!(text.len(), 13);
/// assert!(text.is_owned());
///
/// // Slices borrow from their parent and never free it.
/// let hello = text.slice(0..5).unwrap();
/// assert_eq!(hello.as_bytes(), b"Hello");
/// assert_eq!(hello.release(), 0);
///
/// assert_eq!(text.release(), 13);
/// ```
#[derive(Debug, Clone)]
pub enum TextBuffer<'a> {
    /// Storage owned by this buffer, freed when it is released.
    Owned(Box<[u8]>),
    /// A view into storage owned elsewhere.
    Borrowed(&'a [u8]),
}

/// Number of bytes before the first NUL, or the whole length if there is none.
#[inline]
fn nul_position(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

impl TextBuffer<'static> {
    /// Take ownership of a NUL-terminated byte sequence.
    ///
    /// The text is the bytes preceding the first NUL; the terminator and
    /// anything after it are discarded. Without a NUL the whole vector is
    /// the text.
    pub fn from_bytes(mut raw: Vec<u8>) -> Self {
        let len = nul_position(&raw);
        raw.truncate(len);
        Self::Owned(raw.into_boxed_slice())
    }

    /// Take ownership of `bytes` as-is, embedded NULs included.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self::Owned(bytes.into_boxed_slice())
    }

    /// Copy `bytes` into newly allocated owned storage.
    ///
    /// Allocation failure is reported instead of aborting.
    pub fn try_copy_from(bytes: &[u8]) -> Result<Self, TextError> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(bytes.len())
            .map_err(|_| TextError::AllocationFailed {
                requested: bytes.len(),
            })?;
        storage.extend_from_slice(bytes);
        Ok(Self::Owned(storage.into_boxed_slice()))
    }

    /// Read a file and wrap its contents with [`TextBuffer::from_bytes`] semantics.
    #[cfg(feature = "std")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Self> {
        std::fs::read(path).map(Self::from_bytes)
    }
}

impl<'a> TextBuffer<'a> {
    /// Borrow `bytes` without taking ownership.
    #[inline]
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self::Borrowed(bytes)
    }

    /// Borrow the bytes of a NUL-terminated sequence, up to the first NUL.
    #[inline]
    pub fn from_nul_terminated(bytes: &'a [u8]) -> Self {
        Self::Borrowed(&bytes[..nul_position(bytes)])
    }

    /// The text bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Owned(bytes) => bytes,
            Self::Borrowed(bytes) => bytes,
        }
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Returns `true` if this buffer owns (and will free) its storage.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Borrow a byte range of this buffer.
    ///
    /// The range is not required to fall on codepoint boundaries; a slice
    /// that cuts a sequence reports the cut when decoded.
    pub fn slice(&self, range: Range<usize>) -> Result<TextBuffer<'_>, TextError> {
        let bytes = self.as_bytes();
        bytes
            .get(range.clone())
            .map(TextBuffer::Borrowed)
            .ok_or(TextError::SliceOutOfBounds {
                start: range.start,
                end: range.end,
                len: bytes.len(),
            })
    }

    /// Convert into an owning buffer, copying borrowed bytes.
    pub fn into_owned(self) -> TextBuffer<'static> {
        match self {
            Self::Owned(bytes) => TextBuffer::Owned(bytes),
            Self::Borrowed(bytes) => TextBuffer::Owned(bytes.into()),
        }
    }

    /// Iterate over the codepoints of this buffer, starting at offset 0.
    #[inline]
    pub fn codepoints(&self) -> Codepoints<'_> {
        Codepoints::new(self)
    }

    /// Release this buffer.
    ///
    /// Owned storage is freed here, exactly once; borrowed views free
    /// nothing. Returns the number of bytes freed.
    pub fn release(self) -> usize {
        match self {
            Self::Owned(bytes) => {
                let freed = bytes.len();
                drop(bytes);
                freed
            }
            Self::Borrowed(_) => 0,
        }
    }
}

impl AsRef<[u8]> for TextBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for TextBuffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for TextBuffer<'_> {}

impl core::hash::Hash for TextBuffer<'_> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<'a> From<&'a [u8]> for TextBuffer<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Borrowed(bytes)
    }
}

impl<'a> From<&'a str> for TextBuffer<'a> {
    fn from(text: &'a str) -> Self {
        Self::Borrowed(text.as_bytes())
    }
}

impl From<Vec<u8>> for TextBuffer<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}
