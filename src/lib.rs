//! MessagePack wire format primitives.
/*!

This crate knows nothing about containers or serde. It provides:

* [`WireWrite`], the byte sink every encoder writes to, with implementations
  for [`SliceWriter`], `Vec<u8>` and a few fixed-capacity vectors (features),
* [`ByteCursor`], a forward-only reader over an immutable byte slice,
* [`FormatTag`], the classification of a MessagePack leading byte,
* canonical writers in [`write`] that always pick the smallest representation.

All multi-byte numbers are big-endian.
*/
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

use core::fmt;

mod foreign;
mod cursor;
mod format;
pub mod marker;
pub mod write;

pub use cursor::ByteCursor;
pub use format::{FormatTag, Layout, Length};

pub type WireResult<T> = Result<T, WireError>;

/// An error returned by the wire primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WireError {
    /// A read needed more bytes than remain in the input
    UnexpectedEndOfData,
    /// A fixed-capacity sink is full
    BufferFull,
    /// A length or count does not fit the widest MessagePack prefix
    ValueOutOfRange,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WireError::UnexpectedEndOfData => "unexpected end of MessagePack data",
            WireError::BufferFull => "buffer is full",
            WireError::ValueOutOfRange => "length exceeds the MessagePack 32-bit limit",
        })
    }
}

/// Encoders write MessagePack bytes to implementations of this trait.
pub trait WireWrite {
    /// Write all bytes from `buf`.
    ///
    /// When over capacity return `Err(WireError::BufferFull)`.
    fn write(&mut self, buf: &[u8]) -> WireResult<()>;
    /// Write a single `byte`.
    #[inline]
    fn write_byte(&mut self, byte: u8) -> WireResult<()> {
        self.write(core::slice::from_ref(&byte))
    }
    /// Write a fixed-width big-endian number already converted to bytes.
    #[inline]
    fn write_fixed<const N: usize>(&mut self, bytes: [u8; N]) -> WireResult<()> {
        self.write(&bytes)
    }
    /// Write a format tag followed by a fixed-width payload.
    #[inline]
    fn write_tagged<const N: usize>(&mut self, tag: u8, bytes: [u8; N]) -> WireResult<()> {
        self.write_byte(tag)?;
        self.write_fixed(bytes)
    }
}

impl<T: WireWrite> WireWrite for &'_ mut T {
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        (*self).write(buf)
    }
}

/// A sink over a borrowed slice
#[derive(Debug, PartialEq)]
pub struct SliceWriter<'a> {
    pub buf: &'a mut [u8],
    pub len: usize
}

impl AsRef<[u8]> for SliceWriter<'_> {
    /// Returns the written portion of the slice
    fn as_ref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<'a> SliceWriter<'a> {
    /// Create new instance
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceWriter { buf, len: 0 }
    }
    /// Return written length
    pub fn len(&self) -> usize {
        self.len
    }
    /// Return `true` if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Return remaining capacity
    pub fn rem_capacity(&self) -> usize {
        self.buf.len() - self.len
    }
    /// Destruct into the written portion with the underlying buffer's lifetime.
    pub fn into_written(self) -> &'a mut [u8] {
        let (res, _) = self.buf.split_at_mut(self.len);
        res
    }
}

impl WireWrite for SliceWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        let end = self.len + buf.len();
        match self.buf.get_mut(self.len..end) {
            Some(chunk) => {
                chunk.copy_from_slice(buf);
                self.len = end;
                Ok(())
            }
            None => Err(WireError::BufferFull)
        }
    }
}
