//! Decode container tree.
//!
//! Every container borrows the exact byte range of one encoded value.
//! Keyed and unkeyed containers discover their children on first access
//! and remember the result.
use msgpack_wire::{ByteCursor, FormatTag, Layout};

use crate::error::{ErrorKind, Result};
use crate::path::Path;

mod keyed;
mod single;
mod unkeyed;

pub(crate) use single::Integer;
pub use keyed::KeyedDecodeContainer;
pub use single::SingleValueDecodeContainer;
pub use unkeyed::UnkeyedDecodeContainer;

/// A decode container of the shape announced by the value's leading tag.
#[derive(Debug, Clone)]
pub enum DecodeContainer<'de> {
    SingleValue(SingleValueDecodeContainer<'de>),
    Keyed(KeyedDecodeContainer<'de>),
    Unkeyed(UnkeyedDecodeContainer<'de>),
}

impl<'de> DecodeContainer<'de> {
    /// Build the container matching the shape of the value in `bytes`:
    /// maps are keyed, arrays are unkeyed, anything else is a single value.
    pub fn classify(bytes: &'de [u8], path: Path) -> Result<Self> {
        let tag = peek_tag(bytes).map_err(|kind| kind.at(&path))?;
        Ok(match tag.layout() {
            Layout::Map(_) => DecodeContainer::Keyed(KeyedDecodeContainer::new(bytes, path)?),
            Layout::Array(_) => DecodeContainer::Unkeyed(UnkeyedDecodeContainer::new(bytes, path)?),
            _ => DecodeContainer::SingleValue(SingleValueDecodeContainer::new(bytes, path))
        })
    }

    pub fn path(&self) -> &Path {
        match self {
            DecodeContainer::SingleValue(container) => container.path(),
            DecodeContainer::Keyed(container) => container.path(),
            DecodeContainer::Unkeyed(container) => container.path(),
        }
    }
}

pub(crate) fn peek_tag(bytes: &[u8]) -> core::result::Result<FormatTag, ErrorKind> {
    match bytes.first() {
        Some(&byte) => Ok(FormatTag::from_byte(byte)),
        None => Err(ErrorKind::UnexpectedEndOfData)
    }
}

const KEYED: &str = "keyed container";
const UNKEYED: &str = "unkeyed container";

/// Read a map header and return the number of key/value pairs.
fn read_map_header(cursor: &mut ByteCursor<'_>) -> core::result::Result<usize, ErrorKind> {
    let byte = cursor.read_byte()?;
    match FormatTag::from_byte(byte).layout() {
        Layout::Map(length) => Ok(cursor.read_length(length)?),
        _ => Err(ErrorKind::UnsupportedShape { tag: byte, expected: KEYED })
    }
}

/// Read an array header and return the number of elements.
fn read_array_header(cursor: &mut ByteCursor<'_>) -> core::result::Result<usize, ErrorKind> {
    let byte = cursor.read_byte()?;
    match FormatTag::from_byte(byte).layout() {
        Layout::Array(length) => Ok(cursor.read_length(length)?),
        _ => Err(ErrorKind::UnsupportedShape { tag: byte, expected: UNKEYED })
    }
}

/// Slice exactly one encoded value off the front of the `cursor`.
///
/// Nested arrays and maps are walked with a counter of values still to
/// skip instead of recursion, so the nesting depth of the input does not
/// matter.
pub(crate) fn slice_value<'de>(cursor: &mut ByteCursor<'de>) -> core::result::Result<&'de [u8], ErrorKind> {
    let start = cursor.position();
    let mut pending: usize = 1;
    while pending != 0 {
        pending -= 1;
        let byte = cursor.read_byte()?;
        match FormatTag::from_byte(byte).layout() {
            Layout::Scalar(length) => {
                let len = cursor.read_length(length)?;
                cursor.skip(len)?;
            }
            Layout::Ext(length) => {
                let len = cursor.read_length(length)?;
                let len = len.checked_add(1).ok_or(ErrorKind::ValueOutOfRange)?;
                cursor.skip(len)?;
            }
            Layout::Array(length) => {
                let count = cursor.read_length(length)?;
                pending = pending.checked_add(count).ok_or(ErrorKind::ValueOutOfRange)?;
            }
            Layout::Map(length) => {
                let count = cursor.read_length(length)?;
                pending = count.checked_mul(2)
                          .and_then(|items| pending.checked_add(items))
                          .ok_or(ErrorKind::ValueOutOfRange)?;
            }
            Layout::Reserved => {
                return Err(ErrorKind::TypeMismatch { tag: byte, expected: "a MessagePack value" })
            }
        }
    }
    Ok(&cursor.input()[start..cursor.position()])
}
