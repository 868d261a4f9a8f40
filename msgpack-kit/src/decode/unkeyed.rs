use alloc::vec::Vec;
use core::cell::OnceCell;
use core::marker::PhantomData;
use serde::de::{Deserialize, DeserializeSeed};
use msgpack_wire::ByteCursor;
use msgpack_wire::marker::NIL;

use crate::error::{ErrorKind, Result};
use crate::path::Path;
use crate::tracing_macros::{debug, trace};
use super::keyed::decode_value;
use super::{
    read_array_header, slice_value,
    KeyedDecodeContainer,
    SingleValueDecodeContainer
};

/// A sequential view of an encoded array.
///
/// Element ranges are sliced on first access and the outcome, an error
/// included, is kept. Each `decode*` or `nested_*` call consumes one element.
#[derive(Debug, Clone)]
pub struct UnkeyedDecodeContainer<'de> {
    input: &'de [u8],
    path: Path,
    elements: OnceCell<core::result::Result<Vec<&'de [u8]>, ErrorKind>>,
    current: usize,
}

impl<'de> UnkeyedDecodeContainer<'de> {
    /// Create a view of the array in `input`.
    ///
    /// Fail with [`ErrorKind::UnsupportedShape`] if `input` holds another kind of value.
    pub fn new(input: &'de [u8], path: Path) -> Result<Self> {
        read_array_header(&mut ByteCursor::new(input)).map_err(|kind| kind.at(&path))?;
        trace!(path = %path, "unkeyed decode container");
        Ok(UnkeyedDecodeContainer { input, path, elements: OnceCell::new(), current: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number of encoded elements.
    pub fn count(&self) -> Result<usize> {
        Ok(self.scanned()?.len())
    }

    /// The index of the next element to decode.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_at_end(&self) -> Result<bool> {
        Ok(self.current >= self.count()?)
    }

    /// Consume the next element and return `true` if it is `nil`,
    /// otherwise leave it in place and return `false`.
    pub fn decode_nil(&mut self) -> Result<bool> {
        if self.peek_element()?.first() == Some(&NIL) {
            self.current += 1;
            return Ok(true)
        }
        Ok(false)
    }

    pub fn decode<T: Deserialize<'de>>(&mut self) -> Result<T> {
        self.decode_seed(PhantomData)
    }

    pub(crate) fn decode_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<T::Value> {
        let (value, path) = self.next_element()?;
        decode_value(value, path, seed)
    }

    pub fn nested_keyed_container(&mut self) -> Result<KeyedDecodeContainer<'de>> {
        let (value, path) = self.next_element()?;
        KeyedDecodeContainer::new(value, path)
    }

    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedDecodeContainer<'de>> {
        let (value, path) = self.next_element()?;
        UnkeyedDecodeContainer::new(value, path)
    }

    pub fn nested_single_value_container(&mut self) -> Result<SingleValueDecodeContainer<'de>> {
        let (value, path) = self.next_element()?;
        Ok(SingleValueDecodeContainer::new(value, path))
    }

    fn peek_element(&self) -> Result<&'de [u8]> {
        match self.scanned()?.get(self.current) {
            Some(&value) => Ok(value),
            None => Err(ErrorKind::UnexpectedEndOfData.at(&self.path.index(self.current)))
        }
    }

    fn next_element(&mut self) -> Result<(&'de [u8], Path)> {
        let value = self.peek_element()?;
        let path = self.path.index(self.current);
        self.current += 1;
        Ok((value, path))
    }

    fn scanned(&self) -> Result<&[&'de [u8]]> {
        let scan = self.elements.get_or_init(|| {
            let elements = self.scan();
            debug!(path = %self.path, ok = elements.is_ok(), "scanned unkeyed container");
            elements
        });
        match scan {
            Ok(elements) => Ok(elements.as_slice()),
            Err(kind) => Err(kind.clone().at(&self.path))
        }
    }

    fn scan(&self) -> core::result::Result<Vec<&'de [u8]>, ErrorKind> {
        let mut cursor = ByteCursor::new(self.input);
        let count = read_array_header(&mut cursor)?;
        let mut elements = Vec::with_capacity(count.min(cursor.remaining_len()));
        for _ in 0..count {
            elements.push(slice_value(&mut cursor)?);
        }
        Ok(elements)
    }
}
