use alloc::{collections::BTreeMap, vec::Vec};
use core::cell::OnceCell;
use core::marker::PhantomData;
use serde::de::{Deserialize, DeserializeSeed};
use msgpack_wire::ByteCursor;
use msgpack_wire::marker::NIL;

use crate::de::Decoder;
use crate::error::{Error, ErrorKind, Result};
use crate::path::Path;
use crate::tracing_macros::{debug, trace};
use super::{
    read_map_header, slice_value,
    SingleValueDecodeContainer,
    UnkeyedDecodeContainer
};

#[derive(Debug, Clone)]
struct Entries<'de> {
    /// pairs in the order they were encoded
    list: Vec<(&'de str, &'de [u8])>,
    /// index into `list`, the last of duplicated keys wins
    lookup: BTreeMap<&'de str, usize>,
}

/// A view of an encoded map with string keys.
///
/// The pairs are scanned on first access: keys are decoded and every value
/// is sliced to its byte range, but not decoded. Values are decoded on
/// request, by key. The outcome of the scan, an error included, is kept
/// for the lifetime of the container.
#[derive(Debug, Clone)]
pub struct KeyedDecodeContainer<'de> {
    input: &'de [u8],
    path: Path,
    entries: OnceCell<core::result::Result<Entries<'de>, ErrorKind>>,
}

impl<'de> KeyedDecodeContainer<'de> {
    /// Create a view of the map in `input`.
    ///
    /// Fail with [`ErrorKind::UnsupportedShape`] if `input` holds another kind of value.
    pub fn new(input: &'de [u8], path: Path) -> Result<Self> {
        read_map_header(&mut ByteCursor::new(input)).map_err(|kind| kind.at(&path))?;
        trace!(path = %path, "keyed decode container");
        Ok(KeyedDecodeContainer { input, path, entries: OnceCell::new() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number of encoded pairs.
    pub fn count(&self) -> Result<usize> {
        Ok(self.scanned()?.list.len())
    }

    /// Keys in the encoded order.
    pub fn keys(&self) -> Result<impl Iterator<Item = &'de str> + '_> {
        Ok(self.scanned()?.list.iter().map(|&(key, _)| key))
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.scanned()?.lookup.contains_key(key))
    }

    /// Return `true` if the value under `key` is `nil`.
    pub fn decode_nil(&self, key: &str) -> Result<bool> {
        Ok(self.value(key)?.first() == Some(&NIL))
    }

    pub fn decode<T: Deserialize<'de>>(&self, key: &str) -> Result<T> {
        self.decode_seed(key, PhantomData)
    }

    pub(crate) fn decode_seed<T: DeserializeSeed<'de>>(&self, key: &str, seed: T) -> Result<T::Value> {
        let value = self.value(key)?;
        decode_value(value, self.path.key(key), seed)
    }

    pub fn nested_keyed_container(&self, key: &str) -> Result<KeyedDecodeContainer<'de>> {
        KeyedDecodeContainer::new(self.value(key)?, self.path.key(key))
    }

    pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedDecodeContainer<'de>> {
        UnkeyedDecodeContainer::new(self.value(key)?, self.path.key(key))
    }

    pub fn nested_single_value_container(&self, key: &str) -> Result<SingleValueDecodeContainer<'de>> {
        Ok(SingleValueDecodeContainer::new(self.value(key)?, self.path.key(key)))
    }

    /// All pairs in the encoded order, duplicates included.
    pub(crate) fn entries(&self) -> Result<&[(&'de str, &'de [u8])]> {
        Ok(&self.scanned()?.list)
    }

    fn value(&self, key: &str) -> Result<&'de [u8]> {
        let entries = self.scanned()?;
        match entries.lookup.get(key) {
            Some(&index) => Ok(entries.list[index].1),
            None => Err(ErrorKind::KeyNotFound.at(&self.path.key(key)))
        }
    }

    fn scanned(&self) -> Result<&Entries<'de>> {
        self.entries.get_or_init(|| {
            let entries = self.scan();
            debug!(path = %self.path, ok = entries.is_ok(), "scanned keyed container");
            entries
        })
        .as_ref()
        .map_err(|kind| kind.clone().at(&self.path))
    }

    fn scan(&self) -> core::result::Result<Entries<'de>, ErrorKind> {
        let mut cursor = ByteCursor::new(self.input);
        let count = read_map_header(&mut cursor)?;
        // every pair takes at least two bytes
        let mut list = Vec::with_capacity(count.min(cursor.remaining_len() / 2));
        let mut lookup = BTreeMap::new();
        for _ in 0..count {
            let key = slice_value(&mut cursor)?;
            let key = SingleValueDecodeContainer::new(key, Path::root())
                      .decode_str()
                      .map_err(Error::into_kind)?;
            let value = slice_value(&mut cursor)?;
            lookup.insert(key, list.len());
            list.push((key, value));
        }
        Ok(Entries { list, lookup })
    }
}

/// Decode a child value located at `path`.
pub(super) fn decode_value<'de, T>(value: &'de [u8], path: Path, seed: T) -> Result<T::Value>
    where T: DeserializeSeed<'de>
{
    let mut decoder = Decoder::nested(value, path);
    seed.deserialize(&mut decoder).map_err(|err| err.or_path(decoder.path()))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use super::*;

    // {"name": "PDX", "alt": 9, "none": nil, "list": [1, 2], "map": {"x": true}}
    const INPUT: &[u8] = b"\x85\xa4name\xa3PDX\xa3alt\x09\xa4none\xc0\xa4list\x92\x01\x02\xa3map\x81\xa1x\xc3";

    #[test]
    fn test_keyed_lookup() {
        let keyed = KeyedDecodeContainer::new(INPUT, Path::root()).unwrap();
        assert_eq!(keyed.count().unwrap(), 5);
        assert_eq!(keyed.keys().unwrap().collect::<Vec<_>>(), ["name", "alt", "none", "list", "map"]);
        assert!(keyed.contains("alt").unwrap());
        assert!(!keyed.contains("missing").unwrap());
        assert_eq!(keyed.decode::<&str>("name").unwrap(), "PDX");
        assert_eq!(keyed.decode::<u16>("alt").unwrap(), 9);
        assert_eq!(keyed.decode_nil("none").unwrap(), true);
        assert_eq!(keyed.decode_nil("alt").unwrap(), false);
        assert_eq!(keyed.decode::<Option<u8>>("none").unwrap(), None);
        assert_eq!(keyed.decode::<Vec<u8>>("list").unwrap(), [1, 2]);
    }

    #[test]
    fn test_keyed_nested() {
        let keyed = KeyedDecodeContainer::new(INPUT, Path::root()).unwrap();
        let map = keyed.nested_keyed_container("map").unwrap();
        assert_eq!(map.path(), &Path::root().key("map"));
        assert_eq!(map.decode::<bool>("x").unwrap(), true);
        let mut list = keyed.nested_unkeyed_container("list").unwrap();
        assert_eq!(list.count().unwrap(), 2);
        assert_eq!(list.decode::<u8>().unwrap(), 1);
        let mut name = keyed.nested_single_value_container("name").unwrap();
        assert_eq!(name.decode_str().unwrap(), "PDX");
        let err = keyed.nested_keyed_container("list").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedShape { tag: 0x92, expected: "keyed container" });
        assert_eq!(err.path(), &Path::root().key("list"));
        let err = keyed.nested_unkeyed_container("map").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedShape { tag: 0x81, expected: "unkeyed container" });
    }

    #[test]
    fn test_keyed_errors() {
        let keyed = KeyedDecodeContainer::new(INPUT, Path::root().index(2)).unwrap();
        let err = keyed.decode::<u8>("missing").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::KeyNotFound);
        assert_eq!(err.path(), &Path::root().index(2).key("missing"));
        assert_eq!(keyed.decode_nil("missing").unwrap_err().kind(), &ErrorKind::KeyNotFound);
        assert_eq!(keyed.nested_single_value_container("missing").unwrap_err().kind(), &ErrorKind::KeyNotFound);
        let err = keyed.decode::<bool>("name").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TypeMismatch { tag: 0xa3, expected: "bool" });
        assert_eq!(err.path(), &Path::root().index(2).key("name"));

        let err = KeyedDecodeContainer::new(b"\x92\x01\x02", Path::root()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedShape { tag: 0x92, expected: "keyed container" });
        let err = KeyedDecodeContainer::new(b"", Path::root()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfData);
    }

    #[test]
    fn test_keyed_scan_errors() {
        // the scan is lazy
        let keyed = KeyedDecodeContainer::new(b"\x82\xa1a\x01", Path::root()).unwrap();
        assert_eq!(keyed.count().unwrap_err().kind(), &ErrorKind::UnexpectedEndOfData);
        let keyed = KeyedDecodeContainer::new(b"\x81\x01\x02", Path::root().key("k")).unwrap();
        let err = keyed.contains("a").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TypeMismatch { tag: 0x01, expected: "str" });
        assert_eq!(err.path(), &Path::root().key("k"));
        let keyed = KeyedDecodeContainer::new(b"\x81\xa2\xff\xfe\x02", Path::root()).unwrap();
        assert_eq!(keyed.count().unwrap_err().kind(), &ErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_keyed_scanned_once() {
        let keyed = KeyedDecodeContainer::new(INPUT, Path::root()).unwrap();
        let entries = keyed.entries().unwrap();
        assert_eq!(keyed.count().unwrap(), 5);
        assert!(keyed.contains("map").unwrap());
        assert_eq!(keyed.decode::<u8>("alt").unwrap(), 9);
        assert_eq!(keyed.decode::<u8>("alt").unwrap(), 9);
        assert!(core::ptr::eq(entries, keyed.entries().unwrap()));

        let keyed = KeyedDecodeContainer::new(b"\x82\xa1a\x01", Path::root().key("k")).unwrap();
        assert!(keyed.entries.get().is_none());
        assert_eq!(keyed.count().unwrap_err().kind(), &ErrorKind::UnexpectedEndOfData);
        assert!(matches!(keyed.entries.get(), Some(Err(ErrorKind::UnexpectedEndOfData))));
        let err = keyed.contains("a").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfData);
        assert_eq!(err.path(), &Path::root().key("k"));
    }

    #[test]
    fn test_keyed_duplicates() {
        let keyed = KeyedDecodeContainer::new(b"\x82\xa1a\x01\xa1a\x02", Path::root()).unwrap();
        assert_eq!(keyed.count().unwrap(), 2);
        assert_eq!(keyed.decode::<u8>("a").unwrap(), 2);
        assert_eq!(keyed.entries().unwrap(), [("a", &b"\x01"[..]), ("a", &b"\x02"[..])]);
    }

    #[test]
    fn test_keyed_empty() {
        let keyed = KeyedDecodeContainer::new(b"\x80", Path::root()).unwrap();
        assert_eq!(keyed.count().unwrap(), 0);
        assert_eq!(keyed.keys().unwrap().count(), 0);
        let keyed = KeyedDecodeContainer::new(b"\xde\x00\x00", Path::root()).unwrap();
        assert_eq!(keyed.count().unwrap(), 0);
    }
}
