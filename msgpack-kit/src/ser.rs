//! MessagePack serde serializer building an encode container tree
use alloc::{string::{String, ToString}, vec::Vec};
use serde::ser::{self, Impossible, Serialize};
use msgpack_wire::WireWrite;

use crate::encode::{
    stored, EncodeNode, NodeKind,
    KeyedEncodeContainer,
    SingleValueEncodeContainer,
    UnkeyedEncodeContainer
};
use crate::error::{Error, ErrorKind, Result};
use crate::path::Path;
use crate::timestamp::{Timestamp, TIMESTAMP_TOKEN};
use crate::tracing_macros::{debug, trace};

/// Serialize `value` as MessagePack and return the bytes.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
    where T: Serialize + ?Sized
{
    let mut encoder = Encoder::new();
    value.serialize(&mut encoder)?;
    encoder.into_bytes()
}

/// Serialize `value` as MessagePack to a [`WireWrite`] implementation.
///
/// The whole value is encoded before anything is written to `writer`.
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
    where W: WireWrite, T: Serialize + ?Sized
{
    let mut encoder = Encoder::new();
    value.serialize(&mut encoder)?;
    encoder.write_to(&mut writer)
}

/// The root of an encode container tree.
///
/// An encoder holds exactly one root container: the first request for a
/// keyed, unkeyed or single value container creates it, any further request
/// fails with [`ErrorKind::ContainerAlreadyCreated`].
///
/// `&mut Encoder` implements [`serde::Serializer`].
#[derive(Debug, Default)]
pub struct Encoder {
    root: Option<EncodeNode>,
    path: Path,
    timestamp: bool,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder::nested(Path::root())
    }

    /// Create an encoder for a child value at `path`.
    pub(crate) fn nested(path: Path) -> Self {
        Encoder { root: None, path, timestamp: false }
    }

    /// Serialize `value` into a detached node located at `path`.
    pub(crate) fn encode_node<T>(path: Path, value: &T) -> Result<EncodeNode>
        where T: Serialize + ?Sized
    {
        let mut encoder = Encoder::nested(path);
        value.serialize(&mut encoder).map_err(|err| err.or_path(&encoder.path))?;
        Ok(encoder.into_node())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keyed_container(&mut self) -> Result<&mut KeyedEncodeContainer> {
        self.root_container()
    }

    pub fn unkeyed_container(&mut self) -> Result<&mut UnkeyedEncodeContainer> {
        self.root_container()
    }

    pub fn single_value_container(&mut self) -> Result<&mut SingleValueEncodeContainer> {
        self.root_container()
    }

    /// The root container, if one was created.
    pub fn root(&self) -> Option<&EncodeNode> {
        self.root.as_ref()
    }

    /// Convert into the root node. An encoder without a root container
    /// becomes an unwritten single value, which serializes as `nil`.
    pub fn into_node(self) -> EncodeNode {
        match self.root {
            Some(node) => node,
            None => EncodeNode::SingleValue(SingleValueEncodeContainer::new(self.path))
        }
    }

    /// Write the encoded tree to `output`. Nothing is written if no root
    /// container was created.
    pub fn write_to<W: WireWrite>(&self, output: &mut W) -> Result<()> {
        match &self.root {
            Some(node) => node.write_to(output),
            None => Ok(())
        }
    }

    /// Return the encoded bytes, empty if no root container was created.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output)?;
        debug!(len = output.len(), "serialized encode tree");
        Ok(output)
    }

    fn root_container<C: NodeKind>(&mut self) -> Result<&mut C> {
        if self.root.is_some() {
            return Err(ErrorKind::ContainerAlreadyCreated.at(&self.path))
        }
        trace!(path = %self.path, "root encode container");
        let node = self.root.insert(C::new(self.path.clone()).into_node());
        Ok(stored(node))
    }
}

impl<'a> ser::Serializer for &'a mut Encoder {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqEncoder<'a>;
    type SerializeTuple = SeqEncoder<'a>;
    type SerializeTupleStruct = SeqEncoder<'a>;
    type SerializeTupleVariant = SeqEncoder<'a>;
    type SerializeMap = MapEncoder<'a>;
    type SerializeStruct = MapEncoder<'a>;
    type SerializeStructVariant = MapEncoder<'a>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.single_value_container()?.encode_bool(v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.single_value_container()?.encode_i8(v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.single_value_container()?.encode_i16(v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.single_value_container()?.encode_i32(v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.single_value_container()?.encode_i64(v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.single_value_container()?.encode_u8(v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.single_value_container()?.encode_u16(v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.single_value_container()?.encode_u32(v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.single_value_container()?.encode_u64(v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.single_value_container()?.encode_f32(v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.single_value_container()?.encode_f64(v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.single_value_container()?.encode_str(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.single_value_container()?.encode_str(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        if core::mem::take(&mut self.timestamp) {
            let ts = Timestamp::from_payload(v)
                     .ok_or_else(|| ErrorKind::ValueOutOfRange.at(&self.path))?;
            return self.single_value_container()?.encode_timestamp(ts)
        }
        self.single_value_container()?.encode_bytes(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.single_value_container()?.encode_nil()
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.single_value_container()?.encode_nil()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        if name == TIMESTAMP_TOKEN {
            self.timestamp = true;
            let res = value.serialize(&mut *self);
            self.timestamp = false;
            return res
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.keyed_container()?.encode(variant, value)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqEncoder { container: self.unkeyed_container()? })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let container = self.keyed_container()?.nested_unkeyed_container(variant);
        Ok(SeqEncoder { container })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapEncoder { container: self.keyed_container()?, key: None })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        let container = self.keyed_container()?.nested_keyed_container(variant);
        Ok(MapEncoder { container, key: None })
    }
}

/// Serializes sequences, tuples and tuple variants into an unkeyed container.
pub struct SeqEncoder<'a> {
    container: &'a mut UnkeyedEncodeContainer,
}

impl ser::SerializeSeq for SeqEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.container.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTuple for SeqEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.container.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for SeqEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.container.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for SeqEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.container.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes maps, structs and struct variants into a keyed container.
pub struct MapEncoder<'a> {
    container: &'a mut KeyedEncodeContainer,
    key: Option<String>,
}

impl ser::SerializeMap for MapEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        let key = key.serialize(KeySerializer).map_err(|err| err.or_path(self.container.path()))?;
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        match self.key.take() {
            Some(key) => self.container.encode(&key, value),
            None => Err(ser::Error::custom("map value serialized before its key"))
        }
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeStruct for MapEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.container.encode(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for MapEncoder<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
        where T: ?Sized + Serialize
    {
        self.container.encode(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Turns a map key into a `String`, rejecting anything but strings,
/// characters and unit variants.
struct KeySerializer;

fn key_must_be_string() -> Error {
    ErrorKind::KeyMustBeString.into()
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.into())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.into())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
        where T: ?Sized + Serialize
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_i8(self, _v: i8) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_i16(self, _v: i16) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_i32(self, _v: i32) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_i64(self, _v: i64) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_u8(self, _v: u8) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_u16(self, _v: u16) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_u32(self, _v: u32) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_u64(self, _v: u64) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
        where T: ?Sized + Serialize
    {
        Err(key_must_be_string())
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_string())
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
        where T: ?Sized + Serialize
    {
        Err(key_must_be_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_string())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct> {
        Err(key_must_be_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_string())
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use serde::Serialize;
    use msgpack_wire::SliceWriter;
    use super::*;

    #[test]
    fn test_ser_scalars() {
        assert_eq!(to_vec(&()).unwrap(), b"\xc0");
        assert_eq!(to_vec(&false).unwrap(), b"\xc2");
        assert_eq!(to_vec(&true).unwrap(), b"\xc3");
        assert_eq!(to_vec(&0u8).unwrap(), b"\x00");
        assert_eq!(to_vec(&127i64).unwrap(), b"\x7f");
        assert_eq!(to_vec(&128i16).unwrap(), b"\xcc\x80");
        assert_eq!(to_vec(&256u32).unwrap(), b"\xcd\x01\x00");
        assert_eq!(to_vec(&65536i32).unwrap(), b"\xce\x00\x01\x00\x00");
        assert_eq!(to_vec(&(1u64 << 32)).unwrap(), b"\xcf\x00\x00\x00\x01\x00\x00\x00\x00");
        assert_eq!(to_vec(&-1i8).unwrap(), b"\xff");
        assert_eq!(to_vec(&-32i32).unwrap(), b"\xe0");
        assert_eq!(to_vec(&-33i64).unwrap(), b"\xd0\xdf");
        assert_eq!(to_vec(&-100i32).unwrap(), b"\xd0\x9c");
        assert_eq!(to_vec(&i64::MIN).unwrap(), b"\xd3\x80\x00\x00\x00\x00\x00\x00\x00");
        assert_eq!(to_vec(&1.0f32).unwrap(), b"\xca\x3f\x80\x00\x00");
        assert_eq!(to_vec(&-0.0f64).unwrap(), b"\xcb\x80\x00\x00\x00\x00\x00\x00\x00");
        assert_eq!(to_vec(&'ł').unwrap(), b"\xa2\xc5\x82");
        assert_eq!(to_vec("PDX").unwrap(), b"\xa3PDX");
        assert_eq!(to_vec(&serde_bytes::Bytes::new(b"\x00\x01")).unwrap(), b"\xc4\x02\x00\x01");
        assert_eq!(to_vec(&None::<u8>).unwrap(), b"\xc0");
        assert_eq!(to_vec(&Some(5u8)).unwrap(), b"\x05");
    }

    #[test]
    fn test_ser_struct_canonical() {
        #[derive(Serialize)]
        struct Unit;
        #[derive(Serialize)]
        struct Airport<'a> {
            name: &'a str,
            iata: &'a str,
            icao: &'a str,
            coordinates: [f64; 2],
            unit: Unit,
        }
        let airport = Airport {
            name: "Portland International Airport",
            iata: "PDX",
            icao: "KPDX",
            coordinates: [-122.5975, 45.5886111111111],
            unit: Unit
        };
        let mut expected = vec![0x85];
        expected.extend_from_slice(b"\xabcoordinates\x92");
        expected.push(0xcb);
        expected.extend_from_slice(&(-122.5975f64).to_be_bytes());
        expected.push(0xcb);
        expected.extend_from_slice(&45.5886111111111f64.to_be_bytes());
        expected.extend_from_slice(b"\xa4iata\xa3PDX\xa4icao\xa4KPDX");
        expected.extend_from_slice(b"\xa4name\xbePortland International Airport");
        expected.extend_from_slice(b"\xa4unit\xc0");
        assert_eq!(to_vec(&airport).unwrap(), expected);
    }

    #[test]
    fn test_ser_map() {
        let mut map = BTreeMap::new();
        map.insert('b', 1u8);
        map.insert('a', 2u8);
        assert_eq!(to_vec(&map).unwrap(), b"\x82\xa1a\x02\xa1b\x01");

        #[derive(Serialize, PartialEq, Eq, PartialOrd, Ord)]
        enum Key { Second, First }
        let mut map = BTreeMap::new();
        map.insert(Key::Second, 2u8);
        map.insert(Key::First, 1u8);
        assert_eq!(to_vec(&map).unwrap(), b"\x82\xa5First\x01\xa6Second\x02");

        #[derive(Serialize, PartialEq, Eq, PartialOrd, Ord)]
        struct Name<'a>(&'a str);
        let mut map = BTreeMap::new();
        map.insert(Name("x"), ());
        assert_eq!(to_vec(&map).unwrap(), b"\x81\xa1x\xc0");

        let mut map = BTreeMap::new();
        map.insert(1u8, 1u8);
        let err = to_vec(&map).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::KeyMustBeString);
        assert_eq!(err.path(), &Path::root());

        let mut map = BTreeMap::new();
        let mut inner = BTreeMap::new();
        inner.insert(Some("k"), 1u8);
        map.insert("outer", inner);
        let err = to_vec(&map).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::KeyMustBeString);
        assert_eq!(err.path(), &Path::root().key("outer"));
    }

    #[test]
    fn test_ser_seq() {
        assert_eq!(to_vec(&[0u8; 0]).unwrap(), b"\x90");
        assert_eq!(to_vec(&(1u8, "a", false)).unwrap(), b"\x93\x01\xa1a\xc2");
        assert_eq!(to_vec(&vec![vec![1u8], vec![]]).unwrap(), b"\x92\x91\x01\x90");
        let long = vec![0u8; 65536];
        let bytes = to_vec(&long).unwrap();
        assert_eq!(&bytes[..5], b"\xdd\x00\x01\x00\x00");
        assert_eq!(bytes.len(), 65536 + 5);
    }

    #[test]
    fn test_ser_enum() {
        #[derive(Serialize)]
        enum Surface { Flexible, Rigid(u8), Grid(u8, u8), Patch { x: i8, a: i8 } }
        assert_eq!(to_vec(&Surface::Flexible).unwrap(), b"\xa8Flexible");
        assert_eq!(to_vec(&Surface::Rigid(1)).unwrap(), b"\x81\xa5Rigid\x01");
        assert_eq!(to_vec(&Surface::Grid(1, 2)).unwrap(), b"\x81\xa4Grid\x92\x01\x02");
        assert_eq!(to_vec(&Surface::Patch { x: -1, a: 1 }).unwrap(), b"\x81\xa5Patch\x82\xa1a\x01\xa1x\xff");
    }

    #[test]
    fn test_ser_timestamp() {
        assert_eq!(to_vec(&Timestamp::from_seconds(1)).unwrap(), b"\xd6\xff\x00\x00\x00\x01");
        assert_eq!(to_vec(&Timestamp::new(1, 1).unwrap()).unwrap(),
                   b"\xd7\xff\x00\x00\x00\x04\x00\x00\x00\x01");
        assert_eq!(to_vec(&Timestamp::new(-1, 0).unwrap()).unwrap(),
                   b"\xc7\x0c\xff\x00\x00\x00\x00\xff\xff\xff\xff\xff\xff\xff\xff");
        // the token only affects the bytes directly inside the timestamp newtype
        assert_eq!(to_vec(&(Timestamp::UNIX_EPOCH, serde_bytes::Bytes::new(b"x"))).unwrap(),
                   b"\x92\xd6\xff\x00\x00\x00\x00\xc4\x01x");
    }

    #[test]
    fn test_encoder_latch() {
        let mut encoder = Encoder::new();
        assert!(encoder.root().is_none());
        encoder.keyed_container().unwrap().encode("a", &1u8).unwrap();
        assert_eq!(encoder.unkeyed_container().unwrap_err().kind(), &ErrorKind::ContainerAlreadyCreated);
        assert_eq!(encoder.single_value_container().unwrap_err().kind(), &ErrorKind::ContainerAlreadyCreated);
        assert_eq!(encoder.keyed_container().unwrap_err().kind(), &ErrorKind::ContainerAlreadyCreated);
        let err = 5u8.serialize(&mut encoder).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ContainerAlreadyCreated);
        let err = Some(5u8).serialize(&mut encoder).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ContainerAlreadyCreated);
        assert_eq!(encoder.into_bytes().unwrap(), b"\x81\xa1a\x01");
    }

    #[test]
    fn test_encoder_empty() {
        let encoder = Encoder::new();
        assert_eq!(encoder.path(), &Path::root());
        assert_eq!(Encoder::new().into_bytes().unwrap(), b"");
        let mut output = Vec::new();
        encoder.into_node().write_to(&mut output).unwrap();
        assert_eq!(output, b"\xc0");
    }

    #[test]
    fn test_to_writer() {
        let mut buf = [0u8; 4];
        let mut writer = SliceWriter::new(&mut buf);
        to_writer(&mut writer, &(1u8, 2u8)).unwrap();
        assert_eq!(writer.as_ref(), b"\x92\x01\x02");
        let err = to_writer(&mut writer, &"ab").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::BufferFull);
        let mut output = Vec::new();
        to_writer(&mut output, &300u16).unwrap();
        assert_eq!(output, b"\xcd\x01\x2c");
    }

    #[test]
    fn test_custom_error_path() {
        struct Failing;
        impl Serialize for Failing {
            fn serialize<S: ser::Serializer>(&self, _serializer: S) -> core::result::Result<S::Ok, S::Error> {
                Err(ser::Error::custom("nope"))
            }
        }
        #[derive(Serialize)]
        struct Runway { surface: Failing }
        let err = to_vec(&vec![Runway { surface: Failing }]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Custom("nope".into()));
        assert_eq!(err.path(), &Path::root().index(0).key("surface"));
        assert_eq!(err.to_string(), "nope at $[0].surface");
    }
}
