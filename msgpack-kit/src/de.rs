//! MessagePack serde deserializer over the decode container tree
use serde::de::{self, Visitor, SeqAccess, MapAccess, DeserializeSeed, Unexpected};
use serde::de::value::BorrowedStrDeserializer;
use msgpack_wire::{ByteCursor, FormatTag, Layout};
use msgpack_wire::marker::NIL;

use crate::decode::{
    slice_value,
    DecodeContainer,
    Integer,
    KeyedDecodeContainer,
    SingleValueDecodeContainer,
    UnkeyedDecodeContainer
};
use crate::error::{Error, ErrorKind, Result};
use crate::path::Path;
use crate::timestamp::TIMESTAMP_TOKEN;
use crate::tracing_macros::trace;

/// Deserialize an instance of type `T` from a slice holding exactly one MessagePack value.
///
/// Fail with [`ErrorKind::TrailingBytes`] if anything follows the value.
///
/// Any `&str` or `&[u8]` in the returned type will contain references to the provided slice.
pub fn from_slice<'a, T>(input: &'a [u8]) -> Result<T>
    where T: de::Deserialize<'a>
{
    let (value, tail) = from_slice_split_tail(input)?;
    if !tail.is_empty() {
        return Err(ErrorKind::TrailingBytes.into())
    }
    Ok(value)
}

/// Deserialize an instance of type `T` from the first MessagePack value in a slice.
///
/// Return a tuple with `(value, tail)`, where `tail` is the tail of the input beginning
/// at the byte following the last byte of the serialized data.
///
/// Any `&str` or `&[u8]` in the returned type will contain references to the provided slice.
pub fn from_slice_split_tail<'a, T>(input: &'a [u8]) -> Result<(T, &'a [u8])>
    where T: de::Deserialize<'a>
{
    let mut cursor = ByteCursor::new(input);
    let value = slice_value(&mut cursor)?;
    let mut decoder = Decoder::new(value);
    let value = T::deserialize(&mut decoder)?;
    Ok((value, cursor.remaining()))
}

/// The root of a decode container tree over one encoded value.
///
/// A decoder hands out exactly one root container: after the first request
/// for a keyed, unkeyed or single value container, any further request
/// fails with [`ErrorKind::ContainerAlreadyCreated`].
///
/// `&mut Decoder` implements [`serde::Deserializer`]:
///
/// * deserializes borrowed references to `&str` and `&[u8]` types,
/// * deserializes structs and maps from MessagePack maps only,
/// * deserializes enum variants from MessagePack strings or single entry maps,
/// * deserializes integers from any MessagePack integer type as long as the number fits,
/// * skips ignored values without decoding them.
#[derive(Debug)]
pub struct Decoder<'de> {
    input: &'de [u8],
    path: Path,
    created: bool,
}

impl<'de> Decoder<'de> {
    /// Create a decoder of the value in `input`.
    pub fn new(input: &'de [u8]) -> Self {
        Decoder::nested(input, Path::root())
    }

    pub(crate) fn nested(input: &'de [u8], path: Path) -> Self {
        Decoder { input, path, created: false }
    }

    pub fn input(&self) -> &'de [u8] {
        self.input
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keyed_container(&mut self) -> Result<KeyedDecodeContainer<'de>> {
        self.latch()?;
        KeyedDecodeContainer::new(self.input, self.path.clone())
    }

    pub fn unkeyed_container(&mut self) -> Result<UnkeyedDecodeContainer<'de>> {
        self.latch()?;
        UnkeyedDecodeContainer::new(self.input, self.path.clone())
    }

    pub fn single_value_container(&mut self) -> Result<SingleValueDecodeContainer<'de>> {
        self.latch()?;
        Ok(SingleValueDecodeContainer::new(self.input, self.path.clone()))
    }

    /// The root container of the shape announced by the value.
    pub fn container(&mut self) -> Result<DecodeContainer<'de>> {
        self.latch()?;
        DecodeContainer::classify(self.input, self.path.clone())
    }

    fn latch(&mut self) -> Result<()> {
        if core::mem::replace(&mut self.created, true) {
            return Err(ErrorKind::ContainerAlreadyCreated.at(&self.path))
        }
        trace!(path = %self.path, "root decode container");
        Ok(())
    }

    fn peek_tag(&self) -> Result<(u8, FormatTag)> {
        match self.input.first() {
            Some(&byte) => Ok((byte, FormatTag::from_byte(byte))),
            None => Err(self.error(ErrorKind::UnexpectedEndOfData))
        }
    }

    fn error(&self, kind: ErrorKind) -> Error {
        kind.at(&self.path)
    }

    fn visit_seq<V: Visitor<'de>>(&self, container: UnkeyedDecodeContainer<'de>, visitor: V) -> Result<V::Value> {
        let mut access = SeqDecoder { container };
        let value = visitor.visit_seq(&mut access).map_err(|err: Error| err.or_path(&self.path))?;
        if !access.container.is_at_end()? {
            return Err(self.error(ErrorKind::TrailingElements))
        }
        Ok(value)
    }

    fn visit_map<V: Visitor<'de>>(&self, container: KeyedDecodeContainer<'de>, visitor: V) -> Result<V::Value> {
        let mut access = MapDecoder { container, index: 0, value: None };
        visitor.visit_map(&mut access).map_err(|err: Error| err.or_path(&self.path))
    }
}

macro_rules! impl_deserialize_integer {
    ($($deserialize:ident => $decode:ident, $visit:ident;)*) => {$(
        fn $deserialize<V>(self, visitor: V) -> Result<V::Value>
            where V: Visitor<'de>
        {
            let v = self.single_value_container()?.$decode()?;
            visitor.$visit(v).map_err(|err: Error| err.or_path(&self.path))
        }
    )*};
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Decoder<'de> {
    type Error = Error;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let mut single = match self.container()? {
            DecodeContainer::Keyed(container) => return self.visit_map(container, visitor),
            DecodeContainer::Unkeyed(container) => return self.visit_seq(container, visitor),
            DecodeContainer::SingleValue(container) => container
        };
        let (byte, tag) = self.peek_tag()?;
        let res = match tag {
            FormatTag::Nil => visitor.visit_unit(),
            FormatTag::True|FormatTag::False => visitor.visit_bool(single.decode_bool()?),
            FormatTag::Float32 => visitor.visit_f32(single.decode_f32()?),
            FormatTag::Float64 => visitor.visit_f64(single.decode_f64()?),
            FormatTag::Bin8|FormatTag::Bin16|FormatTag::Bin32 => {
                visitor.visit_borrowed_bytes(single.decode_bytes()?)
            }
            tag if tag.is_str() => visitor.visit_borrowed_str(single.decode_str()?),
            tag if tag.is_integer() => match single.decode_integer()? {
                Integer::Unsigned(n) => visitor.visit_u64(n),
                Integer::Signed(n) => visitor.visit_i64(n),
            }
            _ => return Err(self.error(ErrorKind::TypeMismatch { tag: byte, expected: "a serde value" }))
        };
        res.map_err(|err: Error| err.or_path(&self.path))
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let v = self.single_value_container()?.decode_bool()?;
        visitor.visit_bool(v).map_err(|err: Error| err.or_path(&self.path))
    }

    impl_deserialize_integer! {
        deserialize_i8 => decode_i8, visit_i8;
        deserialize_i16 => decode_i16, visit_i16;
        deserialize_i32 => decode_i32, visit_i32;
        deserialize_i64 => decode_i64, visit_i64;
        deserialize_u8 => decode_u8, visit_u8;
        deserialize_u16 => decode_u16, visit_u16;
        deserialize_u32 => decode_u32, visit_u32;
        deserialize_u64 => decode_u64, visit_u64;
        deserialize_f32 => decode_f32, visit_f32;
        deserialize_f64 => decode_f64, visit_f64;
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let s = self.single_value_container()?.decode_str()?;
        let mut chars = s.chars();
        let res = match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(de::Error::invalid_value(Unexpected::Str(s), &"a single character"))
        };
        res.map_err(|err: Error| err.or_path(&self.path))
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let v = self.single_value_container()?.decode_str()?;
        visitor.visit_borrowed_str(v).map_err(|err: Error| err.or_path(&self.path))
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let v = self.single_value_container()?.decode_bytes()?;
        visitor.visit_borrowed_bytes(v).map_err(|err: Error| err.or_path(&self.path))
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        match self.peek_tag()? {
            (NIL, _) => {
                self.latch()?;
                visitor.visit_none()
            }
            _ => visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let mut single = self.single_value_container()?;
        if !single.decode_nil()? {
            let tag = single.peek()?;
            return Err(self.error(ErrorKind::TypeMismatch { tag, expected: "nil" }))
        }
        visitor.visit_unit().map_err(|err: Error| err.or_path(&self.path))
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value>
        where V: Visitor<'de>
    {
        if name == TIMESTAMP_TOKEN {
            let ts = self.single_value_container()?.decode_timestamp()?;
            return visitor.visit_bytes(&ts.to_payload()).map_err(|err: Error| err.or_path(&self.path))
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let container = self.unkeyed_container()?;
        self.visit_seq(container, visitor)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let container = self.keyed_container()?;
        self.visit_map(container, visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
        where V: Visitor<'de>
    {
        let (byte, tag) = self.peek_tag()?;
        let access = if tag.is_str() {
            let name = self.single_value_container()?.decode_str()?;
            VariantDecoder { name, value: None, path: self.path.clone() }
        }
        else if let Layout::Map(_) = tag.layout() {
            let container = self.keyed_container()?;
            match container.entries()? {
                &[(name, value)] => VariantDecoder { name, value: Some(value), path: self.path.key(name) },
                entries => {
                    let err: Error = de::Error::invalid_length(entries.len(), &"a map with a single variant");
                    return Err(err.or_path(&self.path))
                }
            }
        }
        else {
            return Err(self.error(ErrorKind::TypeMismatch { tag: byte, expected: "enum variant" }))
        };
        visitor.visit_enum(access).map_err(|err: Error| err.or_path(&self.path))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        // the value's byte range is already known, nothing to skip
        self.latch()?;
        visitor.visit_unit()
    }
}

struct SeqDecoder<'de> {
    container: UnkeyedDecodeContainer<'de>,
}

impl<'de> SeqAccess<'de> for SeqDecoder<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
        where T: DeserializeSeed<'de>
    {
        if self.container.is_at_end()? {
            return Ok(None)
        }
        self.container.decode_seed(seed).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        self.container.count().ok()
            .map(|count| count.saturating_sub(self.container.current_index()))
    }
}

struct MapDecoder<'de> {
    container: KeyedDecodeContainer<'de>,
    index: usize,
    value: Option<(&'de str, &'de [u8])>,
}

impl<'de> MapAccess<'de> for MapDecoder<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
        where K: DeserializeSeed<'de>
    {
        let Some(&(key, value)) = self.container.entries()?.get(self.index) else {
            return Ok(None)
        };
        self.index += 1;
        self.value = Some((key, value));
        seed.deserialize(BorrowedStrDeserializer::new(key))
            .map(Some)
            .map_err(|err: Error| err.or_path(&self.container.path().key(key)))
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
        where V: DeserializeSeed<'de>
    {
        match self.value.take() {
            Some((key, value)) => {
                let mut decoder = Decoder::nested(value, self.container.path().key(key));
                seed.deserialize(&mut decoder).map_err(|err: Error| err.or_path(decoder.path()))
            }
            None => Err(de::Error::custom("map value requested before its key"))
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.container.count().ok()
            .map(|count| count.saturating_sub(self.index))
    }
}

struct VariantDecoder<'de> {
    name: &'de str,
    value: Option<&'de [u8]>,
    path: Path,
}

impl<'de> VariantDecoder<'de> {
    fn decoder(&self) -> Option<Decoder<'de>> {
        self.value.map(|value| Decoder::nested(value, self.path.clone()))
    }

    fn expected_value(&self, expected: &'static str) -> Error {
        let err: Error = de::Error::invalid_type(Unexpected::UnitVariant, &expected);
        err.or_path(&self.path)
    }
}

impl<'de> de::EnumAccess<'de> for VariantDecoder<'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self)>
        where V: DeserializeSeed<'de>
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.name))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for VariantDecoder<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.decoder() {
            Some(mut decoder) => de::Deserialize::deserialize(&mut decoder),
            None => Ok(())
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
        where T: DeserializeSeed<'de>
    {
        match self.decoder() {
            Some(mut decoder) => seed.deserialize(&mut decoder),
            None => Err(self.expected_value("newtype variant"))
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        match self.decoder() {
            Some(mut decoder) => de::Deserializer::deserialize_seq(&mut decoder, visitor),
            None => Err(self.expected_value("tuple variant"))
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
        where V: Visitor<'de>
    {
        match self.decoder() {
            Some(mut decoder) => de::Deserializer::deserialize_map(&mut decoder, visitor),
            None => Err(self.expected_value("struct variant"))
        }
    }
}
