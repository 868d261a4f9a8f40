use core::str;
use msgpack_wire::{ByteCursor, FormatTag, Layout};
use msgpack_wire::marker::*;

use crate::error::{ErrorKind, Result};
use crate::path::Path;
use crate::timestamp::Timestamp;

type KindResult<T> = core::result::Result<T, ErrorKind>;

/// An integer read from any of the fixint, int or uint formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Integer {
    Unsigned(u64),
    Signed(i64),
}

impl Integer {
    fn convert<N>(self) -> KindResult<N>
        where N: TryFrom<u64> + TryFrom<i64>
    {
        match self {
            Integer::Unsigned(n) => <N as TryFrom<u64>>::try_from(n).map_err(|_| ErrorKind::ValueOutOfRange),
            Integer::Signed(n) => <N as TryFrom<i64>>::try_from(n).map_err(|_| ErrorKind::ValueOutOfRange),
        }
    }
}

/// A view of exactly one encoded scalar value.
///
/// Every typed decoder reads the format tag, accepts only the tags legal
/// for the requested type and otherwise fails with
/// [`ErrorKind::TypeMismatch`].
#[derive(Debug, Clone)]
pub struct SingleValueDecodeContainer<'de> {
    cursor: ByteCursor<'de>,
    path: Path,
}

macro_rules! impl_decode_integer {
    ($($name:ident => $ty:ty),*) => {$(
        pub fn $name(&mut self) -> Result<$ty> {
            self.read_integer(stringify!($ty))
            .and_then(Integer::convert)
            .map_err(|kind| kind.at(&self.path))
        }
    )*};
}

impl<'de> SingleValueDecodeContainer<'de> {
    pub fn new(input: &'de [u8], path: Path) -> Self {
        SingleValueDecodeContainer { cursor: ByteCursor::new(input), path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the leading byte of the value without consuming it.
    pub fn peek(&self) -> Result<u8> {
        self.cursor.peek().map_err(|err| ErrorKind::from(err).at(&self.path))
    }

    /// Consume a `nil` and return `true`, otherwise leave the value in place
    /// and return `false`.
    pub fn decode_nil(&mut self) -> Result<bool> {
        if self.peek()? == NIL {
            self.cursor.skip(1).map_err(|err| ErrorKind::from(err).at(&self.path))?;
            return Ok(true)
        }
        Ok(false)
    }

    pub fn decode_bool(&mut self) -> Result<bool> {
        self.read_bool().map_err(|kind| kind.at(&self.path))
    }

    impl_decode_integer!(
        decode_u8 => u8, decode_u16 => u16, decode_u32 => u32, decode_u64 => u64,
        decode_i8 => i8, decode_i16 => i16, decode_i32 => i32, decode_i64 => i64
    );

    /// Decode a `float-32`, or a `float-64` holding a value that `f32`
    /// represents exactly.
    pub fn decode_f32(&mut self) -> Result<f32> {
        self.read_f32().map_err(|kind| kind.at(&self.path))
    }

    /// Decode a `float-64` or a widened `float-32`.
    pub fn decode_f64(&mut self) -> Result<f64> {
        self.read_f64().map_err(|kind| kind.at(&self.path))
    }

    /// Decode a string borrowed from the input.
    pub fn decode_str(&mut self) -> Result<&'de str> {
        self.read_str().map_err(|kind| kind.at(&self.path))
    }

    /// Decode a `bin` payload borrowed from the input.
    pub fn decode_bytes(&mut self) -> Result<&'de [u8]> {
        self.read_bytes().map_err(|kind| kind.at(&self.path))
    }

    /// Decode any of the three timestamp extension formats.
    pub fn decode_timestamp(&mut self) -> Result<Timestamp> {
        self.read_timestamp().map_err(|kind| kind.at(&self.path))
    }

    /// Decode an integer keeping its signedness.
    pub(crate) fn decode_integer(&mut self) -> Result<Integer> {
        self.read_integer("integer").map_err(|kind| kind.at(&self.path))
    }

    fn read_tag(&mut self) -> KindResult<(u8, FormatTag)> {
        let byte = self.cursor.read_byte()?;
        Ok((byte, FormatTag::from_byte(byte)))
    }

    fn read_bool(&mut self) -> KindResult<bool> {
        match self.read_tag()? {
            (_, FormatTag::True) => Ok(true),
            (_, FormatTag::False) => Ok(false),
            (tag, _) => Err(ErrorKind::TypeMismatch { tag, expected: "bool" })
        }
    }

    fn read_integer(&mut self, expected: &'static str) -> KindResult<Integer> {
        let (byte, tag) = self.read_tag()?;
        let cursor = &mut self.cursor;
        Ok(match tag {
            FormatTag::PosFixint(n) => Integer::Unsigned(n.into()),
            FormatTag::NegFixint(n) => Integer::Signed(n.into()),
            FormatTag::Uint8  => Integer::Unsigned(cursor.read_u8()?.into()),
            FormatTag::Uint16 => Integer::Unsigned(cursor.read_u16()?.into()),
            FormatTag::Uint32 => Integer::Unsigned(cursor.read_u32()?.into()),
            FormatTag::Uint64 => Integer::Unsigned(cursor.read_u64()?),
            FormatTag::Int8   => Integer::Signed(cursor.read_i8()?.into()),
            FormatTag::Int16  => Integer::Signed(cursor.read_i16()?.into()),
            FormatTag::Int32  => Integer::Signed(cursor.read_i32()?.into()),
            FormatTag::Int64  => Integer::Signed(cursor.read_i64()?),
            _ => return Err(ErrorKind::TypeMismatch { tag: byte, expected })
        })
    }

    fn read_f32(&mut self) -> KindResult<f32> {
        match self.read_tag()? {
            (_, FormatTag::Float32) => Ok(self.cursor.read_f32()?),
            (_, FormatTag::Float64) => {
                let f = self.cursor.read_f64()?;
                let narrow = f as f32;
                if f.is_nan() || f64::from(narrow) == f {
                    Ok(narrow)
                }
                else {
                    Err(ErrorKind::ValueOutOfRange)
                }
            }
            (tag, _) => Err(ErrorKind::TypeMismatch { tag, expected: "f32" })
        }
    }

    fn read_f64(&mut self) -> KindResult<f64> {
        match self.read_tag()? {
            (_, FormatTag::Float64) => Ok(self.cursor.read_f64()?),
            (_, FormatTag::Float32) => Ok(self.cursor.read_f32()?.into()),
            (tag, _) => Err(ErrorKind::TypeMismatch { tag, expected: "f64" })
        }
    }

    fn read_str(&mut self) -> KindResult<&'de str> {
        match self.read_tag()? {
            (_, tag) if tag.is_str() => {
                let bytes = self.read_payload(tag)?;
                Ok(str::from_utf8(bytes)?)
            }
            (tag, _) => Err(ErrorKind::TypeMismatch { tag, expected: "str" })
        }
    }

    fn read_bytes(&mut self) -> KindResult<&'de [u8]> {
        match self.read_tag()? {
            (_, tag@(FormatTag::Bin8|FormatTag::Bin16|FormatTag::Bin32)) => self.read_payload(tag),
            (tag, _) => Err(ErrorKind::TypeMismatch { tag, expected: "bin" })
        }
    }

    fn read_payload(&mut self, tag: FormatTag) -> KindResult<&'de [u8]> {
        let len = match tag.layout() {
            Layout::Scalar(length) => self.cursor.read_length(length)?,
            _ => 0
        };
        Ok(self.cursor.read_slice(len)?)
    }

    fn read_timestamp(&mut self) -> KindResult<Timestamp> {
        let tag = self.cursor.read_byte()?;
        let mismatch = ErrorKind::TypeMismatch { tag, expected: "timestamp" };
        let cursor = &mut self.cursor;
        let (seconds, nanoseconds) = match tag {
            FIXEXT_4 => {
                if cursor.read_u8()? != EXT_TIMESTAMP {
                    return Err(mismatch)
                }
                (i64::from(cursor.read_u32()?), 0)
            }
            FIXEXT_8 => {
                if cursor.read_u8()? != EXT_TIMESTAMP {
                    return Err(mismatch)
                }
                let data = cursor.read_u64()?;
                ((data & TIMESTAMP_64_MAX_SECONDS as u64) as i64, (data >> 34) as u32)
            }
            EXT_8 => {
                if cursor.read_u8()? != TIMESTAMP_96_LEN || cursor.read_u8()? != EXT_TIMESTAMP {
                    return Err(mismatch)
                }
                let nanoseconds = cursor.read_u32()?;
                (cursor.read_i64()?, nanoseconds)
            }
            _ => return Err(mismatch)
        };
        Timestamp::new(seconds, nanoseconds).map_err(|err| err.into_kind())
    }
}
