//! MessagePack format bytes.
use core::ops::RangeInclusive;

pub const MIN_POSFIXINT: u8 = 0x00;
pub const MAX_POSFIXINT: u8 = 0x7f;
pub const NEGFIXINT: u8 = 0b11100000;
pub const MIN_NEGFIXINT: i8 = NEGFIXINT as i8; //-32
pub const FIXINT: RangeInclusive<i64> = MIN_NEGFIXINT as i64..=MAX_POSFIXINT as i64;

pub const NIL: u8      = 0xc0;
pub const RESERVED: u8 = 0xc1;
pub const FALSE: u8    = 0xc2;
pub const TRUE: u8     = 0xc3;

pub const FIXMAP: u8   = 0x80; /* 1000xxxx */
pub const MAX_FIXMAP_SIZE: usize = 0b1111;
pub const FIXMAP_MAX: u8 = FIXMAP + MAX_FIXMAP_SIZE as u8; /* 10001111 */

pub const FIXARRAY: u8 = 0x90; /* 1001xxxx */
pub const MAX_FIXARRAY_SIZE: usize = 0b1111;
pub const FIXARRAY_MAX: u8 = FIXARRAY + MAX_FIXARRAY_SIZE as u8; /* 10011111 */

pub const FIXSTR: u8   = 0xa0; /* 101xxxxx */
pub const MAX_FIXSTR_SIZE: usize = 0b11111;
pub const FIXSTR_MAX: u8 = FIXSTR + MAX_FIXSTR_SIZE as u8; /* 10111111 */

pub const BIN_8: u8     = 0xc4;
pub const BIN_16: u8    = 0xc5;
pub const BIN_32: u8    = 0xc6;

pub const EXT_8: u8     = 0xc7;
pub const EXT_16: u8    = 0xc8;
pub const EXT_32: u8    = 0xc9;

pub const FLOAT_32: u8  = 0xca;
pub const FLOAT_64: u8  = 0xcb;

pub const UINT_8: u8    = 0xcc;
pub const UINT_16: u8   = 0xcd;
pub const UINT_32: u8   = 0xce;
pub const UINT_64: u8   = 0xcf;

pub const INT_8: u8     = 0xd0;
pub const INT_16: u8    = 0xd1;
pub const INT_32: u8    = 0xd2;
pub const INT_64: u8    = 0xd3;

pub const FIXEXT_1: u8  = 0xd4;
pub const FIXEXT_2: u8  = 0xd5;
pub const FIXEXT_4: u8  = 0xd6;
pub const FIXEXT_8: u8  = 0xd7;
pub const FIXEXT_16: u8 = 0xd8;

pub const STR_8: u8     = 0xd9;
pub const STR_16: u8    = 0xda;
pub const STR_32: u8    = 0xdb;

pub const ARRAY_16: u8  = 0xdc;
pub const ARRAY_32: u8  = 0xdd;

pub const MAP_16: u8    = 0xde;
pub const MAP_32: u8    = 0xdf;

/// Extension type reserved for timestamps (-1)
pub const EXT_TIMESTAMP: u8 = 0xff;
/// Payload length of the 96-bit timestamp carried by `EXT_8`
pub const TIMESTAMP_96_LEN: u8 = 12;
/// Highest number of seconds the 64-bit timestamp can hold (34 bits)
pub const TIMESTAMP_64_MAX_SECONDS: i64 = (1 << 34) - 1;
pub const NANOS_PER_SEC: u32 = 1_000_000_000;
