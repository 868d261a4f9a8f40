//! Canonical writers.
//!
//! Each function writes the smallest MessagePack representation of its
//! argument, so equal values always produce equal bytes.
use crate::{WireWrite, WireError, WireResult};
use crate::marker::*;

#[inline]
pub fn write_nil<W: WireWrite>(output: &mut W) -> WireResult<()> {
    output.write_byte(NIL)
}

#[inline]
pub fn write_bool<W: WireWrite>(output: &mut W, v: bool) -> WireResult<()> {
    output.write_byte(if v { TRUE } else { FALSE })
}

/// Write an unsigned integer: positive fixint, then uint 8/16/32/64.
pub fn write_uint<W: WireWrite>(output: &mut W, v: u64) -> WireResult<()> {
    if v <= MAX_POSFIXINT as u64 {
        output.write_byte(v as u8)
    }
    else if let Ok(v) = u8::try_from(v) {
        output.write_tagged(UINT_8, [v])
    }
    else if let Ok(v) = u16::try_from(v) {
        output.write_tagged(UINT_16, v.to_be_bytes())
    }
    else if let Ok(v) = u32::try_from(v) {
        output.write_tagged(UINT_32, v.to_be_bytes())
    }
    else {
        output.write_tagged(UINT_64, v.to_be_bytes())
    }
}

/// Write a signed integer.
///
/// Non-negative values are written with the unsigned family, negative ones
/// with negative fixint, then int 8/16/32/64.
pub fn write_int<W: WireWrite>(output: &mut W, v: i64) -> WireResult<()> {
    if let Ok(v) = u64::try_from(v) {
        write_uint(output, v)
    }
    else if FIXINT.contains(&v) {
        output.write_byte(v as u8)
    }
    else if let Ok(v) = i8::try_from(v) {
        output.write_tagged(INT_8, v.to_be_bytes())
    }
    else if let Ok(v) = i16::try_from(v) {
        output.write_tagged(INT_16, v.to_be_bytes())
    }
    else if let Ok(v) = i32::try_from(v) {
        output.write_tagged(INT_32, v.to_be_bytes())
    }
    else {
        output.write_tagged(INT_64, v.to_be_bytes())
    }
}

#[inline]
pub fn write_f32<W: WireWrite>(output: &mut W, v: f32) -> WireResult<()> {
    output.write_tagged(FLOAT_32, v.to_be_bytes())
}

#[inline]
pub fn write_f64<W: WireWrite>(output: &mut W, v: f64) -> WireResult<()> {
    output.write_tagged(FLOAT_64, v.to_be_bytes())
}

/// Write a str header for a UTF-8 payload of `len` bytes.
pub fn write_str_len<W: WireWrite>(output: &mut W, len: usize) -> WireResult<()> {
    if len <= MAX_FIXSTR_SIZE {
        output.write_byte(FIXSTR | (len as u8))
    }
    else if let Ok(len) = u8::try_from(len) {
        output.write_tagged(STR_8, [len])
    }
    else if let Ok(len) = u16::try_from(len) {
        output.write_tagged(STR_16, len.to_be_bytes())
    }
    else if let Ok(len) = u32::try_from(len) {
        output.write_tagged(STR_32, len.to_be_bytes())
    }
    else {
        Err(WireError::ValueOutOfRange)
    }
}

pub fn write_str<W: WireWrite>(output: &mut W, v: &str) -> WireResult<()> {
    write_str_len(output, v.len())?;
    output.write(v.as_bytes())
}

/// Write a bin header for a payload of `len` bytes.
pub fn write_bin_len<W: WireWrite>(output: &mut W, len: usize) -> WireResult<()> {
    if let Ok(len) = u8::try_from(len) {
        output.write_tagged(BIN_8, [len])
    }
    else if let Ok(len) = u16::try_from(len) {
        output.write_tagged(BIN_16, len.to_be_bytes())
    }
    else if let Ok(len) = u32::try_from(len) {
        output.write_tagged(BIN_32, len.to_be_bytes())
    }
    else {
        Err(WireError::ValueOutOfRange)
    }
}

pub fn write_bin<W: WireWrite>(output: &mut W, v: &[u8]) -> WireResult<()> {
    write_bin_len(output, v.len())?;
    output.write(v)
}

pub fn write_array_len<W: WireWrite>(output: &mut W, len: usize) -> WireResult<()> {
    if len <= MAX_FIXARRAY_SIZE {
        output.write_byte(FIXARRAY | (len as u8))
    }
    else if let Ok(len) = u16::try_from(len) {
        output.write_tagged(ARRAY_16, len.to_be_bytes())
    }
    else if let Ok(len) = u32::try_from(len) {
        output.write_tagged(ARRAY_32, len.to_be_bytes())
    }
    else {
        Err(WireError::ValueOutOfRange)
    }
}

pub fn write_map_len<W: WireWrite>(output: &mut W, len: usize) -> WireResult<()> {
    if len <= MAX_FIXMAP_SIZE {
        output.write_byte(FIXMAP | (len as u8))
    }
    else if let Ok(len) = u16::try_from(len) {
        output.write_tagged(MAP_16, len.to_be_bytes())
    }
    else if let Ok(len) = u32::try_from(len) {
        output.write_tagged(MAP_32, len.to_be_bytes())
    }
    else {
        Err(WireError::ValueOutOfRange)
    }
}

/// Write a timestamp extension (type -1).
///
/// * timestamp 32: `nanoseconds` is 0 and `seconds` fits in `u32`,
/// * timestamp 64: `seconds` fits in 34 unsigned bits,
/// * timestamp 96: everything else, including negative `seconds`.
///
/// The caller guarantees `nanoseconds` < 10^9.
pub fn write_timestamp<W: WireWrite>(output: &mut W, seconds: i64, nanoseconds: u32) -> WireResult<()> {
    debug_assert!(nanoseconds < NANOS_PER_SEC);
    match u64::try_from(seconds) {
        Ok(secs) if nanoseconds == 0 && secs <= u32::MAX as u64 => {
            output.write(&[FIXEXT_4, EXT_TIMESTAMP])?;
            output.write_fixed((secs as u32).to_be_bytes())
        }
        Ok(secs) if seconds <= TIMESTAMP_64_MAX_SECONDS => {
            let data = (u64::from(nanoseconds) << 34) | secs;
            output.write(&[FIXEXT_8, EXT_TIMESTAMP])?;
            output.write_fixed(data.to_be_bytes())
        }
        _ => {
            output.write(&[EXT_8, TIMESTAMP_96_LEN, EXT_TIMESTAMP])?;
            output.write_fixed(nanoseconds.to_be_bytes())?;
            output.write_fixed(seconds.to_be_bytes())
        }
    }
}
