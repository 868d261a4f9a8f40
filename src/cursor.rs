use crate::{FormatTag, Length, WireError, WireResult};

/// A forward-only reader over an immutable byte slice.
///
/// Every read either consumes exactly the requested number of bytes or fails
/// with [`WireError::UnexpectedEndOfData`] leaving the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'de> {
    input: &'de [u8],
    index: usize,
}

impl<'de> ByteCursor<'de> {
    /// Create a cursor positioned at the start of `input`.
    pub fn new(input: &'de [u8]) -> Self {
        ByteCursor { input, index: 0 }
    }
    /// The whole underlying slice.
    #[inline]
    pub fn input(&self) -> &'de [u8] {
        self.input
    }
    /// The number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }
    /// The number of bytes not consumed yet.
    #[inline]
    pub fn remaining_len(&self) -> usize {
        self.input.len() - self.index
    }
    /// The unconsumed tail of the input.
    #[inline]
    pub fn remaining(&self) -> &'de [u8] {
        &self.input[self.index..]
    }
    /// Return `true` when every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index == self.input.len()
    }
    /// Return the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> WireResult<u8> {
        self.input.get(self.index).copied()
        .ok_or(WireError::UnexpectedEndOfData)
    }
    /// Classify the next byte without consuming it.
    #[inline]
    pub fn peek_tag(&self) -> WireResult<FormatTag> {
        self.peek().map(FormatTag::from_byte)
    }
    /// Consume one byte.
    pub fn read_byte(&mut self) -> WireResult<u8> {
        let byte = self.peek()?;
        self.index += 1;
        Ok(byte)
    }
    /// Consume and classify one byte.
    pub fn read_tag(&mut self) -> WireResult<FormatTag> {
        self.read_byte().map(FormatTag::from_byte)
    }
    /// Consume `len` bytes and return them with the input's lifetime.
    pub fn read_slice(&mut self, len: usize) -> WireResult<&'de [u8]> {
        let input: &'de [u8] = self.input;
        let end = self.index.checked_add(len)
                  .ok_or(WireError::UnexpectedEndOfData)?;
        let res = input.get(self.index..end)
                  .ok_or(WireError::UnexpectedEndOfData)?;
        self.index = end;
        Ok(res)
    }
    /// Advance past `len` bytes.
    pub fn skip(&mut self, len: usize) -> WireResult<()> {
        self.read_slice(len).map(drop)
    }
    /// Consume exactly `N` bytes.
    pub fn read_fixed<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let mut res = [0u8; N];
        res.copy_from_slice(self.read_slice(N)?);
        Ok(res)
    }

    pub fn read_u8(&mut self) -> WireResult<u8> {
        self.read_byte()
    }

    pub fn read_i8(&mut self) -> WireResult<i8> {
        Ok(i8::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_u16(&mut self) -> WireResult<u16> {
        Ok(u16::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_i16(&mut self) -> WireResult<i16> {
        Ok(i16::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_u32(&mut self) -> WireResult<u32> {
        Ok(u32::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(i32::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_u64(&mut self) -> WireResult<u64> {
        Ok(u64::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_i64(&mut self) -> WireResult<i64> {
        Ok(i64::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_f32(&mut self) -> WireResult<f32> {
        Ok(f32::from_be_bytes(self.read_fixed()?))
    }

    pub fn read_f64(&mut self) -> WireResult<f64> {
        Ok(f64::from_be_bytes(self.read_fixed()?))
    }

    /// Resolve a [`Length`], consuming its prefix bytes if there are any.
    pub fn read_length(&mut self, length: Length) -> WireResult<usize> {
        let len = match length {
            Length::Inline(len) => len,
            Length::Prefix(1) => self.read_u8()?.into(),
            Length::Prefix(2) => self.read_u16()?.into(),
            Length::Prefix(4) => usize::try_from(self.read_u32()?)
                                 .map_err(|_| WireError::ValueOutOfRange)?,
            Length::Prefix(_) => return Err(WireError::ValueOutOfRange)
        };
        Ok(len)
    }
}
