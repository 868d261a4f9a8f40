use alloc::vec::Vec;
use msgpack_wire::{WireWrite, WireResult};
use msgpack_wire::write::*;

use crate::error::{ErrorKind, Result};
use crate::path::Path;
use crate::timestamp::Timestamp;

/// A write-once holder of one encoded scalar.
///
/// The first `encode_*` call stores canonical bytes. Any further call fails
/// with [`ErrorKind::AlreadyEncoded`] and leaves the stored bytes intact.
/// A container that was never written serializes as `nil`.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleValueEncodeContainer {
    bytes: Vec<u8>,
    encoded: bool,
    path: Path,
}

macro_rules! impl_encode_integer {
    ($write:ident, $wide:ty; $($name:ident => $ty:ty),*) => {$(
        pub fn $name(&mut self, v: $ty) -> Result<()> {
            self.encode_with(|output| $write(output, <$wide>::from(v)))
        }
    )*};
}

impl SingleValueEncodeContainer {
    pub fn new(path: Path) -> Self {
        SingleValueEncodeContainer { bytes: Vec::new(), encoded: false, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_encoded(&self) -> bool {
        self.encoded
    }

    /// The stored bytes, empty until a value is encoded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.encode_with(write_nil)
    }

    pub fn encode_bool(&mut self, v: bool) -> Result<()> {
        self.encode_with(|output| write_bool(output, v))
    }

    impl_encode_integer!(write_uint, u64;
        encode_u8 => u8, encode_u16 => u16, encode_u32 => u32, encode_u64 => u64);

    impl_encode_integer!(write_int, i64;
        encode_i8 => i8, encode_i16 => i16, encode_i32 => i32, encode_i64 => i64);

    pub fn encode_f32(&mut self, v: f32) -> Result<()> {
        self.encode_with(|output| write_f32(output, v))
    }

    pub fn encode_f64(&mut self, v: f64) -> Result<()> {
        self.encode_with(|output| write_f64(output, v))
    }

    pub fn encode_str(&mut self, v: &str) -> Result<()> {
        self.encode_with(|output| write_str(output, v))
    }

    pub fn encode_bytes(&mut self, v: &[u8]) -> Result<()> {
        self.encode_with(|output| write_bin(output, v))
    }

    pub fn encode_timestamp(&mut self, v: Timestamp) -> Result<()> {
        self.encode_with(|output| write_timestamp(output, v.seconds(), v.nanoseconds()))
    }

    pub fn write_to<W: WireWrite>(&self, output: &mut W) -> Result<()> {
        let res = if self.encoded {
            output.write(&self.bytes)
        }
        else {
            write_nil(output)
        };
        res.map_err(|err| ErrorKind::from(err).at(&self.path))
    }

    fn encode_with<F>(&mut self, write: F) -> Result<()>
        where F: FnOnce(&mut Vec<u8>) -> WireResult<()>
    {
        if self.encoded {
            return Err(ErrorKind::AlreadyEncoded.at(&self.path))
        }
        if let Err(err) = write(&mut self.bytes) {
            self.bytes.clear();
            return Err(ErrorKind::from(err).at(&self.path))
        }
        self.encoded = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded<F>(encode: F) -> Vec<u8>
        where F: FnOnce(&mut SingleValueEncodeContainer) -> Result<()>
    {
        let mut container = SingleValueEncodeContainer::new(Path::root());
        encode(&mut container).unwrap();
        container.as_bytes().to_vec()
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encoded(|c| c.encode_nil()), b"\xc0");
        assert_eq!(encoded(|c| c.encode_bool(true)), b"\xc3");
        assert_eq!(encoded(|c| c.encode_u8(100)), b"\x64");
        assert_eq!(encoded(|c| c.encode_u16(300)), b"\xcd\x01\x2c");
        assert_eq!(encoded(|c| c.encode_u64(1 << 32)), b"\xcf\x00\x00\x00\x01\x00\x00\x00\x00");
        assert_eq!(encoded(|c| c.encode_i8(-100)), b"\xd0\x9c");
        assert_eq!(encoded(|c| c.encode_i32(-32)), b"\xe0");
        assert_eq!(encoded(|c| c.encode_i64(128)), b"\xcc\x80");
        assert_eq!(encoded(|c| c.encode_f32(1.5)), b"\xca\x3f\xc0\x00\x00");
        assert_eq!(encoded(|c| c.encode_f64(1.5)), b"\xcb\x3f\xf8\x00\x00\x00\x00\x00\x00");
        assert_eq!(encoded(|c| c.encode_str("PDX")), b"\xa3PDX");
        assert_eq!(encoded(|c| c.encode_bytes(b"\x01")), b"\xc4\x01\x01");
        assert_eq!(encoded(|c| c.encode_timestamp(Timestamp::from_seconds(1))), b"\xd6\xff\x00\x00\x00\x01");
    }

    #[test]
    fn test_write_once() {
        let mut container = SingleValueEncodeContainer::new(Path::root().key("name"));
        assert!(!container.is_encoded());
        container.encode_str("KPDX").unwrap();
        let err = container.encode_u8(1).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::AlreadyEncoded);
        assert_eq!(err.path(), &Path::root().key("name"));
        assert_eq!(container.encode_nil().unwrap_err().kind(), &ErrorKind::AlreadyEncoded);
        assert!(container.is_encoded());
        assert_eq!(container.as_bytes(), b"\xa4KPDX");
    }

    #[test]
    fn test_write_to() {
        let mut output = Vec::new();
        let mut container = SingleValueEncodeContainer::new(Path::root());
        container.write_to(&mut output).unwrap();
        assert_eq!(output, b"\xc0");
        container.encode_i16(-1).unwrap();
        container.write_to(&mut output).unwrap();
        assert_eq!(output, b"\xc0\xff");
        let mut buf = [0u8; 0];
        let mut writer = msgpack_wire::SliceWriter::new(&mut buf);
        assert_eq!(container.write_to(&mut writer).unwrap_err().kind(), &ErrorKind::BufferFull);
    }
}
