/// WireWrite for foreign vector types
#[cfg(feature = "std")]
use std::vec::Vec;
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::vec::Vec;

#[allow(unused_imports)]
use super::*;

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl WireWrite for Vec<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> WireResult<()> {
        self.push(byte);
        Ok(())
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<const CAP: usize> WireWrite for arrayvec::ArrayVec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        self.try_extend_from_slice(buf).map_err(|_| WireError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> WireResult<()> {
        self.try_push(byte).map_err(|_| WireError::BufferFull)
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<const CAP: usize> WireWrite for heapless::Vec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        self.extend_from_slice(buf).map_err(|_| WireError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> WireResult<()> {
        self.push(byte).map_err(|_| WireError::BufferFull)
    }
}

#[cfg(feature = "smallvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "smallvec")))]
impl<const CAP: usize> WireWrite for smallvec::SmallVec<[u8; CAP]>
    where [u8; CAP]: smallvec::Array<Item = u8>
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> WireResult<()> {
        self.push(byte);
        Ok(())
    }
}

#[cfg(feature = "tinyvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "tinyvec")))]
impl<const CAP: usize> WireWrite for tinyvec::ArrayVec<[u8; CAP]>
    where [u8; CAP]: tinyvec::Array<Item = u8>
{
    fn write(&mut self, buf: &[u8]) -> WireResult<()> {
        let spare = self.grab_spare_slice_mut();
        match spare.get_mut(..buf.len()) {
            Some(chunk) => chunk.copy_from_slice(buf),
            None => return Err(WireError::BufferFull)
        }
        self.set_len(self.len() + buf.len());
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> WireResult<()> {
        self.try_push(byte).map_or(Ok(()), |_| Err(WireError::BufferFull))
    }
}
