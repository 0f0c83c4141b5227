/// Implementation for foreign types
#[cfg(feature = "std")]
use std::{vec::Vec, collections::VecDeque, io::Cursor};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{vec::Vec, collections::VecDeque};

#[allow(unused_imports)]
use super::*;

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl BinWrite for Vec<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push(byte);
        Ok(())
    }
    #[inline]
    fn position(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl BinWrite for VecDeque<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend(buf.iter().copied());
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push_back(byte);
        Ok(())
    }
    #[inline]
    fn position(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T> BinWrite for Cursor<T>
    where Cursor<T>: std::io::Write
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        std::io::Write::write_all(self, buf).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn position(&self) -> u64 {
        Cursor::position(self)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T: AsRef<[u8]>> BinRead for Cursor<T> {
    fn read_byte(&mut self) -> StreamResult<u8> {
        let position = Cursor::position(self);
        let byte = usize::try_from(position).ok()
                   .and_then(|index| self.get_ref().as_ref().get(index).copied())
                   .ok_or(StreamError::UnexpectedEof)?;
        self.set_position(position + 1);
        Ok(byte)
    }
    #[inline]
    fn position(&self) -> u64 {
        Cursor::position(self)
    }
    fn seek(&mut self, position: u64) -> StreamResult<()> {
        if position > self.get_ref().as_ref().len() as u64 {
            return Err(StreamError::InvalidSeek)
        }
        self.set_position(position);
        Ok(())
    }
    #[inline]
    fn remaining_len(&self) -> u64 {
        (self.get_ref().as_ref().len() as u64).saturating_sub(Cursor::position(self))
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<const CAP: usize> BinWrite for arrayvec::ArrayVec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.try_extend_from_slice(buf).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.try_push(byte).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn position(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<const CAP: usize> BinWrite for heapless::Vec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend_from_slice(buf).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push(byte).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn position(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(feature = "smallvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "smallvec")))]
impl<A: smallvec::Array<Item = u8>> BinWrite for smallvec::SmallVec<A> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push(byte);
        Ok(())
    }
    #[inline]
    fn position(&self) -> u64 {
        self.len() as u64
    }
}
