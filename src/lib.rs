//! Positioned byte streams for JSON BinPack encoders and decoders.
//!
//! Several BinPack schemes refer back to absolute stream offsets, so every
//! writer reports how many bytes it has produced and every reader can jump
//! back to an earlier offset and return.
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

use core::fmt;

mod foreign;
#[cfg(feature = "std")]
mod io;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use io::{IoReader, IoWriter};

pub type StreamResult<T> = Result<T, StreamError>;

/// An error returned by [`BinWrite`] and [`BinRead`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StreamError {
    /// Buffer is full
    BufferFull,
    /// Attempted to read past the end of the stream
    UnexpectedEof,
    /// Attempted to seek past the end of the stream
    InvalidSeek,
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    /// An underlying I/O error
    Io(std::io::ErrorKind),
}

impl core::error::Error for StreamError {}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::BufferFull => f.write_str("buffer is full"),
            StreamError::UnexpectedEof => f.write_str("unexpected end of stream"),
            StreamError::InvalidSeek => f.write_str("seek position out of bounds"),
            #[cfg(feature = "std")]
            StreamError::Io(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => StreamError::UnexpectedEof,
            std::io::ErrorKind::WriteZero => StreamError::BufferFull,
            kind => StreamError::Io(kind)
        }
    }
}

/// Encoders write data to the implementations of this trait.
pub trait BinWrite {
    /// Write all bytes from `buf` to the internal buffer.
    ///
    /// When over capacity return `Err(StreamError::BufferFull)`.
    fn write(&mut self, buf: &[u8]) -> StreamResult<()>;
    /// Write a single `byte` to the internal buffer.
    ///
    /// When over capacity return `Err(StreamError::BufferFull)`.
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.write(core::slice::from_ref(&byte))
    }
    /// Return the number of bytes written so far, which is the absolute
    /// offset of the next written byte.
    fn position(&self) -> u64;
}

impl<T: BinWrite + ?Sized> BinWrite for &'_ mut T {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        (**self).write(buf)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        (**self).write_byte(byte)
    }
    #[inline]
    fn position(&self) -> u64 {
        (**self).position()
    }
}

/// Decoders read data from the implementations of this trait.
///
/// A reader is a cursor over a stream of a known length. The cursor may be
/// moved anywhere between the start and the end of the stream (inclusive).
pub trait BinRead {
    /// Read the next byte or return `Err(StreamError::UnexpectedEof)`.
    fn read_byte(&mut self) -> StreamResult<u8>;
    /// Fill `buf` with the next `buf.len()` bytes.
    ///
    /// On `Err(StreamError::UnexpectedEof)` the cursor position is unspecified.
    fn read_into(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        for byte in buf.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }
    /// Return the absolute offset of the next byte to be read.
    fn position(&self) -> u64;
    /// Move the cursor to the absolute offset `position`.
    ///
    /// Return `Err(StreamError::InvalidSeek)` if `position` lies past the end.
    fn seek(&mut self, position: u64) -> StreamResult<()>;
    /// Return the number of bytes between the cursor and the end of the stream.
    fn remaining_len(&self) -> u64;
    /// Return `true` if at least one more byte can be read.
    #[inline]
    fn has_more(&self) -> bool {
        self.remaining_len() > 0
    }
}

impl<T: BinRead + ?Sized> BinRead for &'_ mut T {
    #[inline]
    fn read_byte(&mut self) -> StreamResult<u8> {
        (**self).read_byte()
    }
    #[inline]
    fn read_into(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        (**self).read_into(buf)
    }
    #[inline]
    fn position(&self) -> u64 {
        (**self).position()
    }
    #[inline]
    fn seek(&mut self, position: u64) -> StreamResult<()> {
        (**self).seek(position)
    }
    #[inline]
    fn remaining_len(&self) -> u64 {
        (**self).remaining_len()
    }
}

/// A simple slice writer
#[derive(Debug, PartialEq)]
pub struct SliceWriter<'a> {
    pub buf: &'a mut [u8],
    pub len: usize
}

impl<'a> AsRef<[u8]> for SliceWriter<'a> {
    /// Returns a populated portion of the slice
    fn as_ref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<'a> SliceWriter<'a> {
    /// Create new instance
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceWriter { buf, len: 0 }
    }
    /// Return populated length
    pub fn len(&self) -> usize {
        self.len
    }
    /// Return `true` if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Return total capacity
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
    /// Return remaining capacity
    pub fn rem_capacity(&self) -> usize {
        self.buf.len() - self.len
    }
    /// Split the underlying buffer and return the portion of the populated buffer
    /// with an underlying buffer's borrowed lifetime.
    ///
    /// The returned writer starts over at position 0.
    pub fn split(self) -> (&'a mut[u8], Self) {
        let (res, buf) = self.buf.split_at_mut(self.len);
        (res, Self { buf, len: 0 })
    }
    /// Destruct into an underlying buffer
    pub fn into_buf(self) -> &'a mut [u8] {
        self.buf
    }
}

impl BinWrite for SliceWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        let end = self.len + buf.len();
        match self.buf.get_mut(self.len..end) {
            Some(chunk) => {
                chunk.copy_from_slice(buf);
                self.len = end;
                Ok(())
            }
            None => Err(StreamError::BufferFull)
        }
    }

    #[inline]
    fn position(&self) -> u64 {
        self.len as u64
    }
}

/// A reader over a borrowed slice of bytes
#[derive(Debug, Clone, PartialEq)]
pub struct SliceReader<'a> {
    input: &'a [u8],
    index: usize
}

impl<'a> SliceReader<'a> {
    /// Create new instance positioned at the start of `input`
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader { input, index: 0 }
    }
    /// Peek at the next byte without advancing the cursor
    #[inline]
    pub fn peek(&self) -> StreamResult<u8> {
        self.input.get(self.index).copied()
        .ok_or(StreamError::UnexpectedEof)
    }
    /// Return the unread portion of the input slice
    pub fn tail(&self) -> &'a [u8] {
        &self.input[self.index..]
    }
    /// Return the whole input slice
    pub fn get_ref(&self) -> &'a [u8] {
        self.input
    }
}

impl BinRead for SliceReader<'_> {
    #[inline]
    fn read_byte(&mut self) -> StreamResult<u8> {
        let byte = self.peek()?;
        self.index += 1;
        Ok(byte)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let end = self.index.checked_add(buf.len())
                  .ok_or(StreamError::UnexpectedEof)?;
        let chunk = self.input.get(self.index..end)
                  .ok_or(StreamError::UnexpectedEof)?;
        buf.copy_from_slice(chunk);
        self.index = end;
        Ok(())
    }

    #[inline]
    fn position(&self) -> u64 {
        self.index as u64
    }

    fn seek(&mut self, position: u64) -> StreamResult<()> {
        match usize::try_from(position) {
            Ok(index) if index <= self.input.len() => {
                self.index = index;
                Ok(())
            }
            _ => Err(StreamError::InvalidSeek)
        }
    }

    #[inline]
    fn remaining_len(&self) -> u64 {
        (self.input.len() - self.index) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_writer() {
        let mut buf = [0u8;8];
        let mut writer = SliceWriter::new(&mut buf[..]);
        assert_eq!(writer.position(), 0);
        writer.write(b"\x04foo").unwrap();
        writer.write_byte(0x00).unwrap();
        assert_eq!(writer.position(), 5);
        writer.write(&[0x05, 0x00]).unwrap();
        assert_eq!(writer.as_ref(), b"\x04foo\x00\x05\x00");
        assert_eq!(writer.rem_capacity(), 1);
        assert_eq!(writer.write(&[0x03, 0x00]).unwrap_err(), StreamError::BufferFull);
        let (head, mut writer) = writer.split();
        assert_eq!(head, b"\x04foo\x00\x05\x00");
        assert_eq!(writer.position(), 0);
        writer.write_byte(0x03).unwrap();
        assert_eq!(writer.write_byte(0x00).unwrap_err(), StreamError::BufferFull);
    }

    #[test]
    fn test_slice_reader() {
        let mut reader = SliceReader::new(b"\x04foo\x00\x05");
        assert_eq!(reader.remaining_len(), 6);
        assert_eq!(reader.read_byte(), Ok(0x04));
        let mut buf = [0u8;3];
        reader.read_into(&mut buf).unwrap();
        assert_eq!(&buf, b"foo");
        assert_eq!(reader.position(), 4);
        assert!(reader.has_more());
        reader.seek(1).unwrap();
        assert_eq!(reader.peek(), Ok(b'f'));
        assert_eq!(reader.tail(), b"foo\x00\x05");
        reader.seek(6).unwrap();
        assert!(!reader.has_more());
        assert_eq!(reader.read_byte(), Err(StreamError::UnexpectedEof));
        assert_eq!(reader.seek(7), Err(StreamError::InvalidSeek));
        assert_eq!(reader.position(), 6);
        reader.seek(4).unwrap();
        let mut buf = [0u8;3];
        assert_eq!(reader.read_into(&mut buf), Err(StreamError::UnexpectedEof));
    }

    #[test]
    fn test_stream_error_string() {
        use core::fmt::Write;
        let mut buf = [0u8;32];
        let mut writer = SliceWriter::new(&mut buf);
        let mut fmt = StrWriter(&mut writer);
        write!(fmt, "{}", StreamError::UnexpectedEof).unwrap();
        assert_eq!(writer.as_ref(), b"unexpected end of stream");

        struct StrWriter<'a, 'b>(&'a mut SliceWriter<'b>);
        impl core::fmt::Write for StrWriter<'_, '_> {
            fn write_str(&mut self, s: &str) -> core::fmt::Result {
                self.0.write(s.as_bytes()).map_err(|_| core::fmt::Error)
            }
        }
    }
}
