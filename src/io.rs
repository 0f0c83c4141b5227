//! Adapters running the codec over `std::io` streams.
use std::io::{Read, Seek, SeekFrom, Write};

use super::*;

/// Wraps a [`Read`] + [`Seek`] stream, e.g. a [`std::fs::File`].
///
/// The length of the stream is queried once on construction, so the stream
/// must not grow while it is being decoded.
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
    start: u64,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> IoReader<R> {
    /// Create a reader starting at the current position of `inner`.
    ///
    /// Offsets reported by [`BinRead::position`] are relative to that position.
    pub fn new(mut inner: R) -> StreamResult<Self> {
        let start = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(start))?;
        Ok(IoReader { inner, start, position: 0, len: end.saturating_sub(start) })
    }
    /// Destruct into the underlying stream
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> BinRead for IoReader<R> {
    fn read_byte(&mut self) -> StreamResult<u8> {
        let mut byte = 0u8;
        self.read_into(core::slice::from_mut(&mut byte))?;
        Ok(byte)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        if (buf.len() as u64) > self.remaining_len() {
            return Err(StreamError::UnexpectedEof)
        }
        self.inner.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, position: u64) -> StreamResult<()> {
        if position > self.len {
            return Err(StreamError::InvalidSeek)
        }
        self.inner.seek(SeekFrom::Start(self.start + position))?;
        self.position = position;
        Ok(())
    }

    #[inline]
    fn remaining_len(&self) -> u64 {
        self.len - self.position
    }
}

/// Wraps a [`Write`] stream and counts the bytes written to it.
#[derive(Debug)]
pub struct IoWriter<W> {
    inner: W,
    position: u64,
}

impl<W: Write> IoWriter<W> {
    /// Create new instance
    pub fn new(inner: W) -> Self {
        IoWriter { inner, position: 0 }
    }
    /// Flush the underlying stream
    pub fn flush(&mut self) -> StreamResult<()> {
        Ok(self.inner.flush()?)
    }
    /// Destruct into the underlying stream
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> BinWrite for IoWriter<W> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.inner.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }
}
