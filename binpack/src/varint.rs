//! LEB128 unsigned varints and the zig-zag mapping of signed integers.
//!
//! Values up to `u64::MAX` are encoded in 1-10 bytes. Each byte carries 7
//! value bits, least significant group first; the high bit is set on every
//! byte except the last one.
use binpack_stream::{BinRead, BinWrite, StreamResult};

use crate::de::{Error, Result};

/// Maximum number of bytes a `u64` varint can occupy.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const GROUP_MASK: u8 = 0x7f;

/// Write `value` as the shortest possible varint.
pub fn encode_varint<W: BinWrite>(output: &mut W, mut value: u64) -> StreamResult<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        let byte = (value as u8) & GROUP_MASK;
        value >>= 7;
        if value == 0 {
            buf[len] = byte;
            len += 1;
            break
        }
        buf[len] = byte | CONTINUATION;
        len += 1;
    }
    output.write(&buf[..len])
}

/// Read a varint.
///
/// Non-shortest groupings are accepted. More than [`MAX_VARINT_LEN`] groups,
/// or a last group overflowing 64 bits, is [`Error::MalformedVarint`].
pub fn decode_varint<R: BinRead>(input: &mut R) -> Result<u64> {
    let mut value = 0u64;
    for index in 0..MAX_VARINT_LEN {
        let byte = input.read_byte()?;
        let group = u64::from(byte & GROUP_MASK);
        if index == MAX_VARINT_LEN - 1 && group > 1 {
            return Err(Error::MalformedVarint)
        }
        value |= group << (7 * index);
        if byte & CONTINUATION == 0 {
            return Ok(value)
        }
    }
    Err(Error::MalformedVarint)
}

/// Return the number of bytes required to encode `value` as a varint.
pub fn varint_len(mut value: u64) -> usize {
    let mut size = 1;
    while value >= u64::from(CONTINUATION) {
        value >>= 7;
        size += 1;
    }
    size
}

/// Map `n >= 0` to `2n` and `n < 0` to `-2n - 1`.
#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Write `value` zig-zag mapped as a varint.
#[inline]
pub fn encode_zigzag_varint<W: BinWrite>(output: &mut W, value: i64) -> StreamResult<()> {
    encode_varint(output, zigzag_encode(value))
}

/// Read a zig-zag mapped varint.
#[inline]
pub fn decode_zigzag_varint<R: BinRead>(input: &mut R) -> Result<i64> {
    decode_varint(input).map(zigzag_decode)
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "std")]
    use std::vec::Vec;
    #[cfg(all(feature = "alloc",not(feature = "std")))]
    use alloc::vec::Vec;
    use binpack_stream::SliceReader;
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut output = Vec::new();
        encode_varint(&mut output, value).unwrap();
        assert_eq!(output.len(), varint_len(value));
        output
    }

    fn decoded(input: &[u8]) -> Result<u64> {
        let mut reader = SliceReader::new(input);
        let value = decode_varint(&mut reader)?;
        assert!(!reader.has_more());
        Ok(value)
    }

    #[test]
    fn test_encode_varint() {
        assert_eq!(encoded(0), [0x00]);
        assert_eq!(encoded(1), [0x01]);
        assert_eq!(encoded(127), [0x7f]);
        assert_eq!(encoded(128), [0x80, 0x01]);
        assert_eq!(encoded(300), [0xac, 0x02]);
        assert_eq!(encoded(50399), [0xdf, 0x89, 0x03]);
        assert_eq!(encoded(u32::MAX.into()), [0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert_eq!(encoded(u64::MAX),
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]);
    }

    #[test]
    fn test_decode_varint() {
        assert_eq!(decoded(&[0x00]), Ok(0));
        assert_eq!(decoded(&[0x7f]), Ok(127));
        assert_eq!(decoded(&[0xac, 0x02]), Ok(300));
        assert_eq!(decoded(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]),
            Ok(u64::MAX));
        // longer than necessary groupings are still valid
        assert_eq!(decoded(&[0x81, 0x80, 0x00]), Ok(1));
        for value in [0, 1, 127, 128, 16383, 16384, 2_097_151, u32::MAX.into(), u64::MAX - 1] {
            assert_eq!(decoded(&encoded(value)), Ok(value));
        }
    }

    #[test]
    fn test_decode_varint_errors() {
        assert_eq!(decoded(&[]), Err(Error::UnexpectedEof));
        assert_eq!(decoded(&[0x80]), Err(Error::UnexpectedEof));
        assert_eq!(decoded(&[0xff, 0xff]), Err(Error::UnexpectedEof));
        assert_eq!(decoded(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02]),
            Err(Error::MalformedVarint));
        assert_eq!(decoded(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00]),
            Err(Error::MalformedVarint));
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(-25200), 50399);
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
        for value in [0, 1, -1, 2, -2, 157, -25200, i64::MAX, i64::MIN] {
            assert_eq!(zigzag_decode(zigzag_encode(value)), value);
        }
        assert_eq!(zigzag_decode(628), 314);
        assert_eq!(zigzag_decode(627), -314);
    }

    #[test]
    fn test_zigzag_varint() {
        let mut output = Vec::new();
        encode_zigzag_varint(&mut output, -25200).unwrap();
        assert_eq!(output, [0xdf, 0x89, 0x03]);
        let mut reader = SliceReader::new(&output);
        assert_eq!(decode_zigzag_varint(&mut reader), Ok(-25200));
    }
}
