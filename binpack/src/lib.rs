//! A schema-driven JSON BinPack encoder and decoder for [`binpack-stream`](`binpack_stream`).
/*!

Every position of a document is encoded with a scheme chosen ahead of time
and described by a [`Plan`]. The byte stream carries no type information
unless [`Plan::AnyPackedTypeTagBytePrefix`] is used, so the same [`Plan`]
must be provided to decode the data.

| Scheme                                   | Document   | Bytes
|------------------------------------------|------------|--------------------------------------------
| `BOUNDED_MULTIPLE_8BITS_ENUM_FIXED`      | integer    | `u8` multiple index from the aligned minimum
| `FLOOR_MULTIPLE_ENUM_VARINT`             | integer    | `varint` multiple index from the aligned minimum
| `ROOF_MULTIPLE_MIRROR_ENUM_VARINT`       | integer    | `varint` multiple index down from the aligned maximum
| `ARBITRARY_MULTIPLE_ZIGZAG_VARINT`       | integer    | zig-zag `varint` of `value / multiplier`
| `DOUBLE_VARINT_TUPLE`                    | number     | zig-zag `varint` mantissa, `varint` decimal point
| `BYTE_CHOICE_INDEX`                      | any        | `u8` index into choices
| `LARGE_CHOICE_INDEX`                     | any        | `varint` index into choices
| `TOP_LEVEL_BYTE_CHOICE_INDEX`            | any        | nothing for the first choice, otherwise `u8` index - 1
| `CONST_NONE`                             | any        | nothing
| `UTF8_STRING_NO_LENGTH`                  | string     | raw UTF-8
| `FLOOR_VARINT_PREFIX_UTF8_STRING_SHARED` | string     | `varint` length - minimum + 1, raw UTF-8 or a back-reference
| `ROOF_VARINT_PREFIX_UTF8_STRING_SHARED`  | string     | `varint` maximum - length + 1, raw UTF-8 or a back-reference
| `BOUNDED_8BIT_PREFIX_UTF8_STRING_SHARED` | string     | `u8` length - minimum + 1, raw UTF-8 or a back-reference
| `RFC3339_DATE_INTEGER_TRIPLET`           | string     | `u16` (LE) year, `u8` month, `u8` day
| `PREFIX_VARINT_LENGTH_STRING_SHARED`     | string     | `varint` length + 1, raw UTF-8 or a back-reference
| `FIXED_TYPED_ARRAY`                      | array      | items
| `BOUNDED_8BITS_TYPED_ARRAY`              | array      | `u8` length - minimum, items
| `FLOOR_TYPED_ARRAY`                      | array      | `varint` length - minimum, items
| `ROOF_TYPED_ARRAY`                       | array      | `varint` maximum - length, items
| `FIXED_TYPED_ARBITRARY_OBJECT`           | object     | key, value pairs
| `VARINT_TYPED_ARBITRARY_OBJECT`          | object     | `varint` length, key, value pairs
| `ANY_PACKED_TYPE_TAG_BYTE_PREFIX`        | any        | type tag byte, payload

A back-reference is a `0x00` byte in place of the length prefix followed by
the distance to an earlier occurrence of the same string. An [`Encoder`]
tracks the strings it has written in [`cache::SharedStrings`].

Object members are encoded in the iteration order of [`serde_json::Map`],
so the `preserve_order` feature (enabled by default) is required for the
output to follow the document order.

```
use binpack::{to_vec, from_slice, Plan};
use serde_json::json;

let plan = Plan::FloorVarintPrefixUtf8StringShared { minimum: 3 };
let bytes = to_vec(&json!("foo"), &plan).unwrap();
assert_eq!(bytes, [0x01, b'f', b'o', b'o']);
assert_eq!(from_slice(&bytes, &plan).unwrap(), (json!("foo"), 4));
```
*/
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("binpack requires either the \"std\" or the \"alloc\" feature");

pub mod varint;
pub mod numeric;
pub mod cache;
pub mod plan;
pub mod loader;
pub mod ser;
pub mod de;

pub use binpack_stream;
pub use binpack_stream::{BinRead, BinWrite, SliceReader, SliceWriter};
pub use serde_json::{Map, Value};

pub use plan::Plan;
pub use loader::load;
pub use cache::CacheLimits;

pub use ser::{
    Encoder,
    to_vec,
    to_writer
};

pub use de::{
    Decoder,
    DecoderOptions,
    from_slice,
    from_slice_split_tail
};

mod magick {
    use crate::numeric::uint_max;
    /* ANY_PACKED_TYPE_TAG_BYTE_PREFIX MAGICK */
    pub const TYPE_BITS: u32 = 3;
    pub const TYPE_MASK: u8 = 0b0000_0111;

    pub const TYPE_SHARED_STRING: u8         = 0b000;
    pub const TYPE_STRING: u8                = 0b001;
    pub const TYPE_LONG_STRING: u8           = 0b010;
    pub const TYPE_OBJECT: u8                = 0b011;
    pub const TYPE_ARRAY: u8                 = 0b100;
    pub const TYPE_POSITIVE_INTEGER_BYTE: u8 = 0b101;
    pub const TYPE_NEGATIVE_INTEGER_BYTE: u8 = 0b110;
    pub const TYPE_OTHER: u8                 = 0b111;

    /* subtypes of TYPE_OTHER */
    pub const SUBTYPE_FALSE: u8                      = 0;
    pub const SUBTYPE_TRUE: u8                       = 1;
    pub const SUBTYPE_NULL: u8                       = 2;
    pub const SUBTYPE_POSITIVE_INTEGER: u8           = 3;
    pub const SUBTYPE_NEGATIVE_INTEGER: u8           = 4;
    pub const SUBTYPE_NUMBER: u8                     = 5;
    pub const SUBTYPE_POSITIVE_REAL_INTEGER_BYTE: u8 = 6;
    pub const SUBTYPE_LONG_STRING_BASE_EXPONENT_7: u8  = 7;
    pub const SUBTYPE_LONG_STRING_BASE_EXPONENT_10: u8 = 10;

    /// The largest value fitting in the 5 subtype bits
    pub const MAX_SUBTYPE: u64 = uint_max(5); /* 31 */
    /// Strings shorter than this are tagged with their length
    pub const SHORT_STRING_LIMIT: u64 = MAX_SUBTYPE;
    /// Strings shorter than this (and not shorter than `SHORT_STRING_LIMIT`) are `TYPE_LONG_STRING`
    pub const LONG_STRING_LIMIT: u64 = MAX_SUBTYPE * 2; /* 62 */
    /// Strings at least this long are tagged with a power of two base
    pub const EXPONENT_STRING_LIMIT: u64 = 1 << SUBTYPE_LONG_STRING_BASE_EXPONENT_7; /* 128 */

    #[inline(always)]
    pub const fn tag(typ: u8, subtype: u8) -> u8 {
        typ | (subtype << TYPE_BITS)
    }

    #[inline(always)]
    pub const fn split_tag(byte: u8) -> (u8, u8) {
        (byte & TYPE_MASK, byte >> TYPE_BITS)
    }

    pub const NULL: u8  = tag(TYPE_OTHER, SUBTYPE_NULL);  /* 0x17 */
    pub const FALSE: u8 = tag(TYPE_OTHER, SUBTYPE_FALSE); /* 0x07 */
    pub const TRUE: u8  = tag(TYPE_OTHER, SUBTYPE_TRUE);  /* 0x0f */
    pub const NUMBER: u8 = tag(TYPE_OTHER, SUBTYPE_NUMBER); /* 0x2f */
    pub const POSITIVE_REAL_INTEGER_BYTE: u8 = tag(TYPE_OTHER, SUBTYPE_POSITIVE_REAL_INTEGER_BYTE); /* 0x37 */
    pub const POSITIVE_INTEGER: u8 = tag(TYPE_OTHER, SUBTYPE_POSITIVE_INTEGER); /* 0x1f */
    pub const NEGATIVE_INTEGER: u8 = tag(TYPE_OTHER, SUBTYPE_NEGATIVE_INTEGER); /* 0x27 */
}
