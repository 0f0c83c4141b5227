//! Encoding plans.
#[cfg(feature = "std")]
use std::{boxed::Box, vec::Vec};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{boxed::Box, vec::Vec};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The encoding scheme of a single document position.
///
/// Container plans own the plans of their items. The JSON form of a plan is
/// `{"binpackEncoding": NAME, "binpackOptions": {...}}`, see [`crate::loader`].
///
/// Integer `multiplier`s may be negative, only their absolute value is used.
/// A zero `multiplier` is rejected by the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "binpackEncoding", content = "binpackOptions")]
pub enum Plan {
    /// An integer in `minimum..=maximum` that is a multiple of `multiplier`,
    /// as a single byte index. At most 256 multiples may lie within the range.
    #[serde(rename = "BOUNDED_MULTIPLE_8BITS_ENUM_FIXED")]
    BoundedMultiple8BitsEnumFixed { minimum: i64, maximum: i64, multiplier: i64 },
    /// An integer not lower than `minimum` that is a multiple of `multiplier`.
    #[serde(rename = "FLOOR_MULTIPLE_ENUM_VARINT")]
    FloorMultipleEnumVarint { minimum: i64, multiplier: i64 },
    /// An integer not greater than `maximum` that is a multiple of `multiplier`.
    #[serde(rename = "ROOF_MULTIPLE_MIRROR_ENUM_VARINT")]
    RoofMultipleMirrorEnumVarint { maximum: i64, multiplier: i64 },
    /// Any integer that is a multiple of `multiplier`.
    #[serde(rename = "ARBITRARY_MULTIPLE_ZIGZAG_VARINT")]
    ArbitraryMultipleZigzagVarint { multiplier: i64 },
    /// Any number, as a decimal mantissa and a decimal point position.
    #[serde(rename = "DOUBLE_VARINT_TUPLE")]
    DoubleVarintTuple {},
    /// One of at most 256 `choices`.
    #[serde(rename = "BYTE_CHOICE_INDEX")]
    ByteChoiceIndex { choices: Vec<Value> },
    /// One of any number of `choices`.
    #[serde(rename = "LARGE_CHOICE_INDEX")]
    LargeChoiceIndex { choices: Vec<Value> },
    /// One of at most 256 `choices`, where the first one takes no space.
    #[serde(rename = "TOP_LEVEL_BYTE_CHOICE_INDEX")]
    TopLevelByteChoiceIndex { choices: Vec<Value> },
    /// Always `value`.
    #[serde(rename = "CONST_NONE")]
    ConstNone { value: Value },
    /// A string of exactly `size` bytes.
    #[serde(rename = "UTF8_STRING_NO_LENGTH")]
    Utf8StringNoLength { size: u64 },
    /// A string of at least `minimum` bytes.
    #[serde(rename = "FLOOR_VARINT_PREFIX_UTF8_STRING_SHARED")]
    FloorVarintPrefixUtf8StringShared { minimum: u64 },
    /// A string of at most `maximum` bytes.
    #[serde(rename = "ROOF_VARINT_PREFIX_UTF8_STRING_SHARED")]
    RoofVarintPrefixUtf8StringShared { maximum: u64 },
    /// A string of `minimum..=maximum` bytes, with less than 255 possible lengths.
    #[serde(rename = "BOUNDED_8BIT_PREFIX_UTF8_STRING_SHARED")]
    Bounded8BitPrefixUtf8StringShared { minimum: u64, maximum: u64 },
    /// A `YYYY-MM-DD` date string.
    #[serde(rename = "RFC3339_DATE_INTEGER_TRIPLET")]
    Rfc3339DateIntegerTriplet {},
    /// Any string.
    #[serde(rename = "PREFIX_VARINT_LENGTH_STRING_SHARED")]
    PrefixVarintLengthStringShared {},
    /// An array of exactly `size` items.
    #[serde(rename = "FIXED_TYPED_ARRAY", rename_all = "camelCase")]
    FixedTypedArray {
        size: u64,
        encoding: Box<Plan>,
        #[serde(default)]
        prefix_encodings: Vec<Plan>
    },
    /// An array of `minimum..=maximum` items, with at most 256 possible lengths.
    #[serde(rename = "BOUNDED_8BITS_TYPED_ARRAY", rename_all = "camelCase")]
    Bounded8BitsTypedArray {
        minimum: u64,
        maximum: u64,
        encoding: Box<Plan>,
        #[serde(default)]
        prefix_encodings: Vec<Plan>
    },
    /// An array of at least `minimum` items.
    #[serde(rename = "FLOOR_TYPED_ARRAY", rename_all = "camelCase")]
    FloorTypedArray {
        minimum: u64,
        encoding: Box<Plan>,
        #[serde(default)]
        prefix_encodings: Vec<Plan>
    },
    /// An array of at most `maximum` items.
    #[serde(rename = "ROOF_TYPED_ARRAY", rename_all = "camelCase")]
    RoofTypedArray {
        maximum: u64,
        encoding: Box<Plan>,
        #[serde(default)]
        prefix_encodings: Vec<Plan>
    },
    /// An object with exactly `size` members.
    #[serde(rename = "FIXED_TYPED_ARBITRARY_OBJECT", rename_all = "camelCase")]
    FixedTypedArbitraryObject {
        size: u64,
        key_encoding: Box<Plan>,
        encoding: Box<Plan>
    },
    /// An object with any number of members.
    #[serde(rename = "VARINT_TYPED_ARBITRARY_OBJECT", rename_all = "camelCase")]
    VarintTypedArbitraryObject {
        key_encoding: Box<Plan>,
        encoding: Box<Plan>
    },
    /// Any JSON value, prefixed with a type tag.
    #[serde(rename = "ANY_PACKED_TYPE_TAG_BYTE_PREFIX")]
    AnyPackedTypeTagBytePrefix {},
}

/// Return the plan of the item at `index` of an array: the prefix encoding
/// at `index` if there is one, `encoding` otherwise.
#[inline]
pub fn select_item_encoding<'a>(encoding: &'a Plan, prefix_encodings: &'a [Plan], index: usize) -> &'a Plan {
    prefix_encodings.get(index).unwrap_or(encoding)
}

impl Plan {
    /// Return the canonical name of the scheme.
    pub fn name(&self) -> &'static str {
        use Plan::*;
        match self {
            BoundedMultiple8BitsEnumFixed {..} => "BOUNDED_MULTIPLE_8BITS_ENUM_FIXED",
            FloorMultipleEnumVarint {..} => "FLOOR_MULTIPLE_ENUM_VARINT",
            RoofMultipleMirrorEnumVarint {..} => "ROOF_MULTIPLE_MIRROR_ENUM_VARINT",
            ArbitraryMultipleZigzagVarint {..} => "ARBITRARY_MULTIPLE_ZIGZAG_VARINT",
            DoubleVarintTuple {} => "DOUBLE_VARINT_TUPLE",
            ByteChoiceIndex {..} => "BYTE_CHOICE_INDEX",
            LargeChoiceIndex {..} => "LARGE_CHOICE_INDEX",
            TopLevelByteChoiceIndex {..} => "TOP_LEVEL_BYTE_CHOICE_INDEX",
            ConstNone {..} => "CONST_NONE",
            Utf8StringNoLength {..} => "UTF8_STRING_NO_LENGTH",
            FloorVarintPrefixUtf8StringShared {..} => "FLOOR_VARINT_PREFIX_UTF8_STRING_SHARED",
            RoofVarintPrefixUtf8StringShared {..} => "ROOF_VARINT_PREFIX_UTF8_STRING_SHARED",
            Bounded8BitPrefixUtf8StringShared {..} => "BOUNDED_8BIT_PREFIX_UTF8_STRING_SHARED",
            Rfc3339DateIntegerTriplet {} => "RFC3339_DATE_INTEGER_TRIPLET",
            PrefixVarintLengthStringShared {} => "PREFIX_VARINT_LENGTH_STRING_SHARED",
            FixedTypedArray {..} => "FIXED_TYPED_ARRAY",
            Bounded8BitsTypedArray {..} => "BOUNDED_8BITS_TYPED_ARRAY",
            FloorTypedArray {..} => "FLOOR_TYPED_ARRAY",
            RoofTypedArray {..} => "ROOF_TYPED_ARRAY",
            FixedTypedArbitraryObject {..} => "FIXED_TYPED_ARBITRARY_OBJECT",
            VarintTypedArbitraryObject {..} => "VARINT_TYPED_ARBITRARY_OBJECT",
            AnyPackedTypeTagBytePrefix {} => "ANY_PACKED_TYPE_TAG_BYTE_PREFIX",
        }
    }

    /// For array plans return the plan of the item at `index`.
    ///
    /// Return `None` for any other plan.
    pub fn item_encoding(&self, index: usize) -> Option<&Plan> {
        match self {
            Plan::FixedTypedArray { encoding, prefix_encodings, .. }|
            Plan::Bounded8BitsTypedArray { encoding, prefix_encodings, .. }|
            Plan::FloorTypedArray { encoding, prefix_encodings, .. }|
            Plan::RoofTypedArray { encoding, prefix_encodings, .. } => {
                Some(select_item_encoding(encoding, prefix_encodings, index))
            }
            _ => None
        }
    }

    /// Return `true` if this plan encodes any document without a schema.
    pub fn is_any(&self) -> bool {
        matches!(self, Plan::AnyPackedTypeTagBytePrefix {})
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::AnyPackedTypeTagBytePrefix {}
    }
}
