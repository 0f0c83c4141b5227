//! JSON BinPack encoder
use core::fmt;

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{string::String, vec::Vec};

use serde_json::{Map, Number, Value};
use binpack_stream::{BinWrite, StreamError};

use crate::cache::{CacheLimits, Kind, SharedStrings};
use crate::numeric::*;
use crate::plan::{select_item_encoding, Plan};
use crate::varint::{encode_varint, encode_zigzag_varint};
use crate::magick::*;

/// Encoder error
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Expected an integer
    ExpectedInteger,
    /// Expected a number
    ExpectedNumber,
    /// Expected a string
    ExpectedString,
    /// Expected an array
    ExpectedArray,
    /// Expected an object
    ExpectedObject,
    /// Value or length outside of the bounds of the plan
    OutOfRange,
    /// Integer is not a multiple of the plan multiplier
    NotMultiple,
    /// Value is not one of the plan choices
    ChoiceNotFound,
    /// Value differs from the plan constant
    ConstMismatch,
    /// Length differs from the plan size
    SizeMismatch,
    /// String is not a valid `YYYY-MM-DD` date
    InvalidDate,
    /// Plan parameters can not encode any value
    InvalidPlan,
    /// Output stream error
    Stream(StreamError),
}

pub type Result<T> = core::result::Result<T, Error>;

impl serde::de::StdError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::ExpectedInteger => "Expected an integer",
            Error::ExpectedNumber => "Expected a number",
            Error::ExpectedString => "Expected a string",
            Error::ExpectedArray => "Expected an array",
            Error::ExpectedObject => "Expected an object",
            Error::OutOfRange => "Value out of the encoding range",
            Error::NotMultiple => "Integer is not a multiple of the encoding multiplier",
            Error::ChoiceNotFound => "Value is not one of the encoding choices",
            Error::ConstMismatch => "Value differs from the encoding constant",
            Error::SizeMismatch => "Length differs from the encoding size",
            Error::InvalidDate => "Invalid RFC 3339 full-date",
            Error::InvalidPlan => "Invalid encoding parameters",
            Error::Stream(err) => return write!(f, "{} while encoding", err)
        })
    }
}

impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        Error::Stream(err)
    }
}

/// Encode `value` with `plan` to a new vector of bytes.
pub fn to_vec(value: &Value, plan: &Plan) -> Result<Vec<u8>> {
    let mut vec = Vec::new();
    to_writer(&mut vec, value, plan)?;
    Ok(vec)
}

/// Encode `value` with `plan` to a [`BinWrite`] implementation.
///
/// Back-references are computed from `output.position()`, so a writer that
/// already holds data makes them relative to its own start.
pub fn to_writer<W: BinWrite>(output: W, value: &Value, plan: &Plan) -> Result<()> {
    Encoder::new(output).encode(value, plan)
}

/// The length prefix of a FLOOR/ROOF/BOUNDED prefixed string.
#[derive(Debug, Clone, Copy)]
enum LengthField {
    Varint(u64),
    Byte(u8)
}

/// Writes JSON values to a [`BinWrite`] output.
///
/// An encoder keeps track of the strings it has written, so any document
/// encoded with the same encoder may refer back to the strings of the
/// documents encoded before it. Such a stream must be decoded with a single
/// [`Decoder`](crate::Decoder) too.
#[derive(Debug)]
pub struct Encoder<W> {
    output: W,
    cache: SharedStrings
}

impl<W> Encoder<W> {
    /// Create a new encoder writing to `output`
    #[inline(always)]
    pub fn new(output: W) -> Self {
        Encoder { output, cache: SharedStrings::new() }
    }
    /// Create a new encoder with custom limits of the shared strings table
    pub fn with_limits(output: W, limits: CacheLimits) -> Self {
        Encoder { output, cache: SharedStrings::with_limits(limits) }
    }
    /// Destruct into the underlying output
    #[inline(always)]
    pub fn into_inner(self) -> W {
        self.output
    }
    /// Return a reference to the underlying output
    pub fn get_ref(&self) -> &W {
        &self.output
    }
    /// Return the table of strings written so far
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.cache
    }
}

fn expect_integer(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(integer) => Ok(integer),
            None if n.is_u64() => Err(Error::OutOfRange),
            None => Err(Error::ExpectedInteger)
        }
        _ => Err(Error::ExpectedInteger)
    }
}

fn expect_number(value: &Value) -> Result<&Number> {
    value.as_number().ok_or(Error::ExpectedNumber)
}

fn expect_str(value: &Value) -> Result<&str> {
    value.as_str().ok_or(Error::ExpectedString)
}

fn expect_array(value: &Value) -> Result<&[Value]> {
    value.as_array().map(Vec::as_slice).ok_or(Error::ExpectedArray)
}

fn expect_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or(Error::ExpectedObject)
}

fn expect_multiple(integer: i64, multiplier: i64) -> Result<(i128, u64)> {
    let multiplier = absolute_multiplier(multiplier).ok_or(Error::InvalidPlan)?;
    if !is_multiple(integer, multiplier) {
        return Err(Error::NotMultiple)
    }
    Ok((i128::from(integer) / i128::from(multiplier), multiplier))
}

fn to_index(index: i128) -> Result<u64> {
    u64::try_from(index).map_err(|_| Error::OutOfRange)
}

fn choice_index(value: &Value, choices: &[Value]) -> Result<usize> {
    if choices.is_empty() {
        return Err(Error::InvalidPlan)
    }
    choices.iter().position(|choice| choice == value).ok_or(Error::ChoiceNotFound)
}

/// Parse a `YYYY-MM-DD` full-date.
fn parse_date(date: &str) -> Result<(u16, u8, u8)> {
    fn digits(part: &[u8]) -> Result<u16> {
        part.iter().try_fold(0u16, |acc, &c| match c {
            b'0'..=b'9' => Ok(acc * 10 + u16::from(c - b'0')),
            _ => Err(Error::InvalidDate)
        })
    }
    match date.as_bytes() {
        [y @ .., b'-', m0, m1, b'-', d0, d1] if y.len() == 4 => {
            let year = digits(y)?;
            let month = digits(&[*m0, *m1])?;
            let day = digits(&[*d0, *d1])?;
            if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
                return Err(Error::InvalidDate)
            }
            Ok((year, month as u8, day as u8))
        }
        _ => Err(Error::InvalidDate)
    }
}

impl<W: BinWrite> Encoder<W> {
    /// Return the current output position
    #[inline]
    pub fn position(&self) -> u64 {
        self.output.position()
    }

    /// Encode `value` with `plan`.
    pub fn encode(&mut self, value: &Value, plan: &Plan) -> Result<()> {
        match plan {
            Plan::BoundedMultiple8BitsEnumFixed { minimum, maximum, multiplier } => {
                self.bounded_multiple_8bits_enum_fixed(value, *minimum, *maximum, *multiplier)
            }
            Plan::FloorMultipleEnumVarint { minimum, multiplier } => {
                self.floor_multiple_enum_varint(value, *minimum, *multiplier)
            }
            Plan::RoofMultipleMirrorEnumVarint { maximum, multiplier } => {
                self.roof_multiple_mirror_enum_varint(value, *maximum, *multiplier)
            }
            Plan::ArbitraryMultipleZigzagVarint { multiplier } => {
                self.arbitrary_multiple_zigzag_varint(value, *multiplier)
            }
            Plan::DoubleVarintTuple {} => self.double_varint_tuple(value),
            Plan::ByteChoiceIndex { choices } => self.byte_choice_index(value, choices),
            Plan::LargeChoiceIndex { choices } => self.large_choice_index(value, choices),
            Plan::TopLevelByteChoiceIndex { choices } => self.top_level_byte_choice_index(value, choices),
            Plan::ConstNone { value: constant } => self.const_none(value, constant),
            Plan::Utf8StringNoLength { size } => self.utf8_string_no_length(value, *size),
            Plan::FloorVarintPrefixUtf8StringShared { minimum } => {
                self.floor_varint_prefix_utf8_string_shared(value, *minimum)
            }
            Plan::RoofVarintPrefixUtf8StringShared { maximum } => {
                self.roof_varint_prefix_utf8_string_shared(value, *maximum)
            }
            Plan::Bounded8BitPrefixUtf8StringShared { minimum, maximum } => {
                self.bounded_8bit_prefix_utf8_string_shared(value, *minimum, *maximum)
            }
            Plan::Rfc3339DateIntegerTriplet {} => self.rfc3339_date_integer_triplet(value),
            Plan::PrefixVarintLengthStringShared {} => self.prefix_varint_length_string_shared(value),
            Plan::FixedTypedArray { size, encoding, prefix_encodings } => {
                self.fixed_typed_array(value, *size, encoding, prefix_encodings)
            }
            Plan::Bounded8BitsTypedArray { minimum, maximum, encoding, prefix_encodings } => {
                self.bounded_8bits_typed_array(value, *minimum, *maximum, encoding, prefix_encodings)
            }
            Plan::FloorTypedArray { minimum, encoding, prefix_encodings } => {
                self.floor_typed_array(value, *minimum, encoding, prefix_encodings)
            }
            Plan::RoofTypedArray { maximum, encoding, prefix_encodings } => {
                self.roof_typed_array(value, *maximum, encoding, prefix_encodings)
            }
            Plan::FixedTypedArbitraryObject { size, key_encoding, encoding } => {
                self.fixed_typed_arbitrary_object(value, *size, key_encoding, encoding)
            }
            Plan::VarintTypedArbitraryObject { key_encoding, encoding } => {
                self.varint_typed_arbitrary_object(value, key_encoding, encoding)
            }
            Plan::AnyPackedTypeTagBytePrefix {} => self.any_packed_type_tag_byte_prefix(value),
        }
    }

    /* integers */

    pub fn bounded_multiple_8bits_enum_fixed(&mut self, value: &Value, minimum: i64, maximum: i64, multiplier: i64) -> Result<()> {
        let integer = expect_integer(value)?;
        let m = absolute_multiplier(multiplier).ok_or(Error::InvalidPlan)?;
        let enum_minimum = i128::from(divide_ceil(minimum, m));
        let enum_maximum = i128::from(divide_floor(maximum, m));
        if enum_maximum < enum_minimum || enum_maximum - enum_minimum > i128::from(u8::MAX) {
            return Err(Error::InvalidPlan)
        }
        if integer < minimum || integer > maximum {
            return Err(Error::OutOfRange)
        }
        let (quotient, _) = expect_multiple(integer, multiplier)?;
        // minimum <= integer <= maximum so the index is within 0..=255
        let byte = (quotient - enum_minimum) as u8;
        Ok(self.output.write_byte(byte)?)
    }

    pub fn floor_multiple_enum_varint(&mut self, value: &Value, minimum: i64, multiplier: i64) -> Result<()> {
        let integer = expect_integer(value)?;
        let (quotient, m) = expect_multiple(integer, multiplier)?;
        if integer < minimum {
            return Err(Error::OutOfRange)
        }
        let index = to_index(quotient - i128::from(divide_ceil(minimum, m)))?;
        Ok(encode_varint(&mut self.output, index)?)
    }

    pub fn roof_multiple_mirror_enum_varint(&mut self, value: &Value, maximum: i64, multiplier: i64) -> Result<()> {
        let integer = expect_integer(value)?;
        let (quotient, m) = expect_multiple(integer, multiplier)?;
        if integer > maximum {
            return Err(Error::OutOfRange)
        }
        let index = to_index(i128::from(divide_floor(maximum, m)) - quotient)?;
        Ok(encode_varint(&mut self.output, index)?)
    }

    pub fn arbitrary_multiple_zigzag_varint(&mut self, value: &Value, multiplier: i64) -> Result<()> {
        let integer = expect_integer(value)?;
        let (quotient, _) = expect_multiple(integer, multiplier)?;
        // |quotient| <= |integer|
        Ok(encode_zigzag_varint(&mut self.output, quotient as i64)?)
    }

    /* reals */

    pub fn double_varint_tuple(&mut self, value: &Value) -> Result<()> {
        let number = expect_number(value)?;
        let (mantissa, point) = match number.as_i64() {
            Some(integer) => (integer, 0),
            None => number.as_f64().and_then(real_digits).ok_or(Error::OutOfRange)?
        };
        self.write_double(mantissa, point)
    }

    fn write_double(&mut self, mantissa: i64, point: u64) -> Result<()> {
        encode_zigzag_varint(&mut self.output, mantissa)?;
        Ok(encode_varint(&mut self.output, point)?)
    }

    /* enumerations */

    pub fn byte_choice_index(&mut self, value: &Value, choices: &[Value]) -> Result<()> {
        if choices.len() > 1 << 8 {
            return Err(Error::InvalidPlan)
        }
        let index = choice_index(value, choices)?;
        Ok(self.output.write_byte(index as u8)?)
    }

    pub fn large_choice_index(&mut self, value: &Value, choices: &[Value]) -> Result<()> {
        let index = choice_index(value, choices)?;
        Ok(encode_varint(&mut self.output, index as u64)?)
    }

    /// The first choice takes no space. This only makes sense for a top level
    /// value, where the end of the stream tells it apart from the others.
    pub fn top_level_byte_choice_index(&mut self, value: &Value, choices: &[Value]) -> Result<()> {
        if choices.len() > usize::from(u8::MAX) {
            return Err(Error::InvalidPlan)
        }
        match choice_index(value, choices)? {
            0 => Ok(()),
            index => Ok(self.output.write_byte((index - 1) as u8)?)
        }
    }

    pub fn const_none(&mut self, value: &Value, constant: &Value) -> Result<()> {
        if value != constant {
            return Err(Error::ConstMismatch)
        }
        Ok(())
    }

    /* strings */

    pub fn utf8_string_no_length(&mut self, value: &Value, size: u64) -> Result<()> {
        let string = expect_str(value)?;
        if string.len() as u64 != size {
            return Err(Error::SizeMismatch)
        }
        Ok(self.output.write(string.as_bytes())?)
    }

    pub fn floor_varint_prefix_utf8_string_shared(&mut self, value: &Value, minimum: u64) -> Result<()> {
        let string = expect_str(value)?;
        let length = (string.len() as u64).checked_sub(minimum)
                     .and_then(|n| n.checked_add(1))
                     .ok_or(Error::OutOfRange)?;
        self.prefixed_string_shared(string, LengthField::Varint(length))
    }

    pub fn roof_varint_prefix_utf8_string_shared(&mut self, value: &Value, maximum: u64) -> Result<()> {
        let string = expect_str(value)?;
        let length = maximum.checked_sub(string.len() as u64)
                     .and_then(|n| n.checked_add(1))
                     .ok_or(Error::OutOfRange)?;
        self.prefixed_string_shared(string, LengthField::Varint(length))
    }

    pub fn bounded_8bit_prefix_utf8_string_shared(&mut self, value: &Value, minimum: u64, maximum: u64) -> Result<()> {
        let string = expect_str(value)?;
        if maximum < minimum || maximum - minimum >= u64::from(u8::MAX) {
            return Err(Error::InvalidPlan)
        }
        let size = string.len() as u64;
        if size < minimum || size > maximum {
            return Err(Error::OutOfRange)
        }
        // size - minimum < 255
        let length = (size - minimum + 1) as u8;
        self.prefixed_string_shared(string, LengthField::Byte(length))
    }

    fn write_length(&mut self, field: LengthField) -> Result<()> {
        match field {
            LengthField::Varint(length) => encode_varint(&mut self.output, length)?,
            LengthField::Byte(length) => self.output.write_byte(length)?
        }
        Ok(())
    }

    /// Write `string` either as `length, UTF-8` or, if it was already
    /// written, as `0x00, length, distance`. The distance is counted from
    /// its own start back to the start of the earlier UTF-8 bytes.
    fn prefixed_string_shared(&mut self, string: &str, field: LengthField) -> Result<()> {
        if let Some(offset) = self.cache.find(string, Kind::Standalone) {
            self.output.write_byte(0)?;
            self.write_length(field)?;
            self.write_distance(offset)
        }
        else {
            self.write_length(field)?;
            self.write_standalone(string)
        }
    }

    fn write_distance(&mut self, offset: u64) -> Result<()> {
        let position = self.output.position();
        tracing::trace!(position, offset, "string back-reference");
        Ok(encode_varint(&mut self.output, position - offset)?)
    }

    fn write_standalone(&mut self, string: &str) -> Result<()> {
        let position = self.output.position();
        self.cache.record(string, position, Kind::Standalone);
        Ok(self.output.write(string.as_bytes())?)
    }

    pub fn rfc3339_date_integer_triplet(&mut self, value: &Value) -> Result<()> {
        let (year, month, day) = parse_date(expect_str(value)?)?;
        self.output.write(&year.to_le_bytes())?;
        self.output.write_byte(month)?;
        Ok(self.output.write_byte(day)?)
    }

    /// A repeated string is written as `0x00` followed by the distance to
    /// the previous framing of the same string, literal or pointer.
    pub fn prefix_varint_length_string_shared(&mut self, value: &Value) -> Result<()> {
        let string = expect_str(value)?;
        self.prefix_varint_length_str_shared(string)
    }

    fn prefix_varint_length_str_shared(&mut self, string: &str) -> Result<()> {
        let start = self.output.position();
        match self.cache.find(string, Kind::PrefixLengthVarintPlusOne) {
            Some(offset) => {
                self.output.write_byte(0)?;
                self.write_distance(offset)?;
            }
            None => {
                encode_varint(&mut self.output, string.len() as u64 + 1)?;
                self.write_standalone(string)?;
            }
        }
        self.cache.record(string, start, Kind::PrefixLengthVarintPlusOne);
        Ok(())
    }

    /* arrays */

    fn write_items(&mut self, items: &[Value], encoding: &Plan, prefix_encodings: &[Plan]) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            self.encode(item, select_item_encoding(encoding, prefix_encodings, index))?;
        }
        Ok(())
    }

    pub fn fixed_typed_array(&mut self, value: &Value, size: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<()> {
        let items = expect_array(value)?;
        if items.len() as u64 != size {
            return Err(Error::SizeMismatch)
        }
        self.write_items(items, encoding, prefix_encodings)
    }

    pub fn bounded_8bits_typed_array(&mut self, value: &Value, minimum: u64, maximum: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<()> {
        let items = expect_array(value)?;
        if maximum < minimum || !is_byte(maximum - minimum) {
            return Err(Error::InvalidPlan)
        }
        let size = items.len() as u64;
        if size < minimum || size > maximum {
            return Err(Error::OutOfRange)
        }
        self.output.write_byte((size - minimum) as u8)?;
        self.write_items(items, encoding, prefix_encodings)
    }

    pub fn floor_typed_array(&mut self, value: &Value, minimum: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<()> {
        let items = expect_array(value)?;
        let index = (items.len() as u64).checked_sub(minimum).ok_or(Error::OutOfRange)?;
        encode_varint(&mut self.output, index)?;
        self.write_items(items, encoding, prefix_encodings)
    }

    pub fn roof_typed_array(&mut self, value: &Value, maximum: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<()> {
        let items = expect_array(value)?;
        let index = maximum.checked_sub(items.len() as u64).ok_or(Error::OutOfRange)?;
        encode_varint(&mut self.output, index)?;
        self.write_items(items, encoding, prefix_encodings)
    }

    /* objects */

    fn write_members(&mut self, object: &Map<String, Value>, key_encoding: &Plan, encoding: &Plan) -> Result<()> {
        for (key, member) in object {
            self.encode(&Value::String(key.clone()), key_encoding)?;
            self.encode(member, encoding)?;
        }
        Ok(())
    }

    pub fn fixed_typed_arbitrary_object(&mut self, value: &Value, size: u64, key_encoding: &Plan, encoding: &Plan) -> Result<()> {
        let object = expect_object(value)?;
        if object.len() as u64 != size {
            return Err(Error::SizeMismatch)
        }
        self.write_members(object, key_encoding, encoding)
    }

    pub fn varint_typed_arbitrary_object(&mut self, value: &Value, key_encoding: &Plan, encoding: &Plan) -> Result<()> {
        let object = expect_object(value)?;
        encode_varint(&mut self.output, object.len() as u64)?;
        self.write_members(object, key_encoding, encoding)
    }

    /* any */

    pub fn any_packed_type_tag_byte_prefix(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => Ok(self.output.write_byte(NULL)?),
            Value::Bool(false) => Ok(self.output.write_byte(FALSE)?),
            Value::Bool(true) => Ok(self.output.write_byte(TRUE)?),
            Value::Number(number) => {
                if let Some(absolute) = number.as_u64() {
                    self.write_any_integer(absolute, TYPE_POSITIVE_INTEGER_BYTE, POSITIVE_INTEGER)
                }
                else if let Some(integer) = number.as_i64() {
                    // integer < 0, so this is -integer - 1
                    self.write_any_integer(!(integer as u64), TYPE_NEGATIVE_INTEGER_BYTE, NEGATIVE_INTEGER)
                }
                else {
                    let real = number.as_f64().ok_or(Error::ExpectedNumber)?;
                    self.write_any_real(real)
                }
            }
            Value::String(string) => self.write_any_string(string),
            Value::Array(items) => {
                self.write_any_size(items.len() as u64, TYPE_ARRAY)?;
                for item in items {
                    self.any_packed_type_tag_byte_prefix(item)?;
                }
                Ok(())
            }
            Value::Object(object) => {
                self.write_any_size(object.len() as u64, TYPE_OBJECT)?;
                for (key, member) in object {
                    self.prefix_varint_length_str_shared(key)?;
                    self.any_packed_type_tag_byte_prefix(member)?;
                }
                Ok(())
            }
        }
    }

    fn write_any_integer(&mut self, absolute: u64, byte_type: u8, varint_tag: u8) -> Result<()> {
        if is_byte(absolute) {
            if absolute < MAX_SUBTYPE {
                self.output.write_byte(tag(byte_type, absolute as u8 + 1))?;
            }
            else {
                self.output.write(&[byte_type, absolute as u8])?;
            }
            Ok(())
        }
        else {
            self.output.write_byte(varint_tag)?;
            Ok(encode_varint(&mut self.output, absolute)?)
        }
    }

    fn write_any_real(&mut self, real: f64) -> Result<()> {
        if (0.0..=255.0).contains(&real) && real == f64::from(real as u8) {
            return Ok(self.output.write(&[POSITIVE_REAL_INTEGER_BYTE, real as u8])?)
        }
        let (mantissa, point) = real_digits(real).ok_or(Error::OutOfRange)?;
        self.output.write_byte(NUMBER)?;
        self.write_double(mantissa, point)
    }

    fn write_any_size(&mut self, size: u64, typ: u8) -> Result<()> {
        if size < MAX_SUBTYPE {
            Ok(self.output.write_byte(tag(typ, size as u8 + 1))?)
        }
        else {
            self.output.write_byte(typ)?;
            Ok(encode_varint(&mut self.output, size - MAX_SUBTYPE)?)
        }
    }

    fn write_any_string(&mut self, string: &str) -> Result<()> {
        let size = string.len() as u64;
        let shared = self.cache.find(string, Kind::Standalone);
        match shared {
            Some(offset) if size < SHORT_STRING_LIMIT => {
                self.output.write_byte(tag(TYPE_SHARED_STRING, size as u8 + 1))?;
                self.write_distance(offset)
            }
            None if size < SHORT_STRING_LIMIT => {
                self.output.write_byte(tag(TYPE_STRING, size as u8 + 1))?;
                self.write_standalone(string)
            }
            None if size < LONG_STRING_LIMIT => {
                self.output.write_byte(tag(TYPE_LONG_STRING, (size - SHORT_STRING_LIMIT) as u8))?;
                Ok(self.output.write(string.as_bytes())?)
            }
            None if size >= EXPONENT_STRING_LIMIT => {
                let exponent = closest_smallest_exponent(size, 2, SUBTYPE_LONG_STRING_BASE_EXPONENT_7,
                                                                   SUBTYPE_LONG_STRING_BASE_EXPONENT_10);
                self.output.write_byte(tag(TYPE_OTHER, exponent))?;
                encode_varint(&mut self.output, size - (1 << exponent))?;
                Ok(self.output.write(string.as_bytes())?)
            }
            _ => {
                if shared.is_none() {
                    self.output.write_byte(tag(TYPE_STRING, 0))?;
                }
                // a shared string shorter than LONG_STRING_LIMIT wraps around
                let length = size.wrapping_sub(LONG_STRING_LIMIT).wrapping_add(1);
                self.prefixed_string_shared(string, LengthField::Varint(length))
            }
        }
    }
}
