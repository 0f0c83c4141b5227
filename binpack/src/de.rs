//! JSON BinPack decoder
#[cfg(feature = "std")]
use std::{format, string::{String, FromUtf8Error}, vec, vec::Vec};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{format, string::{String, FromUtf8Error}, vec, vec::Vec};

use core::fmt;
use core::num::TryFromIntError;
use core::str::Utf8Error;

use serde_json::{Map, Number, Value};
use binpack_stream::{BinRead, SliceReader, StreamError};

use crate::cache::{CacheLimits, Kind, ResolvedStrings};
use crate::numeric::*;
use crate::plan::{select_item_encoding, Plan};
use crate::varint::{decode_varint, decode_zigzag_varint};
use crate::magick::*;

/// The default limit of pointers followed to resolve a single string.
pub const MAX_POINTER_CHAIN: usize = 1024;

/// The default limit of arrays and objects nested in one another.
pub const MAX_DEPTH: usize = 128;

/// Items pre-allocated for an array before any of them is decoded.
const MAX_PREALLOCATED_ITEMS: u64 = 1024;

/// Decode a value from a slice of bytes with `plan`.
///
/// Return a tuple with `(value, binpack_len)`. `binpack_len` <= `input.len()`.
pub fn from_slice(input: &[u8], plan: &Plan) -> Result<(Value, usize)> {
    let mut de = Decoder::new(SliceReader::new(input));
    let value = de.decode(plan)?;
    Ok((value, de.into_inner().position() as usize))
}

/// Decode a value from a slice of bytes with `plan`.
///
/// Return a tuple with `(value, tail)`, where `tail` is the tail of the input beginning
/// at the byte following the last byte of the encoded data.
pub fn from_slice_split_tail<'a>(input: &'a [u8], plan: &Plan) -> Result<(Value, &'a [u8])> {
    let mut de = Decoder::new(SliceReader::new(input));
    let value = de.decode(plan)?;
    Ok((value, de.into_inner().tail()))
}

/// Decoder error
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
    /// EOF while decoding
    UnexpectedEof,
    /// Varint longer than 10 bytes or overflowing 64 bits
    MalformedVarint,
    /// Back-reference distance points outside of the stream
    InvalidBackReference,
    /// Too many back-references to resolve a single string
    PointerChainTooLong,
    /// Arrays and objects nested too deeply
    DepthLimitExceeded,
    /// Array or object with more items than allowed
    TooManyItems,
    /// String is not valid UTF-8
    InvalidUtf8,
    /// Choice index out of range
    InvalidChoice,
    /// Unknown type tag
    InvalidTypeTag,
    /// Plan parameters can not decode any value
    InvalidPlan,
    /// Decoded number does not fit in the data model
    InvalidNumber,
    /// Decoded date is not a valid `YYYY-MM-DD` full-date
    InvalidDate,
    /// Object key is not a string
    InvalidKey,
    /// Input stream error
    Stream(StreamError),
}

pub type Result<T> = core::result::Result<T, Error>;

impl serde::de::StdError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::UnexpectedEof => "Unexpected end of BinPack input",
            Error::MalformedVarint => "Malformed varint in BinPack input",
            Error::InvalidBackReference => "Invalid string back-reference in BinPack input",
            Error::PointerChainTooLong => "String back-reference chain is too long",
            Error::DepthLimitExceeded => "Arrays and objects nested too deeply",
            Error::TooManyItems => "Too many items in an array or object",
            Error::InvalidUtf8 => "Invalid UTF-8 string in BinPack input",
            Error::InvalidChoice => "Choice index out of range",
            Error::InvalidTypeTag => "Invalid type tag in BinPack input",
            Error::InvalidPlan => "Invalid encoding parameters",
            Error::InvalidNumber => "Number out of range",
            Error::InvalidDate => "Invalid RFC 3339 full-date",
            Error::InvalidKey => "Object key is not a string",
            Error::Stream(err) => return write!(f, "{} while decoding", err)
        })
    }
}

impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::UnexpectedEof => Error::UnexpectedEof,
            err => Error::Stream(err)
        }
    }
}

impl From<TryFromIntError> for Error {
    fn from(_err: TryFromIntError) -> Self {
        Error::InvalidNumber
    }
}

impl From<Utf8Error> for Error {
    fn from(_err: Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}

impl From<FromUtf8Error> for Error {
    fn from(_err: FromUtf8Error) -> Self {
        Error::InvalidUtf8
    }
}

/// Decoder configuration
///
/// Items encoded with [`Plan::ConstNone`] take no input, so an array of
/// them may declare up to `u64::MAX` items from a few bytes of input.
/// Set `max_items` when decoding untrusted data with such plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Size limits of the resolved strings memo
    pub limits: CacheLimits,
    /// The number of pointers followed to resolve a single string
    pub max_pointer_chain: usize,
    /// The number of arrays and objects nested in one another
    pub max_depth: usize,
    /// The number of items of a single array or members of an object
    pub max_items: Option<u64>,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            limits: CacheLimits::default(),
            max_pointer_chain: MAX_POINTER_CHAIN,
            max_depth: MAX_DEPTH,
            max_items: None
        }
    }
}

/// The length prefix of a FLOOR/ROOF/BOUNDED prefixed string.
#[derive(Debug, Clone, Copy)]
enum LengthField {
    Floor(u64),
    Roof(u64),
    Bounded(u64)
}

impl LengthField {
    /// Convert a non-zero prefix into a length.
    fn length(self, prefix: u64) -> Result<u64> {
        let excess = prefix.checked_sub(1).ok_or(Error::InvalidNumber)?;
        match self {
            LengthField::Floor(minimum)|LengthField::Bounded(minimum) => minimum.checked_add(excess),
            LengthField::Roof(maximum) => maximum.checked_sub(excess)
        }.ok_or(Error::InvalidNumber)
    }
}

/// Reads JSON values from a [`BinRead`] input.
///
/// A stream with strings shared across several documents must be decoded
/// with the same decoder, in order.
#[derive(Debug)]
pub struct Decoder<R> {
    input: R,
    resolved: ResolvedStrings,
    max_pointer_chain: usize,
    depth: usize,
    max_depth: usize,
    max_items: Option<u64>
}

impl<R> Decoder<R> {
    /// Create a new decoder reading from `input`
    pub fn new(input: R) -> Self {
        Self::with_options(input, DecoderOptions::default())
    }
    /// Create a new decoder with custom options
    pub fn with_options(input: R, options: DecoderOptions) -> Self {
        Decoder {
            input,
            resolved: ResolvedStrings::with_limits(options.limits),
            max_pointer_chain: options.max_pointer_chain,
            depth: 0,
            max_depth: options.max_depth,
            max_items: options.max_items
        }
    }
    /// Destruct into the underlying input
    pub fn into_inner(self) -> R {
        self.input
    }
    /// Return a reference to the underlying input
    pub fn get_ref(&self) -> &R {
        &self.input
    }
}

fn validate_byte_choices(choices: &[Value]) -> Result<()> {
    if choices.is_empty() || choices.len() > 1 << 8 {
        return Err(Error::InvalidPlan)
    }
    Ok(())
}

fn choice(choices: &[Value], index: u64) -> Result<Value> {
    usize::try_from(index).ok()
    .and_then(|index| choices.get(index))
    .cloned()
    .ok_or(Error::InvalidChoice)
}

fn integer(value: i128) -> Result<Value> {
    Ok(Value::from(i64::try_from(value)?))
}

impl<R: BinRead> Decoder<R> {
    /// Return the current input position
    #[inline]
    pub fn position(&self) -> u64 {
        self.input.position()
    }
    /// Return `true` if there is more input to decode
    #[inline]
    pub fn has_more(&self) -> bool {
        self.input.has_more()
    }

    /// Decode a value with `plan`.
    pub fn decode(&mut self, plan: &Plan) -> Result<Value> {
        match plan {
            Plan::BoundedMultiple8BitsEnumFixed { minimum, maximum, multiplier } => {
                self.bounded_multiple_8bits_enum_fixed(*minimum, *maximum, *multiplier)
            }
            Plan::FloorMultipleEnumVarint { minimum, multiplier } => {
                self.floor_multiple_enum_varint(*minimum, *multiplier)
            }
            Plan::RoofMultipleMirrorEnumVarint { maximum, multiplier } => {
                self.roof_multiple_mirror_enum_varint(*maximum, *multiplier)
            }
            Plan::ArbitraryMultipleZigzagVarint { multiplier } => {
                self.arbitrary_multiple_zigzag_varint(*multiplier)
            }
            Plan::DoubleVarintTuple {} => self.double_varint_tuple(),
            Plan::ByteChoiceIndex { choices } => self.byte_choice_index(choices),
            Plan::LargeChoiceIndex { choices } => self.large_choice_index(choices),
            Plan::TopLevelByteChoiceIndex { choices } => self.top_level_byte_choice_index(choices),
            Plan::ConstNone { value } => Ok(self.const_none(value)),
            Plan::Utf8StringNoLength { size } => self.utf8_string_no_length(*size),
            Plan::FloorVarintPrefixUtf8StringShared { minimum } => {
                self.floor_varint_prefix_utf8_string_shared(*minimum)
            }
            Plan::RoofVarintPrefixUtf8StringShared { maximum } => {
                self.roof_varint_prefix_utf8_string_shared(*maximum)
            }
            Plan::Bounded8BitPrefixUtf8StringShared { minimum, maximum } => {
                self.bounded_8bit_prefix_utf8_string_shared(*minimum, *maximum)
            }
            Plan::Rfc3339DateIntegerTriplet {} => self.rfc3339_date_integer_triplet(),
            Plan::PrefixVarintLengthStringShared {} => self.prefix_varint_length_string_shared(),
            Plan::FixedTypedArray { size, encoding, prefix_encodings } => {
                self.fixed_typed_array(*size, encoding, prefix_encodings)
            }
            Plan::Bounded8BitsTypedArray { minimum, maximum, encoding, prefix_encodings } => {
                self.bounded_8bits_typed_array(*minimum, *maximum, encoding, prefix_encodings)
            }
            Plan::FloorTypedArray { minimum, encoding, prefix_encodings } => {
                self.floor_typed_array(*minimum, encoding, prefix_encodings)
            }
            Plan::RoofTypedArray { maximum, encoding, prefix_encodings } => {
                self.roof_typed_array(*maximum, encoding, prefix_encodings)
            }
            Plan::FixedTypedArbitraryObject { size, key_encoding, encoding } => {
                self.fixed_typed_arbitrary_object(*size, key_encoding, encoding)
            }
            Plan::VarintTypedArbitraryObject { key_encoding, encoding } => {
                self.varint_typed_arbitrary_object(key_encoding, encoding)
            }
            Plan::AnyPackedTypeTagBytePrefix {} => self.any_packed_type_tag_byte_prefix(),
        }
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        Ok(self.input.read_byte()?)
    }

    #[inline]
    fn read_varint(&mut self) -> Result<u64> {
        decode_varint(&mut self.input)
    }

    /// Run `f` one container level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded)
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn check_count(&self, count: u64) -> Result<()> {
        match self.max_items {
            Some(max_items) if count > max_items => Err(Error::TooManyItems),
            _ => Ok(())
        }
    }

    /* integers */

    pub fn bounded_multiple_8bits_enum_fixed(&mut self, minimum: i64, maximum: i64, multiplier: i64) -> Result<Value> {
        let m = absolute_multiplier(multiplier).ok_or(Error::InvalidPlan)?;
        let enum_minimum = i128::from(divide_ceil(minimum, m));
        let enum_maximum = i128::from(divide_floor(maximum, m));
        if enum_maximum < enum_minimum || enum_maximum - enum_minimum > i128::from(u8::MAX) {
            return Err(Error::InvalidPlan)
        }
        let index = i128::from(self.read_byte()?);
        if enum_minimum + index > enum_maximum {
            return Err(Error::InvalidNumber)
        }
        integer((enum_minimum + index) * i128::from(m))
    }

    pub fn floor_multiple_enum_varint(&mut self, minimum: i64, multiplier: i64) -> Result<Value> {
        let m = absolute_multiplier(multiplier).ok_or(Error::InvalidPlan)?;
        let index = i128::from(self.read_varint()?);
        integer((i128::from(divide_ceil(minimum, m)) + index) * i128::from(m))
    }

    pub fn roof_multiple_mirror_enum_varint(&mut self, maximum: i64, multiplier: i64) -> Result<Value> {
        let m = absolute_multiplier(multiplier).ok_or(Error::InvalidPlan)?;
        let index = i128::from(self.read_varint()?);
        integer((i128::from(divide_floor(maximum, m)) - index) * i128::from(m))
    }

    pub fn arbitrary_multiple_zigzag_varint(&mut self, multiplier: i64) -> Result<Value> {
        let m = absolute_multiplier(multiplier).ok_or(Error::InvalidPlan)?;
        let quotient = decode_zigzag_varint(&mut self.input)?;
        integer(i128::from(quotient) * i128::from(m))
    }

    /* reals */

    /// The result is always a real, even if it has no fractional part.
    pub fn double_varint_tuple(&mut self) -> Result<Value> {
        let mantissa = decode_zigzag_varint(&mut self.input)?;
        let point = self.read_varint()?;
        let real: f64 = format!("{}e-{}", mantissa, point).parse()
                        .map_err(|_| Error::InvalidNumber)?;
        Number::from_f64(real).map(Value::Number).ok_or(Error::InvalidNumber)
    }

    /* enumerations */

    pub fn byte_choice_index(&mut self, choices: &[Value]) -> Result<Value> {
        validate_byte_choices(choices)?;
        let index = self.read_byte()?;
        choice(choices, index.into())
    }

    pub fn large_choice_index(&mut self, choices: &[Value]) -> Result<Value> {
        if choices.is_empty() {
            return Err(Error::InvalidPlan)
        }
        let index = self.read_varint()?;
        choice(choices, index)
    }

    /// At the end of the input decode the first choice.
    pub fn top_level_byte_choice_index(&mut self, choices: &[Value]) -> Result<Value> {
        if choices.is_empty() || choices.len() > usize::from(u8::MAX) {
            return Err(Error::InvalidPlan)
        }
        if !self.input.has_more() {
            return Ok(choices[0].clone())
        }
        let index = self.read_byte()?;
        choice(choices, u64::from(index) + 1)
    }

    pub fn const_none(&mut self, value: &Value) -> Value {
        value.clone()
    }

    /* strings */

    fn read_string(&mut self, length: u64) -> Result<String> {
        if length > self.input.remaining_len() {
            return Err(Error::UnexpectedEof)
        }
        let mut buf = vec![0u8; usize::try_from(length)?];
        self.input.read_into(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn utf8_string_no_length(&mut self, size: u64) -> Result<Value> {
        self.read_string(size).map(Value::String)
    }

    pub fn floor_varint_prefix_utf8_string_shared(&mut self, minimum: u64) -> Result<Value> {
        self.prefixed_string_shared(LengthField::Floor(minimum)).map(Value::String)
    }

    pub fn roof_varint_prefix_utf8_string_shared(&mut self, maximum: u64) -> Result<Value> {
        self.prefixed_string_shared(LengthField::Roof(maximum)).map(Value::String)
    }

    pub fn bounded_8bit_prefix_utf8_string_shared(&mut self, minimum: u64, maximum: u64) -> Result<Value> {
        if maximum < minimum || maximum - minimum >= u64::from(u8::MAX) {
            return Err(Error::InvalidPlan)
        }
        self.prefixed_string_shared(LengthField::Bounded(minimum)).map(Value::String)
    }

    fn read_prefix(&mut self, field: LengthField) -> Result<u64> {
        match field {
            LengthField::Floor(..)|LengthField::Roof(..) => self.read_varint(),
            LengthField::Bounded(..) => self.read_byte().map(u64::from)
        }
    }

    /// Read either `length, UTF-8` or `0x00, length, distance`.
    fn prefixed_string_shared(&mut self, field: LengthField) -> Result<String> {
        match self.read_prefix(field)? {
            0 => {
                let prefix = self.read_prefix(field)?;
                let length = field.length(prefix)?;
                self.read_back_reference(length)
            }
            prefix => {
                let length = field.length(prefix)?;
                self.read_string(length)
            }
        }
    }

    /// Read a distance back to the start of earlier UTF-8 bytes and the
    /// `length` bytes found there.
    fn read_back_reference(&mut self, length: u64) -> Result<String> {
        let position = self.input.position();
        let distance = self.read_varint()?;
        if distance == 0 || distance > position {
            return Err(Error::InvalidBackReference)
        }
        let target = position - distance;
        tracing::trace!(position, target, "string back-reference");
        if let Some(string) = self.resolved.get(target, Kind::Standalone) {
            if string.len() as u64 == length {
                return Ok(String::from(string))
            }
        }
        let resume = self.input.position();
        self.input.seek(target)?;
        let string = self.read_string(length)?;
        self.input.seek(resume)?;
        self.resolved.insert(target, Kind::Standalone, &string);
        Ok(string)
    }

    pub fn rfc3339_date_integer_triplet(&mut self) -> Result<Value> {
        let mut year = [0u8;2];
        self.input.read_into(&mut year)?;
        let year = u16::from_le_bytes(year);
        let month = self.read_byte()?;
        let day = self.read_byte()?;
        if year > 9999 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(Error::InvalidDate)
        }
        Ok(Value::String(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    pub fn prefix_varint_length_string_shared(&mut self) -> Result<Value> {
        self.prefix_varint_length_str_shared().map(Value::String)
    }

    /// Follow the pointers until a `varint(length + 1)` framing is found.
    fn prefix_varint_length_str_shared(&mut self) -> Result<String> {
        let start = self.input.position();
        let prefix = self.read_varint()?;
        if prefix != 0 {
            return self.read_string(prefix - 1)
        }
        let mut position = self.input.position();
        let mut distance = self.read_varint()?;
        let resume = self.input.position();
        let mut hops = 0;
        let string = loop {
            if distance == 0 || distance > position {
                return Err(Error::InvalidBackReference)
            }
            let target = position - distance;
            tracing::trace!(position, target, hops, "string pointer");
            if let Some(string) = self.resolved.get(target, Kind::PrefixLengthVarintPlusOne) {
                break String::from(string)
            }
            self.input.seek(target)?;
            match self.read_varint()? {
                0 => {
                    hops += 1;
                    if hops > self.max_pointer_chain {
                        return Err(Error::PointerChainTooLong)
                    }
                    position = self.input.position();
                    distance = self.read_varint()?;
                }
                prefix => {
                    let string = self.read_string(prefix - 1)?;
                    self.resolved.insert(target, Kind::PrefixLengthVarintPlusOne, &string);
                    break string
                }
            }
        };
        self.input.seek(resume)?;
        self.resolved.insert(start, Kind::PrefixLengthVarintPlusOne, &string);
        Ok(string)
    }

    /* arrays */

    fn read_items(&mut self, count: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<Value> {
        self.check_count(count)?;
        let count = usize::try_from(count)?;
        self.nested(|de| {
            let mut items = Vec::with_capacity(count.min(MAX_PREALLOCATED_ITEMS as usize));
            for index in 0..count {
                items.push(de.decode(select_item_encoding(encoding, prefix_encodings, index))?);
            }
            Ok(Value::Array(items))
        })
    }

    pub fn fixed_typed_array(&mut self, size: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<Value> {
        self.read_items(size, encoding, prefix_encodings)
    }

    pub fn bounded_8bits_typed_array(&mut self, minimum: u64, maximum: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<Value> {
        if maximum < minimum || !is_byte(maximum - minimum) {
            return Err(Error::InvalidPlan)
        }
        let count = minimum.checked_add(u64::from(self.read_byte()?)).ok_or(Error::InvalidNumber)?;
        if count > maximum {
            return Err(Error::InvalidNumber)
        }
        self.read_items(count, encoding, prefix_encodings)
    }

    pub fn floor_typed_array(&mut self, minimum: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<Value> {
        let count = minimum.checked_add(self.read_varint()?).ok_or(Error::InvalidNumber)?;
        self.read_items(count, encoding, prefix_encodings)
    }

    pub fn roof_typed_array(&mut self, maximum: u64, encoding: &Plan, prefix_encodings: &[Plan]) -> Result<Value> {
        let count = maximum.checked_sub(self.read_varint()?).ok_or(Error::InvalidNumber)?;
        self.read_items(count, encoding, prefix_encodings)
    }

    /* objects */

    fn read_members(&mut self, count: u64, key_encoding: &Plan, encoding: &Plan) -> Result<Value> {
        self.check_count(count)?;
        self.nested(|de| {
            let mut object = Map::new();
            for _ in 0..count {
                let Value::String(key) = de.decode(key_encoding)? else {
                    return Err(Error::InvalidKey)
                };
                let member = de.decode(encoding)?;
                object.insert(key, member);
            }
            Ok(Value::Object(object))
        })
    }

    pub fn fixed_typed_arbitrary_object(&mut self, size: u64, key_encoding: &Plan, encoding: &Plan) -> Result<Value> {
        self.read_members(size, key_encoding, encoding)
    }

    pub fn varint_typed_arbitrary_object(&mut self, key_encoding: &Plan, encoding: &Plan) -> Result<Value> {
        let count = self.read_varint()?;
        self.read_members(count, key_encoding, encoding)
    }

    /* any */

    pub fn any_packed_type_tag_byte_prefix(&mut self) -> Result<Value> {
        let (typ, subtype) = split_tag(self.read_byte()?);
        let subtype = u64::from(subtype);
        match typ {
            TYPE_SHARED_STRING => {
                let length = match subtype {
                    // the length of a long string wraps around
                    0 => self.read_varint()?.wrapping_sub(1).wrapping_add(LONG_STRING_LIMIT),
                    n => n - 1
                };
                self.read_back_reference(length).map(Value::String)
            }
            TYPE_STRING => match subtype {
                0 => self.floor_varint_prefix_utf8_string_shared(LONG_STRING_LIMIT),
                n => self.read_string(n - 1).map(Value::String)
            }
            TYPE_LONG_STRING => {
                self.read_string(subtype + SHORT_STRING_LIMIT).map(Value::String)
            }
            TYPE_OBJECT => {
                let count = self.read_any_size(subtype)?;
                self.check_count(count)?;
                self.nested(|de| {
                    let mut object = Map::new();
                    for _ in 0..count {
                        let key = de.prefix_varint_length_str_shared()?;
                        let member = de.any_packed_type_tag_byte_prefix()?;
                        object.insert(key, member);
                    }
                    Ok(Value::Object(object))
                })
            }
            TYPE_ARRAY => {
                let count = self.read_any_size(subtype)?;
                let any = Plan::AnyPackedTypeTagBytePrefix {};
                self.read_items(count, &any, &[])
            }
            TYPE_POSITIVE_INTEGER_BYTE => {
                let absolute = self.read_any_byte(subtype)?;
                Ok(Value::from(absolute))
            }
            TYPE_NEGATIVE_INTEGER_BYTE => {
                let absolute = self.read_any_byte(subtype)?;
                Ok(Value::from(-(absolute as i64) - 1))
            }
            TYPE_OTHER => self.read_any_other(subtype as u8),
            _ => Err(Error::InvalidTypeTag)
        }
    }

    fn read_any_size(&mut self, subtype: u64) -> Result<u64> {
        match subtype {
            0 => self.read_varint()?.checked_add(MAX_SUBTYPE).ok_or(Error::InvalidNumber),
            n => Ok(n - 1)
        }
    }

    fn read_any_byte(&mut self, subtype: u64) -> Result<u64> {
        match subtype {
            0 => self.read_byte().map(u64::from),
            n => Ok(n - 1)
        }
    }

    fn read_any_other(&mut self, subtype: u8) -> Result<Value> {
        match subtype {
            SUBTYPE_FALSE => Ok(Value::Bool(false)),
            SUBTYPE_TRUE => Ok(Value::Bool(true)),
            SUBTYPE_NULL => Ok(Value::Null),
            SUBTYPE_POSITIVE_INTEGER => Ok(Value::from(self.read_varint()?)),
            SUBTYPE_NEGATIVE_INTEGER => {
                let absolute = i64::try_from(self.read_varint()?)?;
                Ok(Value::from(-absolute - 1))
            }
            SUBTYPE_NUMBER => self.double_varint_tuple(),
            SUBTYPE_POSITIVE_REAL_INTEGER_BYTE => {
                let real = f64::from(self.read_byte()?);
                Number::from_f64(real).map(Value::Number).ok_or(Error::InvalidNumber)
            }
            SUBTYPE_LONG_STRING_BASE_EXPONENT_7..=SUBTYPE_LONG_STRING_BASE_EXPONENT_10 => {
                let length = self.read_varint()?.checked_add(1 << subtype)
                             .ok_or(Error::InvalidNumber)?;
                self.read_string(length).map(Value::String)
            }
            _ => Err(Error::InvalidTypeTag)
        }
    }
}
