#![cfg(any(feature = "std", feature = "alloc"))]
use binpack::*;
use binpack::loader::ENCODING_V1;
use serde_json::{json, Value};

fn plan(document: Value) -> Plan {
    load(&document).unwrap()
}

/// A plan of `{"id": integer, "name": string, "tags": [string], "created": date}`
/// members in any order.
fn record_plan() -> Plan {
    plan(json!({
        "$schema": ENCODING_V1,
        "binpackEncoding": "VARINT_TYPED_ARBITRARY_OBJECT",
        "binpackOptions": {
            "keyEncoding": {
                "binpackEncoding": "PREFIX_VARINT_LENGTH_STRING_SHARED",
                "binpackOptions": {}
            },
            "encoding": {
                "binpackEncoding": "ANY_PACKED_TYPE_TAG_BYTE_PREFIX",
                "binpackOptions": {}
            }
        }
    }))
}

fn round_trip(document: &Value, plan: &Plan) -> Vec<u8> {
    let bytes = to_vec(document, plan).unwrap();
    let (decoded, len) = from_slice(&bytes, plan).unwrap();
    assert_eq!(len, bytes.len());
    assert_eq!(&decoded, document);
    bytes
}

#[test]
fn typed_array_plan() {
    let plan = plan(json!({
        "binpackEncoding": "BOUNDED_8BITS_TYPED_ARRAY",
        "binpackOptions": {
            "minimum": 1,
            "maximum": 4,
            "prefixEncodings": [
                {
                    "binpackEncoding": "RFC3339_DATE_INTEGER_TRIPLET",
                    "binpackOptions": {}
                },
                {
                    "binpackEncoding": "TOP_LEVEL_BYTE_CHOICE_INDEX",
                    "binpackOptions": { "choices": ["draft", "published", "archived"] }
                }
            ],
            "encoding": {
                "binpackEncoding": "ROOF_MULTIPLE_MIRROR_ENUM_VARINT",
                "binpackOptions": { "maximum": 100, "multiplier": 10 }
            }
        }
    }));
    let bytes = round_trip(&json!(["2024-02-29", "published", 90, -20]), &plan);
    assert_eq!(bytes, [0x03, 0xe8, 0x07, 0x02, 0x1d, 0x00, 0x01, 0x0c]);
    // the first choice takes no space as the last value of the stream
    let bytes = round_trip(&json!(["2024-02-29", "draft"]), &plan);
    assert_eq!(bytes, [0x01, 0xe8, 0x07, 0x02, 0x1d]);
}

#[test]
fn numbers_plan() {
    let plan = plan(json!({
        "binpackEncoding": "FIXED_TYPED_ARRAY",
        "binpackOptions": {
            "size": 4,
            "prefixEncodings": [
                {
                    "binpackEncoding": "BOUNDED_MULTIPLE_8BITS_ENUM_FIXED",
                    "binpackOptions": { "minimum": -100, "maximum": 100, "multiplier": 5 }
                },
                {
                    "binpackEncoding": "FLOOR_MULTIPLE_ENUM_VARINT",
                    "binpackOptions": { "minimum": 1000, "multiplier": 1 }
                },
                {
                    "binpackEncoding": "ARBITRARY_MULTIPLE_ZIGZAG_VARINT",
                    "binpackOptions": { "multiplier": -3 }
                }
            ],
            "encoding": {
                "binpackEncoding": "DOUBLE_VARINT_TUPLE",
                "binpackOptions": {}
            }
        }
    }));
    let bytes = round_trip(&json!([-25, 1001, -9, 0.25]), &plan);
    assert_eq!(bytes, [0x0f, 0x01, 0x05, 0x32, 0x02]);
    assert_eq!(to_vec(&json!([-24, 1001, -9, 0.25]), &plan).unwrap_err(), ser::Error::NotMultiple);
    assert_eq!(to_vec(&json!([-25, 999, -9, 0.25]), &plan).unwrap_err(), ser::Error::OutOfRange);
    assert_eq!(to_vec(&json!([-25, 1001, -9]), &plan).unwrap_err(), ser::Error::SizeMismatch);
}

#[test]
fn object_plan() {
    let document = json!({
        "id": 1,
        "name": "binpack",
        "tags": ["json", "binary", "json"],
        "created": "2024-01-01"
    });
    round_trip(&document, &record_plan());
}

#[test]
fn fixed_object_plan() {
    let plan = plan(json!({
        "binpackEncoding": "FIXED_TYPED_ARBITRARY_OBJECT",
        "binpackOptions": {
            "size": 2,
            "keyEncoding": {
                "binpackEncoding": "BOUNDED_8BIT_PREFIX_UTF8_STRING_SHARED",
                "binpackOptions": { "minimum": 1, "maximum": 16 }
            },
            "encoding": {
                "binpackEncoding": "FLOOR_VARINT_PREFIX_UTF8_STRING_SHARED",
                "binpackOptions": { "minimum": 0 }
            }
        }
    }));
    // a key repeated as a value is shared
    let bytes = round_trip(&json!({"left": "right", "right": "left"}), &plan);
    assert_eq!(bytes.len(), 5 + 6 + 1 + 1 + 1 + 1 + 1 + 1);
    assert_eq!(to_vec(&json!({"": "x", "y": "z"}), &plan).unwrap_err(), ser::Error::OutOfRange);
}

#[test]
fn const_and_choices_plan() {
    let plan = plan(json!({
        "binpackEncoding": "FLOOR_TYPED_ARRAY",
        "binpackOptions": {
            "minimum": 0,
            "prefixEncodings": [{
                "binpackEncoding": "CONST_NONE",
                "binpackOptions": { "value": { "version": 1 } }
            }],
            "encoding": {
                "binpackEncoding": "LARGE_CHOICE_INDEX",
                "binpackOptions": { "choices": [null, false, true, 0, "", [], {}] }
            }
        }
    }));
    let bytes = round_trip(&json!([{ "version": 1 }, {}, [], null, true]), &plan);
    assert_eq!(bytes, [0x05, 0x06, 0x05, 0x00, 0x02]);
    assert_eq!(to_vec(&json!([{ "version": 2 }]), &plan).unwrap_err(), ser::Error::ConstMismatch);
    assert_eq!(to_vec(&json!([{ "version": 1 }, 1]), &plan).unwrap_err(), ser::Error::ChoiceNotFound);
}

#[test]
fn strings_shared_across_documents() {
    let plan = record_plan();
    let documents = [
        json!({"id": 1, "name": "binpack", "tags": ["json"]}),
        json!({"id": 2, "name": "binpack", "tags": ["json", "binary"]}),
        json!({"id": 3, "name": "msgpack", "tags": ["binary"]}),
    ];
    let mut encoder = Encoder::new(Vec::new());
    for document in &documents {
        encoder.encode(document, &plan).unwrap();
    }
    assert!(!encoder.shared_strings().is_empty());
    let bytes = encoder.into_inner();
    let separately: usize = documents.iter().map(|document| to_vec(document, &plan).unwrap().len()).sum();
    assert!(bytes.len() < separately);

    let mut decoder = Decoder::new(SliceReader::new(&bytes));
    for document in &documents {
        assert_eq!(&decoder.decode(&plan).unwrap(), document);
    }
    assert!(!decoder.has_more());
}

#[test]
fn cache_limits() {
    let plan = Plan::PrefixVarintLengthStringShared {};
    let limits = CacheLimits { minimum_length: 8, ..CacheLimits::default() };
    let mut encoder = Encoder::with_limits(Vec::new(), limits);
    for string in ["binpack", "binpack", "shared strings", "shared strings"] {
        encoder.encode(&json!(string), &plan).unwrap();
    }
    let bytes = encoder.into_inner();
    assert_eq!(bytes.len(), 8 + 8 + 15 + 2);

    let options = DecoderOptions { limits, ..DecoderOptions::default() };
    let mut decoder = Decoder::with_options(SliceReader::new(&bytes), options);
    for string in ["binpack", "binpack", "shared strings", "shared strings"] {
        assert_eq!(decoder.decode(&plan).unwrap(), json!(string));
    }
}

#[cfg(feature = "std")]
#[test]
fn io_streams() {
    use std::io::Cursor;
    use binpack_stream::{IoReader, IoWriter};

    let plan = record_plan();
    let document = json!({"id": 7, "name": "io", "tags": ["file", "file", "file"]});

    let mut writer = IoWriter::new(Cursor::new(Vec::new()));
    let mut encoder = Encoder::new(&mut writer);
    encoder.encode(&document, &plan).unwrap();
    encoder.encode(&document, &plan).unwrap();
    writer.flush().unwrap();
    let mut cursor = writer.into_inner();
    assert_eq!(cursor.get_ref().as_slice(), {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&document, &plan).unwrap();
        encoder.encode(&document, &plan).unwrap();
        encoder.into_inner()
    });

    cursor.set_position(0);
    let mut decoder = Decoder::new(IoReader::new(cursor).unwrap());
    assert_eq!(decoder.decode(&plan).unwrap(), document);
    assert_eq!(decoder.decode(&plan).unwrap(), document);
    assert!(!decoder.has_more());
    assert_eq!(decoder.decode(&plan).unwrap_err(), de::Error::UnexpectedEof);
}

#[test]
fn plan_documents_round_trip() {
    for plan in [record_plan(), Plan::DoubleVarintTuple {}, Plan::ConstNone { value: json!([null]) }] {
        let document = plan.to_value().unwrap();
        assert_eq!(document["$schema"], json!(ENCODING_V1));
        assert_eq!(load(&document).unwrap(), plan);
    }
}
