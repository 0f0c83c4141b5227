#![cfg(any(feature = "std", feature = "alloc"))]
use binpack::*;
use serde_json::{json, Value};

fn any() -> Plan {
    Plan::AnyPackedTypeTagBytePrefix {}
}

fn round_trip(document: &Value) -> Vec<u8> {
    let bytes = to_vec(document, &any()).unwrap();
    let (decoded, len) = from_slice(&bytes, &any()).unwrap();
    assert_eq!(len, bytes.len());
    assert_eq!(&decoded, document);
    bytes
}

#[test]
fn any_scalars() {
    for document in [json!(null), json!(true), json!(false),
                     json!(0), json!(30), json!(31), json!(255), json!(256), json!(u64::MAX),
                     json!(-1), json!(-31), json!(-256), json!(-257), json!(i64::MIN),
                     json!(0.5), json!(-0.001), json!(3.14), json!(5.0), json!(255.0),
                     json!(256.0), json!(-42.0), json!(1.7976931348623157e15)] {
        round_trip(&document);
    }
}

#[test]
fn any_strings() {
    for len in [0, 1, 2, 3, 30, 31, 32, 61, 62, 63, 100, 127, 128, 129, 255, 256, 1023, 1024, 5000] {
        let string = "ü".repeat(len / 2) + &"x".repeat(len % 2);
        let bytes = round_trip(&json!(string));
        assert!(bytes.len() <= string.len() + 3);
    }
}

#[test]
fn any_document() {
    let document = json!({
        "name": "John Doe",
        "tags": ["admin", "user", "admin", "user"],
        "friends": [
            {"name": "Jane Doe", "tags": ["user"], "age": 41, "height": 1.65},
            {"name": "John Doe", "tags": [], "age": 43, "height": 1.8},
        ],
        "bio": "lorem ipsum dolor sit amet ".repeat(10),
        "quote": "lorem ipsum dolor sit amet ".repeat(10),
        "age": 43,
        "verified": true,
        "deleted": null
    });
    let bytes = round_trip(&document);
    assert!(bytes.len() < serde_json::to_vec(&document).unwrap().len());
}

#[cfg(feature = "preserve_order")]
#[test]
fn any_canonical_reencoding() {
    let inputs: [&[u8]; 6] = [
        &[0x2f, 0xf4, 0x04, 0x02],
        &[0x21, 0x66, 0x6f, 0x6f],
        &[0x1c, 0x17, 0x0f],
        &[0x13, 0x04, 0x66, 0x6f, 0x6f, 0x15],
        &[0x1c,
          0x13, 0x04, 0x66, 0x6f, 0x6f, 0x20, 0x04,
          0x13, 0x00, 0x08, 0x20, 0x09],
        &[0x27, 0x80, 0x02],
    ];
    for input in inputs {
        let (document, len) = from_slice(input, &any()).unwrap();
        assert_eq!(len, input.len());
        assert_eq!(to_vec(&document, &any()).unwrap(), input);
    }
}

#[test]
fn any_split_tail() {
    let mut bytes = to_vec(&json!([1, "foo"]), &any()).unwrap();
    bytes.extend_from_slice(b"tail");
    let (document, tail) = from_slice_split_tail(&bytes, &any()).unwrap();
    assert_eq!(document, json!([1, "foo"]));
    assert_eq!(tail, b"tail");
}

#[test]
fn any_truncated_input() {
    let bytes = to_vec(&json!({"foo": ["bar", 1000, 3.14]}), &any()).unwrap();
    for len in 0..bytes.len() {
        assert_eq!(from_slice(&bytes[..len], &any()).unwrap_err(), de::Error::UnexpectedEof);
    }
}
