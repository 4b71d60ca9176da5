//! Cross-implementation tests against the reference `bson` crate.
//!
//! bsonlite stores documents in a hash map, so a multi-field document can
//! encode its fields in any order. Byte-for-byte comparisons are therefore
//! only made for single-field documents or on the decode side; everything
//! else is compared by value.

use bsonlite::{BsonBoolean, Document, Element, Error};

use crate::interop::*;

/// {"testint": 12345, "testobj": {"string_test": "ABCDEFGabcdefg",
///  "arr": [100, 200, 300]}, "float": -123.456, "boolValue": true}
const NESTED_GOLDEN: &str = "\
860000001074657374696e74003930000003746573746f626a00500000000273\
7472696e675f74657374000f0000004142434445464761626364656667000461\
727200260000001230006400000000000000123100c800000000000000123200\
2c01000000000000000001666c6f61740077be9f1a2fdd5ec008626f6f6c5661\
6c7565000100";

fn reference_bytes(doc: &bson::Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.to_writer(&mut buf).unwrap();
    buf
}

#[test]
fn test_golden_matches_reference_encoder() {
    let golden = hex::decode(NESTED_GOLDEN).unwrap();
    assert_eq!(bson::to_vec(&sample_nested()).unwrap(), golden);
}

#[test]
fn test_decode_golden() {
    let golden = hex::decode(NESTED_GOLDEN).unwrap();
    let (doc, consumed) = Document::from_bytes_len(&golden).unwrap();
    assert_eq!(consumed, golden.len());
    assert_eq!(nested_from_document(&doc).unwrap(), sample_nested());
}

#[test]
fn test_reference_decodes_our_nested_output() {
    let doc = nested_document(&sample_nested()).unwrap();
    let bytes = doc.to_bytes();
    assert_eq!(bytes.len(), doc.size());

    let decoded: Nested = bson::from_slice(&bytes).unwrap();
    assert_eq!(decoded, sample_nested());
}

#[test]
fn test_scalars_both_directions() {
    let scalars = sample_scalars();

    let ours = scalars_document(&scalars).unwrap().to_bytes();
    let theirs: ScalarTypes = bson::from_slice(&ours).unwrap();
    assert_eq!(theirs, scalars);

    let reference = bson::to_vec(&scalars).unwrap();
    let (doc, consumed) = Document::from_bytes_len(&reference).unwrap();
    assert_eq!(consumed, reference.len());
    assert_eq!(doc, scalars_document(&scalars).unwrap());
}

#[test]
fn test_single_field_bytes_identical() {
    let cases: Vec<(bson::Document, Element)> = vec![
        (bson::doc! { "k": 12345i32 }, Element::from(12345i32)),
        (bson::doc! { "k": -9i64 }, Element::from(-9i64)),
        (bson::doc! { "k": 0.1f64 }, Element::from(0.1f64)),
        (bson::doc! { "k": false }, Element::from(false)),
        (bson::doc! { "k": "t\u{e9}xt" }, Element::from("t\u{e9}xt")),
        (bson::doc! { "k": "" }, Element::from("")),
        (bson::doc! { "k": { "x": 1i32 } }, {
            let mut inner = Document::new();
            inner.put_int32("x", 1).unwrap();
            Element::from(inner)
        }),
        (
            bson::doc! { "k": [1i64, 2i64, 3i64] },
            Element::from([1i64, 2, 3].into_iter().collect::<bsonlite::Array>()),
        ),
        (
            bson::doc! { "k": bson::Bson::Array(Vec::new()) },
            Element::from(bsonlite::Array::new()),
        ),
    ];

    for (reference, element) in cases {
        let mut doc = Document::new();
        doc.put("k", element).unwrap();
        assert_eq!(
            hex::encode(doc.to_bytes()),
            hex::encode(reference_bytes(&reference)),
            "mismatch for {reference}"
        );
    }
}

#[test]
fn test_reencode_is_value_equal_not_byte_equal() {
    let reference = bson::doc! {
        "a": 1i32, "b": 2i32, "c": 3i32, "d": 4i32,
        "e": "five", "f": 6.0, "g": true, "h": 8i64,
    };
    let original = reference_bytes(&reference);

    let (doc, _) = Document::from_bytes_len(&original).unwrap();
    let reencoded = doc.to_bytes();

    // Field order follows the hash map, so only length and values are
    // guaranteed to survive.
    assert_eq!(reencoded.len(), original.len());
    let (again, _) = Document::from_bytes_len(&reencoded).unwrap();
    assert_eq!(again, doc);
    assert_eq!(bson::Document::from_reader(&mut reencoded.as_slice()).unwrap().len(), 8);
}

#[test]
fn test_every_truncation_of_reference_output_fails() {
    let bytes = bson::to_vec(&sample_nested()).unwrap();
    for end in 0..bytes.len() {
        let err = Document::from_bytes_len(&bytes[..end]).unwrap_err();
        assert!(err.is_truncation(), "prefix {end}: {err}");
        assert!(bsonlite::from_bytes(&bytes[..end]).is_empty());
    }
}

#[test]
fn test_unsupported_reference_types() {
    let cases = vec![
        (bson::doc! { "n": bson::Bson::Null }, 0x0Au8),
        (bson::doc! { "id": bson::oid::ObjectId::new() }, 0x07),
        (bson::doc! { "ts": bson::DateTime::from_millis(0) }, 0x09),
    ];
    for (reference, tag) in cases {
        let bytes = reference_bytes(&reference);
        match Document::from_bytes_len(&bytes) {
            Err(Error::UnsupportedElementType(t)) => assert_eq!(t, tag),
            other => panic!("expected unsupported tag {tag:#x}, got {other:?}"),
        }
    }
}

#[test]
fn test_embedded_in_larger_buffer() {
    let doc = nested_document(&sample_nested()).unwrap();
    let mut buffer = doc.to_bytes();
    let first_len = buffer.len();
    buffer.extend_from_slice(&reference_bytes(&bson::doc! { "next": true }));

    let (first, consumed) = Document::from_bytes_len(&buffer).unwrap();
    assert_eq!(consumed, first_len);
    assert_eq!(first, doc);

    let (second, rest) = Document::from_bytes_len(&buffer[consumed..]).unwrap();
    assert_eq!(rest, buffer.len() - first_len);
    assert_eq!(second.get_bool("next"), BsonBoolean::True);
}
