// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// The universal properties (P1-P8) and end-to-end scenarios (S1-S8) this
// codec is expected to satisfy, plus the boundary cases called out
// alongside them.

#![allow(clippy::unreadable_literal)]

use llsd::encoding::{base16, base64, base85};
use llsd::format::Format;
use llsd::{parse, serialize, Array, Map, Value};

fn roundtrip(value: &Value, format: Format) -> Value {
    let bytes = serialize(value, format, false).unwrap();
    parse(&bytes).unwrap()
}

// P1: serialize . parse is byte-exact only for binary.
#[test]
fn p1_binary_round_trip_is_byte_exact() {
    let value = Value::Array(Array::from_iter([Value::integer(1), Value::integer(2)]));
    let bytes = serialize(&value, Format::Binary, false).unwrap();
    let reparsed = parse(&bytes).unwrap();
    let reserialized = serialize(&reparsed, Format::Binary, false).unwrap();
    assert_eq!(bytes, reserialized);
}

// P2 / P3: parse . serialize is logical identity for binary and notation.
#[test]
fn p2_p3_binary_and_notation_are_logically_lossless() {
    let value = Value::Map(Map::from_iter([
        ("n".to_string(), Value::integer(7)),
        ("s".to_string(), Value::string("hello")),
    ]));
    assert_eq!(roundtrip(&value, Format::Binary), value);
    assert_eq!(roundtrip(&value, Format::Notation), value);
}

// P2: JSON's coalescing rules make a uuid-shaped string change type.
#[test]
fn p2_json_coalesces_uuid_shaped_strings() {
    let looks_like_uuid = Value::string("01020304-0506-0708-0900-010203040506");
    let roundtrip = roundtrip(&looks_like_uuid, Format::Json);
    assert_ne!(roundtrip, looks_like_uuid);
    assert_eq!(roundtrip.type_tag(), llsd::TypeTag::Uuid);
}

// P3: parse(serialize(v, F)) == v under §4.2 equality, for every format
// and a value exercising every variant (JSON excepted per its P2 caveat).
#[test]
fn p3_every_format_round_trips_every_variant_except_json_quirks() {
    let value = Value::Map(Map::from_iter([
        ("undef".to_string(), Value::Undef),
        ("bool".to_string(), Value::boolean(true)),
        ("int".to_string(), Value::integer(-17)),
        ("real".to_string(), Value::real(3.25)),
        (
            "uuid".to_string(),
            Value::uuid(uuid::Uuid::from_bytes([9u8; 16])),
        ),
        ("str".to_string(), Value::string("plain text")),
        ("date".to_string(), Value::date(1_700_000_000.25)),
        ("uri".to_string(), Value::uri("https://example.com")),
        ("bin".to_string(), Value::binary(vec![1, 2, 3, 4, 5])),
        (
            "arr".to_string(),
            Value::Array(Array::from_iter([Value::integer(1), Value::boolean(false)])),
        ),
    ]));

    for format in [Format::Binary, Format::Notation, Format::Xml] {
        assert_eq!(roundtrip(&value, format), value, "format {format:?} lost data");
    }
}

// P4: base16/64/85 decode(encode(x)) == x and decoded_len(encode(x)) == len(x).
#[test]
fn p4_byte_encodings_round_trip() {
    for sample in [
        Vec::new(),
        vec![0u8],
        vec![1, 2, 3, 4],
        vec![0xff; 7],
        (0..=255u8).collect::<Vec<u8>>(),
    ] {
        let b16 = base16::encode(&sample);
        assert_eq!(base16::decode(b16.as_bytes()).unwrap(), sample);
        assert_eq!(base16::decoded_len(b16.as_bytes()).unwrap(), sample.len());

        let b64 = base64::encode(&sample);
        assert_eq!(base64::decode(b64.as_bytes()).unwrap(), sample);
        assert_eq!(base64::decoded_len(b64.as_bytes()).unwrap(), sample.len());

        let b85 = base85::encode(&sample);
        assert_eq!(base85::decode(b85.as_bytes()).unwrap(), sample);
        assert_eq!(base85::decoded_len(b85.as_bytes()).unwrap(), sample.len());
    }
}

// P5: maps preserve insertion order.
#[test]
fn p5_map_insertion_order_is_preserved() {
    let mut m = Map::new();
    m.insert("a", Value::integer(1));
    m.insert("b", Value::integer(2));
    m.insert("c", Value::integer(3));
    let keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

// P6: duplicate-key insertion replaces the prior binding in place.
#[test]
fn p6_duplicate_insertion_replaces_in_place() {
    let mut m = Map::new();
    m.insert("a", Value::integer(1));
    m.insert("b", Value::integer(2));
    let before = m.len();
    let prior = m.insert("a", Value::integer(99));
    assert_eq!(prior, Some(Value::integer(1)));
    assert_eq!(m.len(), before);
    assert_eq!(m.get("a"), Some(&Value::integer(99)));
}

// P7: deep equality is symmetric, reflexive, and false on tag mismatch.
#[test]
fn p7_equality_is_reflexive_symmetric_and_tag_sensitive() {
    let a = Value::integer(5);
    let b = Value::integer(5);
    assert_eq!(a, a.clone());
    assert_eq!(a, b.clone());
    assert_eq!(b, a);
    assert_ne!(Value::integer(0), Value::real(0.0));
}

// P8: empty containers serialize to each format's empty form.
#[test]
fn p8_empty_containers_use_each_formats_empty_form() {
    let empty_array = Value::Array(Array::new());
    let empty_map = Value::Map(Map::new());

    let bin_array = serialize(&empty_array, Format::Binary, false).unwrap();
    assert!(bin_array.ends_with(&[b'[', 0, 0, 0, 0, b']']));
    let bin_map = serialize(&empty_map, Format::Binary, false).unwrap();
    assert!(bin_map.ends_with(&[b'{', 0, 0, 0, 0, b'}']));

    let xml_array = String::from_utf8(serialize(&empty_array, Format::Xml, false).unwrap()).unwrap();
    assert!(xml_array.contains("<array"));
    assert!(!xml_array.contains("<array>"));
    let xml_map = String::from_utf8(serialize(&empty_map, Format::Xml, false).unwrap()).unwrap();
    assert!(xml_map.contains("<map"));
    assert!(!xml_map.contains("<map>"));

    let json_array = String::from_utf8(serialize(&empty_array, Format::Json, false).unwrap()).unwrap();
    assert_eq!(json_array, "[]");
    let json_map = String::from_utf8(serialize(&empty_map, Format::Json, false).unwrap()).unwrap();
    assert_eq!(json_map, "{}");

    let notation_array = String::from_utf8(serialize(&empty_array, Format::Notation, false).unwrap()).unwrap();
    assert!(notation_array.ends_with("[]"));
    let notation_map = String::from_utf8(serialize(&empty_map, Format::Notation, false).unwrap()).unwrap();
    assert!(notation_map.ends_with("{}"));

    for fmt in [Format::Binary, Format::Xml, Format::Json, Format::Notation] {
        assert_eq!(roundtrip(&empty_array, fmt), empty_array);
        assert_eq!(roundtrip(&empty_map, fmt), empty_map);
    }
}

#[test]
fn s1_binary_integer() {
    let mut bytes = b"<? LLSD/Binary ?>\n".to_vec();
    bytes.extend_from_slice(&[b'i', 0x00, 0x00, 0x00, 0x01]);
    assert_eq!(parse(&bytes).unwrap(), Value::integer(1));
}

#[test]
fn s2_binary_real() {
    let mut bytes = b"<? LLSD/Binary ?>\n".to_vec();
    bytes.push(b'r');
    bytes.extend_from_slice(&1.0f64.to_be_bytes());
    assert_eq!(parse(&bytes).unwrap(), Value::real(1.0));
}

#[test]
fn s3_binary_string() {
    let mut bytes = b"<? LLSD/Binary ?>\n".to_vec();
    bytes.push(b's');
    bytes.extend_from_slice(&12u32.to_be_bytes());
    bytes.extend_from_slice(b"Hello World!");
    assert_eq!(parse(&bytes).unwrap(), Value::string("Hello World!"));
}

#[test]
fn s4_binary_array() {
    let mut bytes = b"<? LLSD/Binary ?>\n".to_vec();
    bytes.push(b'[');
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.push(b'i');
    bytes.extend_from_slice(&1u32.to_be_bytes());
    bytes.push(b'i');
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.push(b']');
    let expected = Value::Array(Array::from_iter([Value::integer(1), Value::integer(2)]));
    assert_eq!(parse(&bytes).unwrap(), expected);
}

#[test]
fn s5_notation_integer() {
    let bytes = b"<?llsd/notation?>\ni42";
    assert_eq!(parse(bytes).unwrap(), Value::integer(42));
}

#[test]
fn s6_json_uuid_coalescing() {
    let bytes = br#""01020304-0506-0708-0900-010203040506""#;
    let expected = Value::uuid(uuid::Uuid::parse_str("01020304-0506-0708-0900-010203040506").unwrap());
    assert_eq!(parse(bytes).unwrap(), expected);
}

#[test]
fn s7_json_map_with_array() {
    let bytes = br#"{"a": 1, "b": [true, null]}"#;
    let value = parse(bytes).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get("a"), Some(&Value::integer(1)));
    let arr = map.get("b").unwrap().as_array().unwrap();
    assert_eq!(arr.get(0), Some(&Value::boolean(true)));
    assert_eq!(arr.get(1), Some(&Value::Undef));
}

#[test]
fn s8_xml_map() {
    let bytes = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<llsd><map><key>n</key><integer>7</integer></map></llsd>";
    let value = parse(bytes).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get("n"), Some(&Value::integer(7)));
}

// Boundary tests.

#[test]
fn boundary_empty_string_and_binary_round_trip() {
    for fmt in [Format::Binary, Format::Notation, Format::Xml, Format::Json] {
        assert_eq!(roundtrip(&Value::string(""), fmt), Value::string(""));
        assert_eq!(roundtrip(&Value::binary(Vec::new()), fmt), Value::binary(Vec::new()));
    }
}

#[test]
fn boundary_zero_length_containers_round_trip() {
    for fmt in [Format::Binary, Format::Notation, Format::Xml, Format::Json] {
        assert_eq!(roundtrip(&Value::Array(Array::new()), fmt), Value::Array(Array::new()));
        assert_eq!(roundtrip(&Value::Map(Map::new()), fmt), Value::Map(Map::new()));
    }
}

#[test]
fn boundary_zero_integer_and_real_use_xml_empty_element_form() {
    let xml_int = String::from_utf8(serialize(&Value::integer(0), Format::Xml, false).unwrap()).unwrap();
    assert!(xml_int.contains("<integer/>") || xml_int.contains("<integer />"));
    let xml_real = String::from_utf8(serialize(&Value::real(0.0), Format::Xml, false).unwrap()).unwrap();
    assert!(xml_real.contains("<real/>") || xml_real.contains("<real />"));

    for fmt in [Format::Binary, Format::Notation, Format::Xml, Format::Json] {
        assert_eq!(roundtrip(&Value::integer(0), fmt), Value::integer(0));
        assert_eq!(roundtrip(&Value::real(0.0), fmt), Value::real(0.0));
    }
}

#[test]
fn boundary_surrogate_pair_strings_decode_in_json() {
    let doc = br#""😀""#;
    let value = parse(doc).unwrap();
    assert_eq!(value, Value::string("\u{1F600}"));
}

#[test]
fn boundary_base85_handles_every_length_mod_four() {
    for len in 0..=8usize {
        let sample: Vec<u8> = (0..len as u8).collect();
        let encoded = base85::encode(&sample);
        assert!(!encoded.contains('z'), "z shortcut only valid for a full all-zero group");
        assert_eq!(base85::decode(encoded.as_bytes()).unwrap(), sample);
    }
}

#[test]
fn boundary_base85_all_zero_group_uses_z_shortcut() {
    let encoded = base85::encode(&[0, 0, 0, 0]);
    assert_eq!(encoded, "z");
    assert_eq!(base85::decode(encoded.as_bytes()).unwrap(), vec![0, 0, 0, 0]);
}
