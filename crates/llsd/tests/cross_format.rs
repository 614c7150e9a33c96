// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Cross-format round-trip and dispatch tests: every format driver parses
// what it serializes, and auto-detection picks the right one without a
// caller naming the format up front.

#![allow(clippy::unreadable_literal)]

use llsd::{format::Format, parse, serialize, Array, Map, Value};

fn sample_document() -> Value {
    let mut inner = Map::new();
    inner.insert("enabled", Value::boolean(true));
    inner.insert("ratio", Value::real(0.5));

    let mut map = Map::new();
    map.insert("name", Value::string("Ford Prefect"));
    map.insert("id", Value::uuid(uuid::Uuid::parse_str("01020304-0506-0708-0900-010203040506").unwrap()));
    map.insert("count", Value::integer(42));
    map.insert("nothing", Value::Undef);
    map.insert("payload", Value::binary(vec![0xde, 0xad, 0xbe, 0xef]));
    map.insert("homepage", Value::uri("https://example.com/ford"));
    map.insert(
        "tags",
        Value::Array(Array::from_iter([Value::string("pilot"), Value::integer(1)])),
    );
    map.insert("nested", Value::Map(inner));
    Value::Map(map)
}

#[test]
fn binary_round_trips_the_sample_document() {
    let bytes = serialize(&sample_document(), Format::Binary, false).unwrap();
    assert_eq!(parse(&bytes).unwrap(), sample_document());
}

#[test]
fn notation_round_trips_the_sample_document() {
    let bytes = serialize(&sample_document(), Format::Notation, false).unwrap();
    assert_eq!(parse(&bytes).unwrap(), sample_document());
}

#[test]
fn xml_round_trips_the_sample_document() {
    let bytes = serialize(&sample_document(), Format::Xml, true).unwrap();
    assert_eq!(parse(&bytes).unwrap(), sample_document());
}

// None of the sample document's strings happen to look like a uuid, a
// `||b64||`/`||uri||`-prefixed value, or an ISO-8601 date, so JSON's
// otherwise-lossy coalescing (spec.md §8 P2) never actually kicks in here.
#[test]
fn json_round_trips_the_sample_document() {
    let bytes = serialize(&sample_document(), Format::Json, false).unwrap();
    assert_eq!(parse(&bytes).unwrap(), sample_document());
}

#[test]
fn dispatch_detects_each_format_without_a_hint() {
    for format in [Format::Binary, Format::Notation, Format::Xml, Format::Json] {
        let bytes = serialize(&sample_document(), format, false).unwrap();
        let roundtrip = parse(&bytes).unwrap();
        assert_eq!(roundtrip.type_tag(), sample_document().type_tag());
    }
}

#[test]
fn parse_sax_drives_a_custom_sink_without_building_a_value() {
    use llsd::sax::builder::ValueBuilder;

    let bytes = serialize(&sample_document(), Format::Xml, false).unwrap();
    let mut builder = ValueBuilder::new();
    llsd::parse_sax(&bytes, &mut builder).unwrap();
    assert_eq!(builder.into_value().unwrap(), sample_document());
}

#[test]
fn parse_from_file_and_serialize_to_file_round_trip() {
    let mut buf = Vec::new();
    llsd::serialize_to_file(&sample_document(), &mut buf, Format::Binary, false).unwrap();
    let roundtrip = llsd::parse_from_file(std::io::Cursor::new(buf)).unwrap();
    assert_eq!(roundtrip, sample_document());
}
