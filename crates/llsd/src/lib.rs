// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # llsd - Linden Lab Structured Data
//!
//! A value model and set of wire-format codecs for LLSD, the schema-less,
//! self-describing data model used by Second Life and OpenSimulator.
//!
//! ## Quick Start
//!
//! ```rust
//! use llsd::{Value, format::Format};
//!
//! let mut map = llsd::Map::new();
//! map.insert("name".to_string(), Value::string("Ada"));
//! map.insert("age".to_string(), Value::integer(36));
//! let value = Value::Map(map);
//!
//! let bytes = llsd::serialize(&value, Format::Notation, false).unwrap();
//! let roundtrip = llsd::parse(&bytes).unwrap();
//! assert_eq!(value, roundtrip);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                          format drivers                             |
//! |   binary | notation | xml | json  --(SAX events)-->  StateMachine  |
//! +---------------------------------------------------------------------+
//! |                      sax::EventSink (19 callbacks)                  |
//! +---------------------------------------------------------------------+
//! |                          value::Value model                         |
//! |   Undef/Boolean/Integer/Real/Uuid/String/Date/Uri/Binary/Array/Map  |
//! +---------------------------------------------------------------------+
//! ```
//!
//! Every format driver, in either direction, speaks the same [`sax::EventSink`]
//! protocol: parsers drive it, [`sax::builder::ValueBuilder`] and the format
//! serializers consume it. This keeps all four wire formats mutually
//! consistent and lets [`sax::driver::serialize`] walk a [`Value`] tree once
//! for every output format.
//!
//! ## Modules Overview
//!
//! - [`value`] - the `Value` tagged-union model, coercions, and equality
//! - [`sax`] - the shared event interface and push-parser state machine
//! - [`format`] - binary/notation/xml/json parsers and serializers
//! - [`encoding`] - Base16/Base64/Base85 byte codecs
//! - [`error`] - the crate's `Error` type
//! - [`logging`] - compile-time configurable logging (zero-cost when disabled)

// Clippy: No blanket suppressions. Fix issues properly or use inline #[allow] with justification.

/// Base16/Base64/Base85 byte encodings used by the binary blob representation.
pub mod encoding;
/// Crate-wide error type and `Result` alias.
pub mod error;
/// Wire-format parsers and serializers (binary, notation, XML, JSON).
pub mod format;
/// Compile-time configurable logging system (zero-cost when the `logging` feature is off).
pub mod logging;
/// The shared SAX-style event interface and push-parser state machine.
pub mod sax;
/// The `Value` tagged-union data model, coercions, and container types.
pub mod value;

pub use error::{Error, Result};
pub use format::Format;
pub use sax::EventSink;
pub use value::{Array, Binary, BinaryEncoding, Map, TypeTag, Value};

use std::io::{Read, Write};

/// Parses `bytes` as LLSD, auto-detecting the wire format from its leading signature.
///
/// See [`format::dispatch::parse`] for the detection rules.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    format::dispatch::parse(bytes)
}

/// Serializes `value` to `format`'s wire representation.
///
/// `pretty` requests human-readable indentation where the format supports it
/// (notation, XML, JSON); binary ignores it.
pub fn serialize(value: &Value, format: Format, pretty: bool) -> Result<Vec<u8>> {
    format::dispatch::serialize(value, format, pretty)
}

/// Reads all of `r` and parses it as LLSD, auto-detecting the wire format.
pub fn parse_from_file(mut r: impl Read) -> Result<Value> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes).map_err(Error::Io)?;
    parse(&bytes)
}

/// Serializes `value` to `format` and writes the result to `w`.
pub fn serialize_to_file(value: &Value, mut w: impl Write, format: Format, pretty: bool) -> Result<()> {
    let bytes = serialize(value, format, pretty)?;
    w.write_all(&bytes).map_err(Error::Io)
}

/// Parses `bytes`, auto-detecting the wire format, and drives `sink` directly
/// without materializing a [`Value`] tree.
///
/// Useful for streaming consumers that only care about a subset of the
/// document, or that build their own application-specific structures instead
/// of the generic [`Value`] model.
pub fn parse_sax(bytes: &[u8], sink: &mut impl EventSink) -> Result<()> {
    format::dispatch::parse_sax(bytes, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_nested_value_through_notation() {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::string("Ada"));
        map.insert("tags".to_string(), Value::Array(Array::from_iter([
            Value::string("pilot"),
            Value::integer(1),
        ])));
        let value = Value::Map(map);

        let bytes = serialize(&value, Format::Notation, false).expect("serialize");
        let roundtrip = parse(&bytes).expect("parse");
        assert_eq!(value, roundtrip);
    }

    #[test]
    fn parse_from_file_reads_a_reader() {
        let bytes = serialize(&Value::integer(42), Format::Notation, false).expect("serialize");
        let value = parse_from_file(std::io::Cursor::new(bytes)).expect("parse");
        assert_eq!(value, Value::integer(42));
    }
}
