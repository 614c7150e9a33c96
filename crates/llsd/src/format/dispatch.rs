// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Format auto-detection. A document's first bytes are sniffed in a
//! fixed order — binary, then notation, then XML, with JSON as the
//! fallback when none of the three signatures match — since JSON is
//! the only one of the four with no leading signature of its own.

use super::{binary, json, notation, xml, Format};
use crate::error::Result;
use crate::sax::EventSink;
use crate::value::Value;

/// How many leading bytes to peek past whitespace when looking for the
/// XML declaration. Long enough to cover `<?xml version="1.0" encoding="UTF-8"?>`.
const XML_SNIFF_WINDOW: usize = 38;

fn looks_like_xml(bytes: &[u8]) -> bool {
    let trimmed = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| &bytes[start..])
        .unwrap_or(&[]);
    let window = &trimmed[..trimmed.len().min(XML_SNIFF_WINDOW)];
    window.starts_with(b"<?xml")
}

fn detect(bytes: &[u8]) -> Format {
    if bytes.starts_with(binary::SIGNATURE.as_slice()) {
        Format::Binary
    } else if bytes.starts_with(notation::SIGNATURE.as_slice()) {
        Format::Notation
    } else if looks_like_xml(bytes) {
        Format::Xml
    } else {
        Format::Json
    }
}

/// Parses `bytes` into a [`Value`] tree, auto-detecting the wire format.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    match detect(bytes) {
        Format::Binary => binary::parse(bytes),
        Format::Notation => notation::parse(bytes),
        Format::Xml => xml::parse(bytes),
        Format::Json => json::parse(bytes),
    }
}

/// Parses `bytes`, auto-detecting the wire format, and drives `sink`
/// directly without materializing a [`Value`] tree.
pub fn parse_sax(bytes: &[u8], sink: &mut impl EventSink) -> Result<()> {
    match detect(bytes) {
        Format::Binary => binary::parse_into(bytes, sink).map(drop),
        Format::Notation => notation::parse_into(bytes, sink).map(drop),
        Format::Xml => xml::parse_into(bytes, sink).map(drop),
        Format::Json => json::parse_into(bytes, sink).map(drop),
    }
}

/// Serializes `value` to `format`'s wire representation.
pub fn serialize(value: &Value, format: Format, pretty: bool) -> Result<Vec<u8>> {
    match format {
        Format::Binary => binary::serialize(value, pretty),
        Format::Notation => notation::serialize(value, pretty),
        Format::Xml => xml::serialize(value, pretty),
        Format::Json => json::serialize(value, pretty),
    }
}
