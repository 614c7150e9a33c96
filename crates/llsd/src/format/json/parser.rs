// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON parser. Parses into a `serde_json::Value` tree (whose
//! `Number` already distinguishes an integer literal from a float
//! literal via `is_i64`/`is_u64`/`is_f64`, so integer-vs-real never
//! needs reconstructing from the source text) and walks that tree into
//! `StateMachine` calls, applying the string-prefix/shape coalescing
//! rules of spec.md §4.6.4 in order.

use super::{BASE64_PREFIX, URI_PREFIX};
use crate::encoding::base64;
use crate::error::{Error, Result};
use crate::sax::builder::ValueBuilder;
use crate::sax::state::StateMachine;
use crate::sax::{EventSink, TypeTag};
use crate::value::{iso8601_to_epoch_seconds, Value};
use std::borrow::Cow;
use uuid::Uuid;

/// Parses a complete JSON-format document. JSON has no leading
/// signature (spec.md §4.6.4), so this is always the dispatch
/// fallback.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    let builder = parse_into(bytes, ValueBuilder::new())?;
    builder.into_value().ok_or(Error::UnexpectedEof {
        expected: "a top-level value",
    })
}

/// Parses a complete JSON-format document directly into `sink`,
/// without necessarily building a [`Value`] tree — the entry point
/// behind [`crate::parse_sax`].
pub fn parse_into<S: EventSink>(bytes: &[u8], sink: S) -> Result<S> {
    let json: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        crate::warn!(
            "json parse failed at line {} column {}: {}",
            e.line(),
            e.column(),
            e
        );
        Error::UnexpectedToken {
            expected: "well-formed JSON",
            state: "json-document",
        }
    })?;

    let mut sm = StateMachine::new(sink);
    walk(&json, &mut sm)?;
    sm.finish()
}

fn scalar<S: EventSink>(
    sm: &mut StateMachine<S>,
    ty: TypeTag,
    emit: impl FnOnce(&mut S) -> Result<()>,
) -> Result<()> {
    sm.begin_value(ty)?;
    emit(sm.sink_mut())?;
    sm.end_value()
}

fn walk<S: EventSink>(json: &serde_json::Value, sm: &mut StateMachine<S>) -> Result<()> {
    match json {
        serde_json::Value::Null => scalar(sm, TypeTag::Undef, |sink| sink.undef()),
        serde_json::Value::Bool(b) => {
            let v = *b;
            scalar(sm, TypeTag::Boolean, |sink| sink.boolean(v))
        }
        serde_json::Value::Number(n) => number(n, sm),
        serde_json::Value::String(s) => scalar_from_string(s, sm),
        serde_json::Value::Array(items) => {
            sm.begin_array(None)?;
            for item in items {
                walk(item, sm)?;
            }
            sm.end_array()
        }
        serde_json::Value::Object(entries) => {
            sm.begin_map(None)?;
            for (k, v) in entries {
                let key = k.clone();
                scalar(sm, TypeTag::String, |sink| sink.string(Cow::Owned(key)))?;
                walk(v, sm)?;
            }
            sm.end_map()
        }
    }
}

/// integer → a JSON number literal without a fraction/exponent; real →
/// one with. `serde_json::Number` already tracks which the source text
/// was, so this never has to reparse the literal itself.
fn number<S: EventSink>(n: &serde_json::Number, sm: &mut StateMachine<S>) -> Result<()> {
    if n.is_i64() || n.is_u64() {
        let v = n
            .as_i64()
            .unwrap_or_else(|| n.as_u64().unwrap_or(0) as i64) as i32;
        scalar(sm, TypeTag::Integer, |sink| sink.integer(v))
    } else {
        let v = n.as_f64().ok_or(Error::UnexpectedToken {
            expected: "a finite JSON number",
            state: "json-number",
        })?;
        scalar(sm, TypeTag::Real, |sink| sink.real(v))
    }
}

/// Applies spec.md §4.6.4's coalescing order: 36-char UUID, `||b64||`
/// binary, `||uri||` uri, ISO-8601 date, else a plain string. This is
/// the documented lossy corner of the JSON form (spec.md §8 P2): a
/// user string that happens to match one of these shapes changes type
/// on round-trip.
fn scalar_from_string<S: EventSink>(s: &str, sm: &mut StateMachine<S>) -> Result<()> {
    if s.len() == 36 {
        if let Ok(u) = Uuid::parse_str(s) {
            return scalar(sm, TypeTag::Uuid, |sink| sink.uuid(u));
        }
    }
    if let Some(encoded) = s.strip_prefix(BASE64_PREFIX) {
        let bytes = base64::decode(encoded.as_bytes())?;
        return scalar(sm, TypeTag::Binary, |sink| sink.binary(Cow::Owned(bytes), None));
    }
    if let Some(uri) = s.strip_prefix(URI_PREFIX) {
        let owned = uri.to_string();
        return scalar(sm, TypeTag::Uri, |sink| sink.uri(Cow::Owned(owned)));
    }
    if let Some(d) = iso8601_to_epoch_seconds(s) {
        return scalar(sm, TypeTag::Date, |sink| sink.date(d));
    }
    let owned = s.to_string();
    scalar(sm, TypeTag::String, |sink| sink.string(Cow::Owned(owned)))
}
