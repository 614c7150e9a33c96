// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The format-independent serialization walk: drives an [`EventSink`]
//! directly off a [`Value`] tree. No [`super::state::StateMachine`]
//! is needed here — a `Value` is well-formed by construction, unlike
//! bytes coming off the wire, so there is nothing left to validate.

use super::EventSink;
use crate::error::Result;
use crate::value::Value;
use std::borrow::Cow;

/// Recursively emits every event describing `value` to `sink`.
pub fn serialize<S: EventSink>(value: &Value, sink: &mut S) -> Result<()> {
    match value {
        Value::Undef => sink.undef(),
        Value::Boolean(b) => sink.boolean(*b),
        Value::Integer(i) => sink.integer(*i),
        Value::Real(r) => sink.real(*r),
        Value::Uuid(u) => sink.uuid(*u),
        Value::String(s) => sink.string(Cow::Borrowed(s)),
        Value::Date(d) => sink.date(*d),
        Value::Uri(s) => sink.uri(Cow::Borrowed(s)),
        Value::Binary(b) => sink.binary(Cow::Borrowed(b.as_bytes()), b.preferred_encoding()),
        Value::Array(arr) => {
            sink.array_begin(Some(arr.len()))?;
            for item in arr.iter() {
                sink.array_value_begin()?;
                serialize(item, sink)?;
                sink.array_value_end()?;
            }
            sink.array_end(arr.len())
        }
        Value::Map(map) => {
            sink.map_begin(Some(map.len()))?;
            for (key, item) in map.iter() {
                sink.map_key_begin()?;
                sink.string(Cow::Borrowed(key))?;
                sink.map_key_end()?;
                sink.map_value_begin()?;
                serialize(item, sink)?;
                sink.map_value_end()?;
            }
            sink.map_end(map.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sax::builder::ValueBuilder;
    use crate::value::{Array, Map};

    #[test]
    fn round_trips_through_value_builder() {
        let mut map = Map::new();
        map.insert("ok", Value::Boolean(true));
        map.insert(
            "items",
            Value::Array(Array::from_iter([Value::Integer(1), Value::Integer(2)])),
        );
        let original = Value::Map(map);

        let mut builder = ValueBuilder::new();
        serialize(&original, &mut builder).unwrap();
        assert_eq!(builder.into_value(), Some(original));
    }
}
