// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The binary wire format: fixed-width tagged tokens behind an
//! 18-byte signature. The only format for which `serialize ∘ parse`
//! is byte-exact.

mod parser;
mod serializer;

pub use parser::{parse, parse_into};
pub use serializer::serialize;

/// Leading bytes every binary-format document starts with.
pub const SIGNATURE: &[u8; 18] = b"<? LLSD/Binary ?>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Array, Map, Value};

    #[test]
    fn round_trips_a_nested_value() {
        let mut map = Map::new();
        map.insert("n", Value::integer(7));
        map.insert(
            "a",
            Value::Array(Array::from_iter([Value::boolean(true), Value::string("hi")])),
        );
        let value = Value::Map(map);

        let bytes = serialize(&value, false).unwrap();
        assert!(bytes.starts_with(SIGNATURE));
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed, value);
    }
}
