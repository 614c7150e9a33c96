// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The notation wire format: a textual sugar over the same value
//! model, hand-lexed since no existing crate speaks this grammar.

mod lexer;
mod parser;
mod serializer;

pub use parser::{parse, parse_into};
pub use serializer::serialize;

/// Leading bytes every notation-format document starts with.
pub const SIGNATURE: &[u8; 18] = b"<?llsd/notation?>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Array, Binary, BinaryEncoding, Map, Value};

    #[test]
    fn round_trips_scalars_and_containers() {
        let mut map = Map::new();
        map.insert("name", Value::string("Ford Prefect"));
        map.insert("count", Value::integer(42));
        map.insert("pi", Value::real(3.5));
        map.insert(
            "tags",
            Value::Array(Array::from_iter([Value::boolean(true), Value::Undef])),
        );
        let value = Value::Map(map);

        let bytes = serialize(&value, false).unwrap();
        assert!(bytes.starts_with(SIGNATURE));
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn trailing_comma_is_tolerated() {
        let doc = b"<?llsd/notation?>\n[i1,i2,]";
        let value = parse(doc).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn map_parses_without_a_leading_count() {
        let doc = b"<?llsd/notation?>\n{\"a\":i1,\"b\":i2}";
        let value = parse(doc).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::integer(1)));
        assert_eq!(map.get("b"), Some(&Value::integer(2)));
    }

    #[test]
    fn base85_binary_downgrades_to_base64_on_reemit() {
        let bin = Binary::new(vec![1, 2, 3, 4]).with_encoding(BinaryEncoding::Base85);
        let value = Value::Binary(bin);
        let bytes = serialize(&value, false).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("b64"));
        assert!(!text.contains("b85"));
    }

    #[test]
    fn empty_array_and_map_round_trip() {
        assert_eq!(
            parse(&serialize(&Value::Array(Array::new()), false).unwrap()).unwrap(),
            Value::Array(Array::new())
        );
        assert_eq!(
            parse(&serialize(&Value::Map(Map::new()), false).unwrap()).unwrap(),
            Value::Map(Map::new())
        );
    }

    #[test]
    fn boolean_words_parse_permissively() {
        let doc = b"<?llsd/notation?>\n[true,false,T,F]";
        let value = parse(doc).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.get(0), Some(&Value::boolean(true)));
        assert_eq!(arr.get(1), Some(&Value::boolean(false)));
        assert_eq!(arr.get(2), Some(&Value::boolean(true)));
        assert_eq!(arr.get(3), Some(&Value::boolean(false)));
    }
}
