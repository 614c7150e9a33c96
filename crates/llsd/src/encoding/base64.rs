// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base64 codec via the `base64` crate, RFC 4648 standard alphabet
//! with `=` padding — the same engine the teacher pulls in (gated
//! behind its `security` feature there; unconditional here since
//! base64 is a core wire format, not an optional transport concern).

use crate::error::Error;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn encode(input: &[u8]) -> String {
    STANDARD.encode(input)
}

pub fn encoded_len(input_len: usize) -> usize {
    input_len.div_ceil(3) * 4
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>, Error> {
    STANDARD
        .decode(input)
        .map_err(|_| Error::InvalidEncoding { codec: "base64" })
}

pub fn decoded_len(input: &[u8]) -> Result<usize, Error> {
    decode(input).map(|bytes| bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let data = b"any carnal pleasure.";
        let encoded = encode(data);
        assert_eq!(decode(encoded.as_bytes()).unwrap(), data);
    }

    #[test]
    fn matches_known_vector() {
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
    }

    #[test]
    fn rejects_invalid_padding() {
        assert!(decode(b"Zg=").is_err());
    }

    #[test]
    fn empty_round_trips() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode(b"").unwrap(), Vec::<u8>::new());
    }
}
