// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base16 (hexadecimal) codec via the `hex` crate.

use crate::error::Error;

pub fn encode(input: &[u8]) -> String {
    hex::encode_upper(input)
}

pub fn encoded_len(input_len: usize) -> usize {
    input_len * 2
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>, Error> {
    hex::decode(input).map_err(|_| Error::InvalidEncoding { codec: "base16" })
}

pub fn decoded_len(input: &[u8]) -> Result<usize, Error> {
    if input.len() % 2 != 0 {
        return Err(Error::InvalidEncoding { codec: "base16" });
    }
    Ok(input.len() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let data = b"\x00\x01\xfe\xff hello";
        let encoded = encode(data);
        assert_eq!(decoded_len(encoded.as_bytes()).unwrap(), data.len());
        assert_eq!(decode(encoded.as_bytes()).unwrap(), data);
    }

    #[test]
    fn accepts_lowercase_input() {
        assert_eq!(decode(b"deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn odd_length_is_invalid() {
        assert!(decode(b"abc").is_err());
        assert!(decoded_len(b"abc").is_err());
    }

    #[test]
    fn empty_round_trips() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode(b"").unwrap(), Vec::<u8>::new());
    }
}
