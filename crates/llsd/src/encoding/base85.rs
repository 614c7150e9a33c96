// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base85 (Adobe/btoa variant) codec, hand-rolled: no crate in the
//! dependency corpus implements the `z`/`y` all-zero/all-space-quad
//! shortcuts this wire format relies on. Big-endian base-85 quintet
//! math, operating on groups of 1..=4 input bytes expanding to 5
//! (or 1, for a shortcut) output characters.

use crate::error::Error;

const POWERS: [u32; 5] = [1, 85, 7225, 614_125, 52_200_625];
const FIRST_CHAR: u8 = b'!'; // 0x21
const LAST_CHAR: u8 = b'u'; // 0x75

fn in_range(ch: u8) -> bool {
    (FIRST_CHAR..=LAST_CHAR).contains(&ch)
}

/// Encode a group of 1..=4 input bytes into its base85 characters,
/// appending them to `out`. Zero-pads the group to 4 bytes for the
/// arithmetic, then shortcuts an all-zero or all-space *full* group
/// (`group.len() == 4`) to a single `z`/`y` character.
fn encode_group(group: &[u8], out: &mut String) {
    debug_assert!((1..=4).contains(&group.len()));

    let mut padded = [0u8; 4];
    padded[..group.len()].copy_from_slice(group);
    let value = u32::from_be_bytes(padded);

    if group.len() == 4 {
        if value == 0x0000_0000 {
            out.push('z');
            return;
        }
        if value == 0x2020_2020 {
            out.push('y');
            return;
        }
    }

    // Digits are produced most-significant first: position 0 carries
    // weight 85^4, position 4 carries weight 85^0.
    let mut digits = [0u8; 5];
    let mut remaining = value;
    for pos in (0..5).rev() {
        digits[pos] = (remaining % 85) as u8;
        remaining /= 85;
    }
    let n = if group.len() == 4 { 5 } else { group.len() + 1 };
    for &d in &digits[..n] {
        out.push((d + 33) as char);
    }
}

/// Decode exactly 5 base85 characters (padded with `'u'` if the
/// original group was short) back into `4 - padding` output bytes.
fn decode_group(chars: &[u8; 5], padding: usize) -> Result<[u8; 4], Error> {
    let mut value: u64 = 0;
    for (i, &ch) in chars.iter().enumerate() {
        if !in_range(ch) {
            return Err(Error::InvalidEncoding { codec: "base85" });
        }
        value += u64::from(POWERS[4 - i]) * u64::from(ch - 33);
    }
    if value > u64::from(u32::MAX) {
        return Err(Error::InvalidEncoding { codec: "base85" });
    }
    let _ = padding;
    Ok((value as u32).to_be_bytes())
}

pub fn encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(input.len()));
    for chunk in input.chunks(4) {
        encode_group(chunk, &mut out);
    }
    out
}

/// Worst case: every 4-byte group expands to 5 characters, no
/// shortcut applies. Actual encoded length may be shorter.
pub fn encoded_len(input_len: usize) -> usize {
    if input_len == 0 {
        return 0;
    }
    let full_groups = input_len / 4;
    let remainder = input_len % 4;
    full_groups * 5 + if remainder > 0 { remainder + 1 } else { 0 }
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(decoded_len(input)?);
    let mut pending: Vec<u8> = Vec::with_capacity(5);

    for &ch in input {
        match ch {
            b'z' => {
                if !pending.is_empty() {
                    return Err(Error::InvalidEncoding { codec: "base85" });
                }
                out.extend_from_slice(&[0, 0, 0, 0]);
            }
            b'y' => {
                if !pending.is_empty() {
                    return Err(Error::InvalidEncoding { codec: "base85" });
                }
                out.extend_from_slice(&[0x20, 0x20, 0x20, 0x20]);
            }
            _ => {
                if in_range(ch) {
                    pending.push(ch);
                }
                if pending.len() == 5 {
                    let chars: [u8; 5] = pending.as_slice().try_into().unwrap();
                    let bytes = decode_group(&chars, 0)?;
                    out.extend_from_slice(&bytes);
                    pending.clear();
                }
            }
        }
    }

    if !pending.is_empty() {
        let padding = 5 - pending.len();
        pending.resize(5, b'u');
        let chars: [u8; 5] = pending.as_slice().try_into().unwrap();
        let bytes = decode_group(&chars, padding)?;
        out.extend_from_slice(&bytes[..4 - padding]);
    }

    Ok(out)
}

pub fn decoded_len(input: &[u8]) -> Result<usize, Error> {
    let mut out_len = 0usize;
    let mut pending = 0usize;

    for &ch in input {
        match ch {
            b'z' | b'y' => {
                if pending > 0 {
                    return Err(Error::InvalidEncoding { codec: "base85" });
                }
                out_len += 4;
            }
            _ if in_range(ch) => {
                pending += 1;
                if pending == 5 {
                    out_len += 4;
                    pending = 0;
                }
            }
            _ => return Err(Error::InvalidEncoding { codec: "base85" }),
        }
    }

    if pending > 0 {
        out_len += 4 - (5 - pending);
    }

    Ok(out_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let data = b"Man is distinguished, not only by his reason,";
        let encoded = encode(data);
        assert_eq!(decode(encoded.as_bytes()).unwrap(), data);
    }

    #[test]
    fn all_zero_group_uses_z_shortcut() {
        let encoded = encode(&[0, 0, 0, 0]);
        assert_eq!(encoded, "z");
        assert_eq!(decode(encoded.as_bytes()).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn all_space_group_uses_y_shortcut() {
        let encoded = encode(&[0x20, 0x20, 0x20, 0x20]);
        assert_eq!(encoded, "y");
        assert_eq!(
            decode(encoded.as_bytes()).unwrap(),
            vec![0x20, 0x20, 0x20, 0x20]
        );
    }

    #[test]
    fn shortcut_only_applies_to_a_full_group() {
        let encoded = encode(&[0, 0, 0]);
        assert_ne!(encoded, "z");
        assert_eq!(decode(encoded.as_bytes()).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn partial_final_groups_of_every_length() {
        for len in 1..=4usize {
            let data: Vec<u8> = (1..=len as u8).collect();
            let encoded = encode(&data);
            assert_eq!(decode(encoded.as_bytes()).unwrap(), data, "len={len}");
        }
    }

    #[test]
    fn z_shortcut_mid_group_is_rejected() {
        assert!(decode(b"!!z").is_err());
    }

    #[test]
    fn out_of_range_character_is_rejected() {
        assert!(decode(&[0x7f]).is_err());
    }

    #[test]
    fn decoded_len_matches_decode_output() {
        let data = b"0123456789";
        let encoded = encode(data);
        assert_eq!(
            decoded_len(encoded.as_bytes()).unwrap(),
            decode(encoded.as_bytes()).unwrap().len()
        );
    }
}
