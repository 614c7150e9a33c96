// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The JSON wire format. No signature — JSON detection is
//! dispatch's last-chance fallback (spec.md §4.6.4/§4.8). The only
//! format whose `parse ∘ serialize` is not a logical identity: a
//! user string matching the UUID/`||b64||`/`||uri||`/ISO-8601 shapes
//! below changes type on round-trip (spec.md §8 P2).

mod parser;
mod serializer;

pub use parser::{parse, parse_into};
pub use serializer::serialize;

/// Prefix marking a JSON string as a `binary` value; the base64
/// payload follows.
pub(super) const BASE64_PREFIX: &str = "||b64||";
/// Prefix marking a JSON string as a `uri` value; the uri text follows.
pub(super) const URI_PREFIX: &str = "||uri||";
