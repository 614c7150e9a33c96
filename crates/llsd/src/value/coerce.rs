// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cross-type coercions. Every LLSD type can be asked for its value
//! as any other type; conversions follow a fixed table (undef/bool/
//! int/real/date all interconvert; binary interconverts with
//! int/real/uuid as a fixed-width big-endian blob; containers never
//! coerce to anything else). Pairs outside the table return
//! [`Error::CoercionUnsupported`] rather than silently defaulting —
//! unlike the C original's fatal assertion, this is a recoverable
//! error at the library boundary.

use super::{Binary, Value};
use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

fn unsupported(from: &'static str, to: &'static str) -> Error {
    Error::CoercionUnsupported { from, to }
}

impl Value {
    /// Coerce to `bool` per spec.md §4.2's truthiness table: `undef`,
    /// `integer(0)`, `real(0.0)`, empty `string`/`uri`/`binary` and
    /// empty containers are false; everything else is true. Always
    /// succeeds.
    pub fn as_bool(&self) -> Result<bool> {
        Ok(match self {
            Self::Undef => false,
            Self::Boolean(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Real(r) => *r != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Uri(s) => !s.is_empty(),
            Self::Binary(b) => !b.is_empty(),
            Self::Array(a) => !a.is_empty(),
            Self::Map(m) => !m.is_empty(),
            Self::Uuid(u) => !u.is_nil(),
            Self::Date(d) => *d != 0.0,
        })
    }

    /// Coerce to `i32`. `real`/`date` round half-to-even and saturate
    /// on overflow (Rust's `as` cast does this natively since 1.45).
    /// `string` parses as a decimal integer, defaulting to `0` on
    /// parse failure — the original never treats a non-numeric string
    /// as fatal here. `binary` must be exactly 4 bytes, big-endian.
    pub fn as_i32(&self) -> Result<i32> {
        match self {
            Self::Undef => Ok(0),
            Self::Boolean(b) => Ok(i32::from(*b)),
            Self::Integer(i) => Ok(*i),
            Self::Real(r) => Ok(r.round_ties_even() as i32),
            Self::Date(d) => Ok(d.round_ties_even() as i32),
            Self::String(s) => Ok(s.trim().parse().unwrap_or(0)),
            Self::Binary(b) => {
                let bytes: [u8; 4] = b
                    .as_bytes()
                    .try_into()
                    .map_err(|_| unsupported("binary", "integer"))?;
                Ok(i32::from_be_bytes(bytes))
            }
            _ => Err(unsupported(self.type_tag().as_str(), "integer")),
        }
    }

    /// Coerce to `f64`. `string` parses as a floating-point literal,
    /// defaulting to `0.0` on parse failure. `binary` must be exactly
    /// 8 bytes, big-endian IEEE-754.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Self::Undef => Ok(0.0),
            Self::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Integer(i) => Ok(f64::from(*i)),
            Self::Real(r) => Ok(*r),
            Self::Date(d) => Ok(*d),
            Self::String(s) => Ok(s.trim().parse().unwrap_or(0.0)),
            Self::Binary(b) => {
                let bytes: [u8; 8] = b
                    .as_bytes()
                    .try_into()
                    .map_err(|_| unsupported("binary", "real"))?;
                Ok(f64::from_be_bytes(bytes))
            }
            _ => Err(unsupported(self.type_tag().as_str(), "real")),
        }
    }

    /// Coerce to a date, represented as seconds since the Unix epoch.
    /// `integer`/`real` are taken directly as a seconds count;
    /// `string` parses an ISO-8601 timestamp.
    pub fn as_date(&self) -> Result<f64> {
        match self {
            Self::Undef => Ok(0.0),
            Self::Date(d) => Ok(*d),
            Self::Integer(i) => Ok(f64::from(*i)),
            Self::Real(r) => Ok(*r),
            Self::String(s) => iso8601_to_epoch_seconds(s).ok_or_else(|| Error::InvalidDate(s.clone())),
            _ => Err(unsupported(self.type_tag().as_str(), "date")),
        }
    }

    /// Coerce to a display string. Containers and `undef` coerce to
    /// an empty string rather than erroring, matching spec.md's
    /// "never fatal" coercion philosophy. Always succeeds.
    pub fn as_string(&self) -> Result<String> {
        Ok(match self {
            Self::Undef => String::new(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Real(r) => format_real(*r),
            Self::Uuid(u) => u.hyphenated().to_string(),
            Self::String(s) => s.clone(),
            Self::Uri(s) => s.clone(),
            Self::Date(d) => date_to_iso8601(*d),
            Self::Binary(b) => String::from_utf8_lossy(b.as_bytes()).into_owned(),
            Self::Array(_) | Self::Map(_) => String::new(),
        })
    }

    /// Coerce to a URI string. `string` and `uri` both carry text and
    /// are interchangeable here, matching spec.md treating `uri` as a
    /// tagged string rather than a distinct representation.
    pub fn as_uri(&self) -> Result<String> {
        match self {
            Self::Undef => Ok(String::new()),
            Self::Uri(s) | Self::String(s) => Ok(s.clone()),
            _ => Err(unsupported(self.type_tag().as_str(), "uri")),
        }
    }

    /// Coerce to [`Uuid`]. `string` must be a valid UUID literal;
    /// `binary` must be exactly 16 raw octets.
    pub fn as_uuid(&self) -> Result<Uuid> {
        match self {
            Self::Uuid(u) => Ok(*u),
            Self::String(s) => Uuid::parse_str(s.trim()).map_err(|_| Error::InvalidUuid),
            Self::Binary(b) => {
                let bytes: [u8; 16] = b.as_bytes().try_into().map_err(|_| Error::InvalidUuid)?;
                Ok(Uuid::from_bytes(bytes))
            }
            _ => Err(unsupported(self.type_tag().as_str(), "uuid")),
        }
    }

    /// Coerce to a binary octet buffer. `string`/`uri` are taken as
    /// their UTF-8 bytes; `integer`/`real`/`uuid` as fixed-width
    /// big-endian blobs.
    pub fn as_binary(&self) -> Result<Binary> {
        match self {
            Self::Binary(b) => Ok(b.clone()),
            Self::String(s) | Self::Uri(s) => Ok(Binary::new(s.clone().into_bytes())),
            Self::Integer(i) => Ok(Binary::new(i.to_be_bytes().to_vec())),
            Self::Real(r) => Ok(Binary::new(r.to_be_bytes().to_vec())),
            Self::Uuid(u) => Ok(Binary::new(u.as_bytes().to_vec())),
            _ => Err(unsupported(self.type_tag().as_str(), "binary")),
        }
    }

    /// Strict coercion used by format drivers that must reject a
    /// structural mismatch rather than silently defaulting — e.g. the
    /// XML serializer asking a map key to actually be a string.
    pub fn expect_string(&self) -> Result<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(Error::TypeMismatch {
                expected: "string",
                found: other.type_tag().as_str(),
            }),
        }
    }
}

/// Format a real the way the notation/JSON serializers want it: the
/// shortest decimal that round-trips, never in exponential form for
/// magnitudes the eye expects as plain decimals.
pub(crate) fn format_real(r: f64) -> String {
    if r == r.trunc() && r.abs() < 1e15 {
        format!("{r:.1}")
    } else {
        format!("{r}")
    }
}

/// Render a date (seconds since the Unix epoch) as the ISO-8601 form
/// notation/JSON embed: `YYYY-MM-DDTHH:MM:SS.ffffffZ`. Shared by the
/// coercion above and by the notation/JSON format drivers.
pub(crate) fn date_to_iso8601(seconds_since_epoch: f64) -> String {
    let whole = seconds_since_epoch.trunc() as i64;
    let micros =
        ((seconds_since_epoch - seconds_since_epoch.trunc()) * 1_000_000.0).round() as i64;
    let dt = DateTime::<Utc>::from_timestamp(whole, 0)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap());
    let dt = dt + chrono::Duration::microseconds(micros);
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an ISO-8601 timestamp into seconds since the Unix epoch,
/// fractional part included.
pub(crate) fn iso8601_to_epoch_seconds(s: &str) -> Option<f64> {
    let dt = DateTime::parse_from_rfc3339(s.trim()).ok()?;
    let utc = dt.with_timezone(&Utc);
    Some(utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_micros()) / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_truthiness_matches_table() {
        assert_eq!(Value::Integer(0).as_bool().unwrap(), false);
        assert_eq!(Value::Integer(1).as_bool().unwrap(), true);
        assert_eq!(Value::string("").as_bool().unwrap(), false);
        assert_eq!(Value::string("x").as_bool().unwrap(), true);
        assert_eq!(Value::Undef.as_bool().unwrap(), false);
    }

    #[test]
    fn integer_from_string_defaults_on_parse_failure() {
        assert_eq!(Value::string("42").as_i32().unwrap(), 42);
        assert_eq!(Value::string("not a number").as_i32().unwrap(), 0);
    }

    #[test]
    fn real_rounds_ties_to_even() {
        assert_eq!(Value::Real(2.5).as_i32().unwrap(), 2);
        assert_eq!(Value::Real(3.5).as_i32().unwrap(), 4);
        assert_eq!(Value::Real(-3.9).as_i32().unwrap(), -4);
    }

    #[test]
    fn uuid_from_invalid_string_errors() {
        assert!(matches!(
            Value::string("not-a-uuid").as_uuid(),
            Err(Error::InvalidUuid)
        ));
    }

    #[test]
    fn uuid_binary_round_trip() {
        let u = Uuid::from_bytes([9u8; 16]);
        let bin = Value::Uuid(u).as_binary().unwrap();
        assert_eq!(Value::Binary(bin).as_uuid().unwrap(), u);
    }

    #[test]
    fn integer_binary_round_trip() {
        let bin = Value::Integer(-12345).as_binary().unwrap();
        assert_eq!(bin.len(), 4);
        assert_eq!(Value::Binary(bin).as_i32().unwrap(), -12345);
    }

    #[test]
    fn array_to_integer_is_unsupported() {
        let err = Value::Array(Default::default()).as_i32().unwrap_err();
        assert!(matches!(err, Error::CoercionUnsupported { from: "array", to: "integer" }));
    }

    #[test]
    fn expect_string_rejects_non_string() {
        assert!(Value::Integer(1).expect_string().is_err());
        assert!(Value::string("ok").expect_string().is_ok());
    }

    #[test]
    fn date_string_round_trip() {
        let iso = date_to_iso8601(1_700_000_000.5);
        let parsed = iso8601_to_epoch_seconds(&iso).unwrap();
        assert!((parsed - 1_700_000_000.5).abs() < 1e-5);
    }
}
