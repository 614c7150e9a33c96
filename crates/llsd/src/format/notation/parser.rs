// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive-descent notation parser. Delimiters (`,`, `:`, `]`, `}`)
//! are what tell this format a value is actually finished, so unlike
//! the binary parser, `sm.end_value()` for a scalar element is called
//! by the *caller* (the array/map loop) once the trailing delimiter
//! is seen, not immediately after the scalar's raw callback. A nested
//! container's `end_value` notification to its parent slot already
//! happens inside `StateMachine::end_array`/`end_map`, so the loop
//! only defers for scalars — `parse_value`'s `bool` return says which.

use super::lexer::{read_paren_sized, read_quoted_escaped, read_quoted_plain, Cursor};
use super::SIGNATURE;
use crate::encoding::{base16, base64, base85};
use crate::error::{Error, Result};
use crate::sax::builder::ValueBuilder;
use crate::sax::state::StateMachine;
use crate::sax::{EventSink, TypeTag};
use crate::value::{BinaryEncoding, Value};
use std::borrow::Cow;
use uuid::Uuid;

/// Parses a complete notation-format document.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    let builder = parse_into(bytes, ValueBuilder::new())?;
    builder.into_value().ok_or(Error::UnexpectedEof {
        expected: "a top-level value",
    })
}

/// Parses a complete notation-format document directly into `sink`,
/// without necessarily building a [`Value`] tree — the entry point
/// behind [`crate::parse_sax`].
pub fn parse_into<S: EventSink>(bytes: &[u8], sink: S) -> Result<S> {
    let mut cursor = Cursor::new(bytes);
    let sig = cursor.take(SIGNATURE.len())?;
    if sig != SIGNATURE {
        return Err(Error::SignatureMismatch);
    }

    let mut sm = StateMachine::new(sink);
    cursor.skip_whitespace();
    if parse_value(&mut cursor, &mut sm)? {
        sm.end_value()?;
    }
    sm.finish()
}

/// Parses one value at the cursor. Returns `true` if the caller still
/// owes `sm.end_value()` (scalars), `false` if the value was a
/// container that already notified its parent slot internally.
fn parse_value<S: EventSink>(cursor: &mut Cursor<'_>, sm: &mut StateMachine<S>) -> Result<bool> {
    let tag = cursor.peek().ok_or(Error::UnexpectedEof { expected: "a value" })?;
    match tag {
        b'!' => {
            cursor.bump()?;
            sm.begin_value(TypeTag::Undef)?;
            sm.sink_mut().undef()?;
            Ok(true)
        }
        b'0' => {
            cursor.bump()?;
            sm.begin_value(TypeTag::Boolean)?;
            sm.sink_mut().boolean(false)?;
            Ok(true)
        }
        b'1' => {
            cursor.bump()?;
            sm.begin_value(TypeTag::Boolean)?;
            sm.sink_mut().boolean(true)?;
            Ok(true)
        }
        b't' | b'T' | b'f' | b'F' => {
            let v = parse_boolean_word(cursor)?;
            sm.begin_value(TypeTag::Boolean)?;
            sm.sink_mut().boolean(v)?;
            Ok(true)
        }
        b'i' => {
            cursor.bump()?;
            let v = parse_integer_literal(cursor)?;
            sm.begin_value(TypeTag::Integer)?;
            sm.sink_mut().integer(v)?;
            Ok(true)
        }
        b'r' => {
            cursor.bump()?;
            let v = parse_real_literal(cursor)?;
            sm.begin_value(TypeTag::Real)?;
            sm.sink_mut().real(v)?;
            Ok(true)
        }
        b'u' => {
            cursor.bump()?;
            let raw = cursor.take(36)?;
            let text = std::str::from_utf8(raw).map_err(|_| Error::InvalidUuid)?;
            let v = Uuid::parse_str(text).map_err(|_| Error::InvalidUuid)?;
            sm.begin_value(TypeTag::Uuid)?;
            sm.sink_mut().uuid(v)?;
            Ok(true)
        }
        b'd' => {
            cursor.bump()?;
            let raw = read_quoted_plain(cursor)?;
            let text = String::from_utf8_lossy(raw).into_owned();
            let v = crate::value::iso8601_to_epoch_seconds(&text)
                .ok_or_else(|| Error::InvalidDate(text.clone()))?;
            sm.begin_value(TypeTag::Date)?;
            sm.sink_mut().date(v)?;
            Ok(true)
        }
        b'l' => {
            cursor.bump()?;
            let raw = read_quoted_plain(cursor)?;
            let text = String::from_utf8_lossy(raw);
            sm.begin_value(TypeTag::Uri)?;
            sm.sink_mut().uri(text)?;
            Ok(true)
        }
        b's' => {
            cursor.bump()?;
            let text = parse_string_payload(cursor)?;
            sm.begin_value(TypeTag::String)?;
            sm.sink_mut().string(Cow::Owned(text))?;
            Ok(true)
        }
        b'"' | b'\'' => {
            let text = String::from_utf8_lossy(&read_quoted_escaped(cursor, tag)?).into_owned();
            sm.begin_value(TypeTag::String)?;
            sm.sink_mut().string(Cow::Owned(text))?;
            Ok(true)
        }
        b'b' => {
            cursor.bump()?;
            let (bytes, enc) = parse_binary_payload(cursor)?;
            sm.begin_value(TypeTag::Binary)?;
            sm.sink_mut().binary(Cow::Owned(bytes), Some(enc))?;
            Ok(true)
        }
        b'[' => {
            cursor.bump()?;
            parse_array(cursor, sm)?;
            Ok(false)
        }
        b'{' => {
            cursor.bump()?;
            parse_map(cursor, sm)?;
            Ok(false)
        }
        _ => Err(Error::UnexpectedToken {
            expected: "a value's leading type byte",
            state: "notation-value",
        }),
    }
}

/// Consumes `t`/`T`/`f`/`F` plus, permissively, any following run of
/// ASCII letters (so `true`/`TRUE`/`t`/`T` and `false`/`FALSE`/`f`/`F`
/// all parse).
fn parse_boolean_word(cursor: &mut Cursor<'_>) -> Result<bool> {
    let first = cursor.bump()?;
    cursor.take_while(|b| b.is_ascii_alphabetic());
    Ok(matches!(first, b't' | b'T'))
}

fn parse_integer_literal(cursor: &mut Cursor<'_>) -> Result<i32> {
    let start = cursor.offset();
    if cursor.peek() == Some(b'-') {
        cursor.bump()?;
    }
    cursor.take_while(|b| b.is_ascii_digit());
    let text = std::str::from_utf8(cursor.since(start)).expect("ascii digits");
    text.parse().map_err(|_| Error::UnexpectedToken {
        expected: "a decimal integer literal",
        state: "notation-integer",
    })
}

fn parse_real_literal(cursor: &mut Cursor<'_>) -> Result<f64> {
    let start = cursor.offset();
    if matches!(cursor.peek(), Some(b'-' | b'+')) {
        cursor.bump()?;
    }
    cursor.take_while(|b| b.is_ascii_digit());
    if cursor.peek() == Some(b'.') {
        cursor.bump()?;
        cursor.take_while(|b| b.is_ascii_digit());
    }
    if matches!(cursor.peek(), Some(b'e' | b'E')) {
        cursor.bump()?;
        if matches!(cursor.peek(), Some(b'-' | b'+')) {
            cursor.bump()?;
        }
        cursor.take_while(|b| b.is_ascii_digit());
    }
    let text = std::str::from_utf8(cursor.since(start)).expect("ascii float literal");
    text.parse().map_err(|_| Error::UnexpectedToken {
        expected: "a floating-point literal",
        state: "notation-real",
    })
}

/// `s(N)"…"` raw form or `"…"`/`'…'` escaped quoted form.
fn parse_string_payload(cursor: &mut Cursor<'_>) -> Result<String> {
    match cursor.peek() {
        Some(b'(') => {
            let bytes = read_paren_sized(cursor)?;
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
        Some(quote @ (b'"' | b'\'')) => {
            Ok(String::from_utf8_lossy(&read_quoted_escaped(cursor, quote)?).into_owned())
        }
        _ => Err(Error::UnexpectedToken {
            expected: "`(` or a quote character",
            state: "notation-string",
        }),
    }
}

/// `b(N)"…"` raw octets, or `b16"…"`/`b64"…"`/`b85"…"` encoded.
fn parse_binary_payload(cursor: &mut Cursor<'_>) -> Result<(Vec<u8>, BinaryEncoding)> {
    match cursor.peek() {
        Some(b'(') => {
            let bytes = read_paren_sized(cursor)?;
            Ok((bytes.to_vec(), BinaryEncoding::Raw))
        }
        _ => {
            let code = cursor.take(2)?;
            let text = read_quoted_plain(cursor)?;
            match code {
                b"16" => Ok((base16::decode(text)?, BinaryEncoding::Base16)),
                b"64" => Ok((base64::decode(text)?, BinaryEncoding::Base64)),
                b"85" => Ok((base85::decode(text)?, BinaryEncoding::Base85)),
                _ => Err(Error::UnexpectedToken {
                    expected: "a `16`/`64`/`85` binary encoding code",
                    state: "notation-binary",
                }),
            }
        }
    }
}

fn parse_array<S: EventSink>(cursor: &mut Cursor<'_>, sm: &mut StateMachine<S>) -> Result<()> {
    sm.begin_array(None)?;
    cursor.skip_whitespace();
    if cursor.peek() == Some(b']') {
        cursor.bump()?;
        return sm.end_array();
    }
    loop {
        let needs_end = parse_value(cursor, sm)?;
        cursor.skip_whitespace();
        match cursor.bump()? {
            b',' => {
                if needs_end {
                    sm.end_value()?;
                }
                cursor.skip_whitespace();
                if cursor.peek() == Some(b']') {
                    cursor.bump()?;
                    return sm.end_array();
                }
            }
            b']' => {
                if needs_end {
                    sm.end_value()?;
                }
                return sm.end_array();
            }
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "`,` or `]`",
                    state: "notation-array",
                })
            }
        }
    }
}

fn parse_map<S: EventSink>(cursor: &mut Cursor<'_>, sm: &mut StateMachine<S>) -> Result<()> {
    sm.begin_map(None)?;
    cursor.skip_whitespace();
    if cursor.peek() == Some(b'}') {
        cursor.bump()?;
        return sm.end_map();
    }
    loop {
        let key_needs_end = parse_value(cursor, sm)?;
        cursor.skip_whitespace();
        cursor.expect(b':')?;
        if key_needs_end {
            sm.end_value()?;
        }
        cursor.skip_whitespace();

        let value_needs_end = parse_value(cursor, sm)?;
        cursor.skip_whitespace();
        match cursor.bump()? {
            b',' => {
                if value_needs_end {
                    sm.end_value()?;
                }
                cursor.skip_whitespace();
                if cursor.peek() == Some(b'}') {
                    cursor.bump()?;
                    return sm.end_map();
                }
            }
            b'}' => {
                if value_needs_end {
                    sm.end_value()?;
                }
                return sm.end_map();
            }
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "`,` or `}`",
                    state: "notation-map",
                })
            }
        }
    }
}
