// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Hand-written reader for the binary format: no existing crate
//! speaks this tag-byte-plus-fixed-payload grammar, so this is a
//! small cursor over the input slice plus a recursive tag dispatch.

use super::SIGNATURE;
use crate::error::{Error, Result};
use crate::sax::builder::ValueBuilder;
use crate::sax::state::StateMachine;
use crate::sax::{EventSink, TypeTag};
use crate::value::{BinaryEncoding, Value};
use std::borrow::Cow;
use uuid::Uuid;

/// A cap on a container's untrusted wire-reported element count, used
/// only to bound the `Vec`/`Map` capacity hint — never to pre-allocate
/// the count verbatim, since a 4-byte count can claim billions of
/// elements a short input could never actually supply.
const HINT_CAP: usize = 4096;

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::AllocationFailed)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(Error::UnexpectedEof { expected: "binary payload" })?;
        self.pos = end;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_u32_be(&mut self) -> Result<u32> {
        let b: [u8; 4] = self.take(4)?.try_into().expect("exactly 4 bytes");
        Ok(u32::from_be_bytes(b))
    }

    fn take_i32_be(&mut self) -> Result<i32> {
        let b: [u8; 4] = self.take(4)?.try_into().expect("exactly 4 bytes");
        Ok(i32::from_be_bytes(b))
    }

    fn take_f64_be(&mut self) -> Result<f64> {
        let b: [u8; 8] = self.take(8)?.try_into().expect("exactly 8 bytes");
        Ok(f64::from_be_bytes(b))
    }

    fn take_uuid(&mut self) -> Result<Uuid> {
        let b: [u8; 16] = self.take(16)?.try_into().expect("exactly 16 bytes");
        Ok(Uuid::from_bytes(b))
    }

    fn take_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.take_u32_be()? as usize;
        self.take(len)
    }
}

/// Parses a complete binary-format document.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    let builder = parse_into(bytes, ValueBuilder::new())?;
    builder.into_value().ok_or(Error::UnexpectedEof {
        expected: "a top-level value",
    })
}

/// Parses a complete binary-format document directly into `sink`,
/// without necessarily building a [`Value`] tree — the entry point
/// behind [`crate::parse_sax`].
pub fn parse_into<S: EventSink>(bytes: &[u8], sink: S) -> Result<S> {
    let mut cursor = Cursor::new(bytes);
    let sig = cursor.take(SIGNATURE.len())?;
    if sig != SIGNATURE {
        return Err(Error::SignatureMismatch);
    }

    let mut sm = StateMachine::new(sink);
    parse_value(&mut cursor, &mut sm)?;
    sm.finish()
}

fn parse_value<S: EventSink>(cursor: &mut Cursor<'_>, sm: &mut StateMachine<S>) -> Result<()> {
    let tag = cursor.take_u8()?;
    match tag {
        b'!' => {
            sm.begin_value(TypeTag::Undef)?;
            sm.sink_mut().undef()?;
            sm.end_value()
        }
        b'0' => {
            sm.begin_value(TypeTag::Boolean)?;
            sm.sink_mut().boolean(false)?;
            sm.end_value()
        }
        b'1' => {
            sm.begin_value(TypeTag::Boolean)?;
            sm.sink_mut().boolean(true)?;
            sm.end_value()
        }
        b'i' => {
            let v = cursor.take_i32_be()?;
            sm.begin_value(TypeTag::Integer)?;
            sm.sink_mut().integer(v)?;
            sm.end_value()
        }
        b'r' => {
            let v = cursor.take_f64_be()?;
            sm.begin_value(TypeTag::Real)?;
            sm.sink_mut().real(v)?;
            sm.end_value()
        }
        b'u' => {
            let v = cursor.take_uuid()?;
            sm.begin_value(TypeTag::Uuid)?;
            sm.sink_mut().uuid(v)?;
            sm.end_value()
        }
        b'd' => {
            let v = cursor.take_f64_be()?;
            sm.begin_value(TypeTag::Date)?;
            sm.sink_mut().date(v)?;
            sm.end_value()
        }
        b's' => {
            let bytes = cursor.take_length_prefixed()?;
            let s = String::from_utf8_lossy(bytes);
            sm.begin_value(TypeTag::String)?;
            sm.sink_mut().string(s)?;
            sm.end_value()
        }
        b'l' => {
            let bytes = cursor.take_length_prefixed()?;
            let s = String::from_utf8_lossy(bytes);
            sm.begin_value(TypeTag::Uri)?;
            sm.sink_mut().uri(s)?;
            sm.end_value()
        }
        b'b' => {
            let bytes = cursor.take_length_prefixed()?;
            sm.begin_value(TypeTag::Binary)?;
            sm.sink_mut().binary(Cow::Borrowed(bytes), Some(BinaryEncoding::Raw))?;
            sm.end_value()
        }
        b'[' => {
            let count = cursor.take_u32_be()? as usize;
            sm.begin_array(Some(count.min(HINT_CAP)))?;
            for _ in 0..count {
                parse_value(cursor, sm)?;
            }
            expect_tag(cursor, b']')?;
            sm.end_array()
        }
        b'{' => {
            let count = cursor.take_u32_be()? as usize;
            sm.begin_map(Some(count.min(HINT_CAP)))?;
            for _ in 0..count {
                parse_value(cursor, sm)?; // key: a plain string token
                parse_value(cursor, sm)?; // value
            }
            expect_tag(cursor, b'}')?;
            sm.end_map()
        }
        other => Err(Error::UnknownTag(other)),
    }
}

fn expect_tag(cursor: &mut Cursor<'_>, expected: u8) -> Result<()> {
    let tag = cursor.take_u8()?;
    if tag == expected {
        Ok(())
    } else {
        Err(Error::UnknownTag(tag))
    }
}
