// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary-format writer. Implements [`EventSink`] directly and is
//! driven by [`crate::sax::driver::serialize`] — a `Value` tree is
//! well-formed by construction, so no `StateMachine` is needed here.

use super::SIGNATURE;
use crate::error::Result;
use crate::sax::driver;
use crate::sax::EventSink;
use crate::value::{BinaryEncoding, Value};
use std::borrow::Cow;
use uuid::Uuid;

struct BinaryWriter {
    out: Vec<u8>,
}

impl BinaryWriter {
    fn write_length_prefixed(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        self.out.extend_from_slice(bytes);
    }
}

impl EventSink for BinaryWriter {
    fn undef(&mut self) -> Result<()> {
        self.out.push(b'!');
        Ok(())
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.out.push(if v { b'1' } else { b'0' });
        Ok(())
    }

    fn integer(&mut self, v: i32) -> Result<()> {
        self.out.push(b'i');
        self.out.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn real(&mut self, v: f64) -> Result<()> {
        self.out.push(b'r');
        self.out.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn uuid(&mut self, v: Uuid) -> Result<()> {
        self.out.push(b'u');
        self.out.extend_from_slice(v.as_bytes());
        Ok(())
    }

    fn string(&mut self, v: Cow<'_, str>) -> Result<()> {
        self.out.push(b's');
        self.write_length_prefixed(v.as_bytes());
        Ok(())
    }

    fn date(&mut self, v: f64) -> Result<()> {
        self.out.push(b'd');
        self.out.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn uri(&mut self, v: Cow<'_, str>) -> Result<()> {
        self.out.push(b'l');
        self.write_length_prefixed(v.as_bytes());
        Ok(())
    }

    fn binary(&mut self, v: Cow<'_, [u8]>, _enc_hint: Option<BinaryEncoding>) -> Result<()> {
        self.out.push(b'b');
        self.write_length_prefixed(&v);
        Ok(())
    }

    fn array_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        self.out.push(b'[');
        let count = hint_size.unwrap_or(0) as u32;
        self.out.extend_from_slice(&count.to_be_bytes());
        Ok(())
    }

    fn array_value_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_end(&mut self, _size: usize) -> Result<()> {
        self.out.push(b']');
        Ok(())
    }

    fn map_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        self.out.push(b'{');
        let count = hint_size.unwrap_or(0) as u32;
        self.out.extend_from_slice(&count.to_be_bytes());
        Ok(())
    }

    fn map_key_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_key_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_value_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_end(&mut self, _size: usize) -> Result<()> {
        self.out.push(b'}');
        Ok(())
    }
}

/// Serializes `value` to the binary wire format. `pretty` has no
/// effect on binary and is accepted only to keep the per-format
/// signature uniform with the other three serializers.
pub fn serialize(value: &Value, _pretty: bool) -> Result<Vec<u8>> {
    let mut writer = BinaryWriter {
        out: SIGNATURE.to_vec(),
    };
    driver::serialize(value, &mut writer)?;
    Ok(writer.out)
}
