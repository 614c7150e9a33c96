// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Notation writer. Re-emits a binary value's `preferred_encoding`
//! hint verbatim, except base85 which this crate always downgrades to
//! base64 on write (spec's round-trip note: not every notation
//! reader speaks base85).

use super::SIGNATURE;
use crate::encoding::{base16, base64};
use crate::error::Result;
use crate::sax::driver;
use crate::sax::EventSink;
use crate::value::{format_real, BinaryEncoding, Value};
use std::borrow::Cow;
use uuid::Uuid;

struct NotationWriter {
    out: Vec<u8>,
    pretty: bool,
    depth: usize,
    /// Per open container: whether at least one element has already
    /// been written (controls the leading comma and, for `pretty`,
    /// the leading newline+indent).
    wrote_first: Vec<bool>,
}

impl NotationWriter {
    fn indent(&mut self) {
        if self.pretty {
            self.out.push(b'\n');
            self.out.extend(std::iter::repeat(b' ').take(self.depth * 2));
        }
    }

    /// Call at the start of every array element / map key: writes the
    /// separating comma (and indentation) unless this is the
    /// container's first child.
    fn before_element(&mut self) {
        let first = self.wrote_first.last_mut().expect("inside a container");
        if *first {
            self.out.push(b',');
        } else {
            *first = true;
        }
        self.indent();
    }

    fn write_quoted_plain(&mut self, text: &str) {
        self.out.push(b'"');
        self.out.extend_from_slice(text.as_bytes());
        self.out.push(b'"');
    }
}

impl EventSink for NotationWriter {
    fn undef(&mut self) -> Result<()> {
        self.out.push(b'!');
        Ok(())
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.out.push(if v { b'1' } else { b'0' });
        Ok(())
    }

    fn integer(&mut self, v: i32) -> Result<()> {
        self.out.extend_from_slice(format!("i{v}").as_bytes());
        Ok(())
    }

    fn real(&mut self, v: f64) -> Result<()> {
        self.out.push(b'r');
        self.out.extend_from_slice(format_real(v).as_bytes());
        Ok(())
    }

    fn uuid(&mut self, v: Uuid) -> Result<()> {
        self.out.push(b'u');
        self.out.extend_from_slice(v.hyphenated().to_string().as_bytes());
        Ok(())
    }

    fn string(&mut self, v: Cow<'_, str>) -> Result<()> {
        self.out.extend_from_slice(format!("s({})\"", v.len()).as_bytes());
        self.out.extend_from_slice(v.as_bytes());
        self.out.push(b'"');
        Ok(())
    }

    fn date(&mut self, v: f64) -> Result<()> {
        self.out.push(b'd');
        self.write_quoted_plain(&crate::value::date_to_iso8601(v));
        Ok(())
    }

    fn uri(&mut self, v: Cow<'_, str>) -> Result<()> {
        self.out.push(b'l');
        self.write_quoted_plain(&v);
        Ok(())
    }

    fn binary(&mut self, v: Cow<'_, [u8]>, enc_hint: Option<BinaryEncoding>) -> Result<()> {
        match enc_hint.unwrap_or(BinaryEncoding::Base64) {
            BinaryEncoding::Raw => {
                self.out.extend_from_slice(format!("b({})\"", v.len()).as_bytes());
                self.out.extend_from_slice(&v);
                self.out.push(b'"');
            }
            BinaryEncoding::Base16 => {
                self.out.extend_from_slice(b"b16");
                self.write_quoted_plain(&base16::encode(&v));
            }
            BinaryEncoding::Base64 => {
                self.out.extend_from_slice(b"b64");
                self.write_quoted_plain(&base64::encode(&v));
            }
            BinaryEncoding::Base85 => {
                crate::warn!(
                    "notation serializer downgrading a base85-encoded binary ({} bytes) to base64",
                    v.len()
                );
                self.out.extend_from_slice(b"b64");
                self.write_quoted_plain(&base64::encode(&v));
            }
        }
        Ok(())
    }

    fn array_begin(&mut self, _hint_size: Option<usize>) -> Result<()> {
        self.out.push(b'[');
        self.depth += 1;
        self.wrote_first.push(false);
        Ok(())
    }

    fn array_value_begin(&mut self) -> Result<()> {
        self.before_element();
        Ok(())
    }

    fn array_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_end(&mut self, _size: usize) -> Result<()> {
        self.depth -= 1;
        if self.wrote_first.pop() == Some(true) {
            self.indent();
        }
        self.out.push(b']');
        Ok(())
    }

    fn map_begin(&mut self, _hint_size: Option<usize>) -> Result<()> {
        self.out.push(b'{');
        self.depth += 1;
        self.wrote_first.push(false);
        Ok(())
    }

    fn map_key_begin(&mut self) -> Result<()> {
        self.before_element();
        Ok(())
    }

    fn map_key_end(&mut self) -> Result<()> {
        self.out.push(b':');
        if self.pretty {
            self.out.push(b' ');
        }
        Ok(())
    }

    fn map_value_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_end(&mut self, _size: usize) -> Result<()> {
        self.depth -= 1;
        if self.wrote_first.pop() == Some(true) {
            self.indent();
        }
        self.out.push(b'}');
        Ok(())
    }
}

/// Serializes `value` to the notation wire format.
pub fn serialize(value: &Value, pretty: bool) -> Result<Vec<u8>> {
    let mut writer = NotationWriter {
        out: SIGNATURE.to_vec(),
        pretty,
        depth: 0,
        wrote_first: Vec::new(),
    };
    driver::serialize(value, &mut writer)?;
    Ok(writer.out)
}
