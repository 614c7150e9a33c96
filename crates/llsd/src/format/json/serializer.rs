// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON writer. Builds a `serde_json::Value` tree by implementing
//! `EventSink` directly (the same `ValueBuilder` shape `sax::builder`
//! uses, targeting `serde_json::Value` instead of `llsd::Value`), then
//! hands it to `serde_json::to_vec`/`to_vec_pretty` — this crate never
//! hand-rolls `\uXXXX` surrogate-pair escaping, `serde_json` already
//! round-trips UTF-8 strings correctly per RFC 8259.

use super::{BASE64_PREFIX, URI_PREFIX};
use crate::encoding::base64;
use crate::error::{Error, Result};
use crate::sax::driver;
use crate::sax::EventSink;
use crate::value::{date_to_iso8601, BinaryEncoding, Value};
use std::borrow::Cow;
use uuid::Uuid;

enum Frame {
    Array(Vec<serde_json::Value>),
    Object {
        map: serde_json::Map<String, serde_json::Value>,
        pending_key: Option<String>,
    },
}

#[derive(Default)]
struct JsonBuilder {
    stack: Vec<Frame>,
    collecting_key: bool,
    result: Option<serde_json::Value>,
}

impl JsonBuilder {
    fn push_value(&mut self, v: serde_json::Value) -> Result<()> {
        match self.stack.last_mut() {
            None => {
                self.result = Some(v);
                Ok(())
            }
            Some(Frame::Array(items)) => {
                items.push(v);
                Ok(())
            }
            Some(Frame::Object { map, pending_key }) => {
                let key = pending_key.take().ok_or(Error::NonStringMapKey)?;
                map.insert(key, v);
                Ok(())
            }
        }
    }
}

impl EventSink for JsonBuilder {
    fn undef(&mut self) -> Result<()> {
        self.push_value(serde_json::Value::Null)
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.push_value(serde_json::Value::Bool(v))
    }

    fn integer(&mut self, v: i32) -> Result<()> {
        self.push_value(serde_json::Value::Number(v.into()))
    }

    fn real(&mut self, v: f64) -> Result<()> {
        let n = serde_json::Number::from_f64(v).ok_or(Error::CoercionUnsupported {
            from: "real",
            to: "json-number",
        })?;
        self.push_value(serde_json::Value::Number(n))
    }

    fn uuid(&mut self, v: Uuid) -> Result<()> {
        self.push_value(serde_json::Value::String(v.hyphenated().to_string()))
    }

    fn string(&mut self, v: Cow<'_, str>) -> Result<()> {
        if self.collecting_key {
            match self.stack.last_mut() {
                Some(Frame::Object { pending_key, .. }) => {
                    *pending_key = Some(v.into_owned());
                    Ok(())
                }
                _ => Err(Error::NonStringMapKey),
            }
        } else {
            self.push_value(serde_json::Value::String(v.into_owned()))
        }
    }

    fn date(&mut self, v: f64) -> Result<()> {
        self.push_value(serde_json::Value::String(date_to_iso8601(v)))
    }

    fn uri(&mut self, v: Cow<'_, str>) -> Result<()> {
        self.push_value(serde_json::Value::String(format!("{URI_PREFIX}{v}")))
    }

    fn binary(&mut self, v: Cow<'_, [u8]>, _enc_hint: Option<BinaryEncoding>) -> Result<()> {
        self.push_value(serde_json::Value::String(format!(
            "{BASE64_PREFIX}{}",
            base64::encode(&v)
        )))
    }

    fn array_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        self.stack.push(Frame::Array(Vec::with_capacity(hint_size.unwrap_or(0))));
        Ok(())
    }

    fn array_value_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_end(&mut self, _size: usize) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.push_value(serde_json::Value::Array(items)),
            _ => Err(Error::UnclosedContainer),
        }
    }

    fn map_begin(&mut self, _hint_size: Option<usize>) -> Result<()> {
        self.stack.push(Frame::Object {
            map: serde_json::Map::new(),
            pending_key: None,
        });
        Ok(())
    }

    fn map_key_begin(&mut self) -> Result<()> {
        self.collecting_key = true;
        Ok(())
    }

    fn map_key_end(&mut self) -> Result<()> {
        self.collecting_key = false;
        Ok(())
    }

    fn map_value_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_end(&mut self, _size: usize) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object { map, .. }) => self.push_value(serde_json::Value::Object(map)),
            _ => Err(Error::UnclosedContainer),
        }
    }
}

/// Serializes `value` to JSON. `pretty` requests `serde_json`'s
/// standard two-space-indented form.
pub fn serialize(value: &Value, pretty: bool) -> Result<Vec<u8>> {
    let mut builder = JsonBuilder::default();
    driver::serialize(value, &mut builder)?;
    let json = builder.result.unwrap_or(serde_json::Value::Null);

    let to_io_err = |e: serde_json::Error| Error::Io(std::io::Error::other(e.to_string()));
    if pretty {
        serde_json::to_vec_pretty(&json).map_err(to_io_err)
    } else {
        serde_json::to_vec(&json).map_err(to_io_err)
    }
}
