// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML writer. Built on `quick-xml`'s `Writer`, which already escapes
//! the five predefined entities on `Event::Text`/attribute writes, so
//! this module never hand-rolls entity encoding. Container opening
//! tags are written lazily, on the container's first child, so an
//! empty array/map collapses to the self-closing `<array />`/`<map />`
//! form spec.md §8 (P8) requires instead of `<array></array>`.

use super::SIGNATURE;
use crate::encoding::{base16, base64, base85};
use crate::error::{Error, Result};
use crate::sax::driver;
use crate::sax::EventSink;
use crate::value::{date_to_iso8601, format_real, BinaryEncoding, Value};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::borrow::Cow;
use uuid::Uuid;

fn xml_io_err(e: quick_xml::Error) -> Error {
    Error::Io(std::io::Error::other(e.to_string()))
}

/// One open container awaiting its first child. `written` flips to
/// `true` the instant `ensure_container_open` fires its `Start` tag;
/// if it never does, `array_end`/`map_end` write the self-closing form
/// instead.
struct OpenContainer {
    tag: &'static str,
    written: bool,
}

struct XmlWriter {
    writer: Writer<Vec<u8>>,
    stack: Vec<OpenContainer>,
    writing_key: bool,
}

impl XmlWriter {
    fn ensure_container_open(&mut self) -> Result<()> {
        if let Some(top) = self.stack.last_mut() {
            if !top.written {
                let tag = top.tag;
                top.written = true;
                self.writer
                    .write_event(Event::Start(BytesStart::new(tag)))
                    .map_err(xml_io_err)?;
            }
        }
        Ok(())
    }

    fn write_leaf(&mut self, tag: &str, text: Option<&str>) -> Result<()> {
        self.ensure_container_open()?;
        match text {
            None => self
                .writer
                .write_event(Event::Empty(BytesStart::new(tag)))
                .map_err(xml_io_err),
            Some(t) => {
                self.writer
                    .write_event(Event::Start(BytesStart::new(tag)))
                    .map_err(xml_io_err)?;
                self.writer
                    .write_event(Event::Text(BytesText::new(t)))
                    .map_err(xml_io_err)?;
                self.writer
                    .write_event(Event::End(BytesEnd::new(tag)))
                    .map_err(xml_io_err)
            }
        }
    }

    fn close_container(&mut self) -> Result<()> {
        let top = self.stack.pop().ok_or(Error::UnclosedContainer)?;
        if top.written {
            self.writer
                .write_event(Event::End(BytesEnd::new(top.tag)))
                .map_err(xml_io_err)
        } else {
            self.writer
                .write_event(Event::Empty(BytesStart::new(top.tag)))
                .map_err(xml_io_err)
        }
    }
}

impl EventSink for XmlWriter {
    fn undef(&mut self) -> Result<()> {
        self.write_leaf("undef", None)
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        if v {
            self.write_leaf("boolean", Some("1"))
        } else {
            self.write_leaf("boolean", None)
        }
    }

    fn integer(&mut self, v: i32) -> Result<()> {
        if v == 0 {
            self.write_leaf("integer", None)
        } else {
            self.write_leaf("integer", Some(&v.to_string()))
        }
    }

    fn real(&mut self, v: f64) -> Result<()> {
        if v == 0.0 {
            self.write_leaf("real", None)
        } else {
            self.write_leaf("real", Some(&format_real(v)))
        }
    }

    fn uuid(&mut self, v: Uuid) -> Result<()> {
        if v.is_nil() {
            self.write_leaf("uuid", None)
        } else {
            self.write_leaf("uuid", Some(&v.hyphenated().to_string()))
        }
    }

    fn string(&mut self, v: Cow<'_, str>) -> Result<()> {
        if self.writing_key {
            self.ensure_container_open()?;
            self.writer
                .write_event(Event::Start(BytesStart::new("key")))
                .map_err(xml_io_err)?;
            if !v.is_empty() {
                self.writer
                    .write_event(Event::Text(BytesText::new(&v)))
                    .map_err(xml_io_err)?;
            }
            self.writer
                .write_event(Event::End(BytesEnd::new("key")))
                .map_err(xml_io_err)
        } else if v.is_empty() {
            self.write_leaf("string", None)
        } else {
            self.write_leaf("string", Some(&v))
        }
    }

    fn date(&mut self, v: f64) -> Result<()> {
        if v == 0.0 {
            self.write_leaf("date", None)
        } else {
            self.write_leaf("date", Some(&date_to_iso8601(v)))
        }
    }

    fn uri(&mut self, v: Cow<'_, str>) -> Result<()> {
        if v.is_empty() {
            self.write_leaf("uri", None)
        } else {
            self.write_leaf("uri", Some(&v))
        }
    }

    fn binary(&mut self, v: Cow<'_, [u8]>, enc_hint: Option<BinaryEncoding>) -> Result<()> {
        self.ensure_container_open()?;
        let (codec_name, text) = match enc_hint.unwrap_or(BinaryEncoding::Base64) {
            BinaryEncoding::Base16 => ("base16", base16::encode(&v)),
            BinaryEncoding::Base85 => ("base85", base85::encode(&v)),
            BinaryEncoding::Raw | BinaryEncoding::Base64 => ("base64", base64::encode(&v)),
        };
        let mut start = BytesStart::new("binary");
        start.push_attribute(("encoding", codec_name));
        if text.is_empty() {
            self.writer.write_event(Event::Empty(start)).map_err(xml_io_err)
        } else {
            self.writer.write_event(Event::Start(start)).map_err(xml_io_err)?;
            self.writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml_io_err)?;
            self.writer
                .write_event(Event::End(BytesEnd::new("binary")))
                .map_err(xml_io_err)
        }
    }

    fn array_begin(&mut self, _hint_size: Option<usize>) -> Result<()> {
        self.ensure_container_open()?;
        self.stack.push(OpenContainer { tag: "array", written: false });
        Ok(())
    }

    fn array_value_begin(&mut self) -> Result<()> {
        self.ensure_container_open()
    }

    fn array_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_end(&mut self, _size: usize) -> Result<()> {
        self.close_container()
    }

    fn map_begin(&mut self, _hint_size: Option<usize>) -> Result<()> {
        self.ensure_container_open()?;
        self.stack.push(OpenContainer { tag: "map", written: false });
        Ok(())
    }

    fn map_key_begin(&mut self) -> Result<()> {
        self.ensure_container_open()?;
        self.writing_key = true;
        Ok(())
    }

    fn map_key_end(&mut self) -> Result<()> {
        self.writing_key = false;
        Ok(())
    }

    fn map_value_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_value_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn map_end(&mut self, _size: usize) -> Result<()> {
        self.close_container()
    }
}

/// Serializes `value` to the XML wire format, wrapped in the
/// required `<llsd>` root. `pretty` requests `quick-xml`'s built-in
/// two-space indentation.
pub fn serialize(value: &Value, pretty: bool) -> Result<Vec<u8>> {
    let mut out = SIGNATURE.to_vec();
    let inner = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };
    let mut writer = XmlWriter {
        writer: inner,
        stack: Vec::new(),
        writing_key: false,
    };

    writer
        .writer
        .write_event(Event::Start(BytesStart::new("llsd")))
        .map_err(xml_io_err)?;
    driver::serialize(value, &mut writer)?;
    writer
        .writer
        .write_event(Event::End(BytesEnd::new("llsd")))
        .map_err(xml_io_err)?;

    out.extend_from_slice(&writer.writer.into_inner());
    if pretty {
        out.push(b'\n');
    }
    Ok(out)
}
