// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML parser. Reads `quick-xml` events directly into `StateMachine`
//! calls — unlike binary/notation, XML's start/end tags already mark
//! a value's full extent, so every leaf here calls `begin_value`/the
//! raw callback/`end_value` in one shot; no deferred end like the
//! comma-delimited formats need.

use crate::error::{Error, Result};
use crate::sax::builder::ValueBuilder;
use crate::sax::state::StateMachine;
use crate::sax::{EventSink, TypeTag};
use crate::value::Value;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::borrow::Cow;

/// Parses a complete XML-format document. The leading `<?xml …?>`
/// declaration is consumed by `quick-xml` itself; this crate never
/// validates its content beyond what the parser already requires.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    let builder = parse_into(bytes, ValueBuilder::new())?;
    builder.into_value().ok_or(Error::UnexpectedEof {
        expected: "a top-level value",
    })
}

/// Parses a complete XML-format document directly into `sink`, without
/// necessarily building a [`Value`] tree — the entry point behind
/// [`crate::parse_sax`].
pub fn parse_into<S: EventSink>(bytes: &[u8], sink: S) -> Result<S> {
    let text = std::str::from_utf8(bytes).map_err(|_| Error::InvalidEncoding { codec: "utf-8" })?;
    let mut reader = Reader::from_str(text);

    expect_start(&mut reader, b"llsd")?;

    let mut sm = StateMachine::new(sink);
    parse_value(&mut reader, &mut sm)?;

    expect_end(&mut reader, b"llsd")?;
    match next_structural(&mut reader)? {
        Event::Eof => {}
        _ => {
            return Err(Error::UnexpectedToken {
                expected: "end of document after `</llsd>`",
                state: "xml-document",
            })
        }
    }

    sm.finish()
}

/// Advances past whitespace-only text, the XML declaration, comments
/// and processing instructions, returning the next structurally
/// significant event (`Start`/`End`/`Empty`/`Text`/`Eof`).
fn next_structural<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>> {
    loop {
        let event = reader
            .read_event()
            .map_err(|_| Error::UnexpectedToken { expected: "well-formed XML", state: "xml-lexer" })?;
        match event {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
            Event::Text(ref t) if t.iter().all(|b| b.is_ascii_whitespace()) => continue,
            other => return Ok(other),
        }
    }
}

fn expect_start(reader: &mut Reader<&[u8]>, name: &[u8]) -> Result<()> {
    match next_structural(reader)? {
        Event::Start(e) if e.name().as_ref() == name => Ok(()),
        _ => Err(Error::UnexpectedToken {
            expected: "opening tag",
            state: "xml-document",
        }),
    }
}

fn expect_end(reader: &mut Reader<&[u8]>, name: &[u8]) -> Result<()> {
    match next_structural(reader)? {
        Event::End(e) if e.name().as_ref() == name => Ok(()),
        _ => Err(Error::UnexpectedToken {
            expected: "closing tag",
            state: "xml-document",
        }),
    }
}

/// Reads one value: a scalar leaf or a full `array`/`map` subtree.
fn parse_value<S: EventSink>(reader: &mut Reader<&[u8]>, sm: &mut StateMachine<S>) -> Result<()> {
    match next_structural(reader)? {
        Event::Empty(e) => parse_empty_scalar(e.name().as_ref(), sm),
        Event::Start(e) => {
            let name = e.name().as_ref().to_vec();
            let encoding = e_encoding(&e)?;
            dispatch_started_value(reader, &name, &encoding, sm)
        }
        _ => Err(Error::UnexpectedToken {
            expected: "a value element",
            state: "xml-value",
        }),
    }
}

/// Reads the text content of a scalar leaf element up to its
/// matching close tag. `binary` additionally needs the `encoding`
/// attribute, handled by the caller before this is invoked for that
/// tag — see `parse_binary_leaf`.
fn read_leaf_text(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<String> {
    match next_structural(reader)? {
        Event::End(e) if e.name().as_ref() == tag => Ok(String::new()),
        Event::Text(t) => {
            let text = t
                .unescape()
                .map_err(|_| Error::InvalidEncoding { codec: "xml-entity" })?
                .into_owned();
            expect_end(reader, tag)?;
            Ok(text)
        }
        _ => Err(Error::UnexpectedToken {
            expected: "leaf text content",
            state: "xml-leaf",
        }),
    }
}

fn parse_empty_scalar<S: EventSink>(tag: &[u8], sm: &mut StateMachine<S>) -> Result<()> {
    match tag {
        b"undef" => scalar(sm, TypeTag::Undef, |sink| sink.undef()),
        b"boolean" => scalar(sm, TypeTag::Boolean, |sink| sink.boolean(false)),
        b"integer" => scalar(sm, TypeTag::Integer, |sink| sink.integer(0)),
        b"real" => scalar(sm, TypeTag::Real, |sink| sink.real(0.0)),
        b"uuid" => scalar(sm, TypeTag::Uuid, |sink| sink.uuid(uuid::Uuid::nil())),
        b"string" => scalar(sm, TypeTag::String, |sink| sink.string(Cow::Borrowed(""))),
        b"date" => scalar(sm, TypeTag::Date, |sink| sink.date(0.0)),
        b"uri" => scalar(sm, TypeTag::Uri, |sink| sink.uri(Cow::Borrowed(""))),
        b"binary" => scalar(sm, TypeTag::Binary, |sink| sink.binary(Cow::Borrowed(&[]), None)),
        b"array" => {
            sm.begin_array(Some(0))?;
            sm.end_array()
        }
        b"map" => {
            sm.begin_map(Some(0))?;
            sm.end_map()
        }
        _ => Err(Error::UnexpectedToken {
            expected: "a known LLSD element name",
            state: "xml-empty-element",
        }),
    }
}

fn scalar<S: EventSink>(
    sm: &mut StateMachine<S>,
    ty: TypeTag,
    emit: impl FnOnce(&mut S) -> Result<()>,
) -> Result<()> {
    sm.begin_value(ty)?;
    emit(sm.sink_mut())?;
    sm.end_value()
}

fn parse_scalar_text<S: EventSink>(tag: &[u8], text: &str, sm: &mut StateMachine<S>) -> Result<()> {
    match tag {
        b"undef" => scalar(sm, TypeTag::Undef, |sink| sink.undef()),
        b"boolean" => {
            let v = matches!(text.trim(), "true" | "1");
            scalar(sm, TypeTag::Boolean, |sink| sink.boolean(v))
        }
        b"integer" => {
            let v: i32 = text.trim().parse().map_err(|_| Error::UnexpectedToken {
                expected: "a decimal integer",
                state: "xml-integer",
            })?;
            scalar(sm, TypeTag::Integer, |sink| sink.integer(v))
        }
        b"real" => {
            let v: f64 = text.trim().parse().map_err(|_| Error::UnexpectedToken {
                expected: "a floating-point literal",
                state: "xml-real",
            })?;
            scalar(sm, TypeTag::Real, |sink| sink.real(v))
        }
        b"uuid" => {
            let v = uuid::Uuid::parse_str(text.trim()).map_err(|_| Error::InvalidUuid)?;
            scalar(sm, TypeTag::Uuid, |sink| sink.uuid(v))
        }
        b"string" => {
            let owned = text.to_string();
            scalar(sm, TypeTag::String, |sink| sink.string(Cow::Owned(owned)))
        }
        b"date" => {
            let v = crate::value::iso8601_to_epoch_seconds(text.trim())
                .ok_or_else(|| Error::InvalidDate(text.to_string()))?;
            scalar(sm, TypeTag::Date, |sink| sink.date(v))
        }
        b"uri" => {
            let owned = text.to_string();
            scalar(sm, TypeTag::Uri, |sink| sink.uri(Cow::Owned(owned)))
        }
        _ => Err(Error::UnexpectedToken {
            expected: "a known LLSD scalar element",
            state: "xml-scalar",
        }),
    }
}

/// `binary` needs its `encoding` attribute, so it is handled outside
/// the generic `parse_scalar_text` path, directly in `parse_value`
/// when the `Start` event is a `binary` tag.
fn parse_binary_leaf<S: EventSink>(
    reader: &mut Reader<&[u8]>,
    start_attrs_encoding: Option<String>,
    sm: &mut StateMachine<S>,
) -> Result<()> {
    let text = read_leaf_text(reader, b"binary")?;
    let codec = start_attrs_encoding.as_deref().unwrap_or("base64");
    let bytes = match codec {
        "base16" => crate::encoding::base16::decode(text.trim().as_bytes())?,
        "base64" => crate::encoding::base64::decode(text.trim().as_bytes())?,
        "base85" => crate::encoding::base85::decode(text.trim().as_bytes())?,
        _ => {
            return Err(Error::InvalidEncoding {
                codec: "xml-binary-encoding",
            })
        }
    };
    let hint = match codec {
        "base16" => crate::value::BinaryEncoding::Base16,
        "base85" => crate::value::BinaryEncoding::Base85,
        _ => crate::value::BinaryEncoding::Base64,
    };
    sm.begin_value(TypeTag::Binary)?;
    sm.sink_mut().binary(Cow::Owned(bytes), Some(hint))?;
    sm.end_value()
}

fn parse_array<S: EventSink>(reader: &mut Reader<&[u8]>, sm: &mut StateMachine<S>) -> Result<()> {
    sm.begin_array(None)?;
    loop {
        match next_structural(reader)? {
            Event::End(e) if e.name().as_ref() == b"array" => return sm.end_array(),
            Event::Empty(e) => parse_empty_scalar(e.name().as_ref(), sm)?,
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                dispatch_started_value(reader, &name, &e_encoding(&e)?, sm)?;
            }
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "an array element or `</array>`",
                    state: "xml-array",
                })
            }
        }
    }
}

fn parse_map<S: EventSink>(reader: &mut Reader<&[u8]>, sm: &mut StateMachine<S>) -> Result<()> {
    sm.begin_map(None)?;
    loop {
        match next_structural(reader)? {
            Event::End(e) if e.name().as_ref() == b"map" => return sm.end_map(),
            Event::Start(e) if e.name().as_ref() == b"key" => {
                let key_text = read_leaf_text(reader, b"key")?;
                scalar(sm, TypeTag::String, |sink| sink.string(Cow::Owned(key_text)))?;

                match next_structural(reader)? {
                    Event::Empty(v) => parse_empty_scalar(v.name().as_ref(), sm)?,
                    Event::Start(v) => {
                        let name = v.name().as_ref().to_vec();
                        dispatch_started_value(reader, &name, &e_encoding(&v)?, sm)?;
                    }
                    _ => {
                        return Err(Error::UnexpectedToken {
                            expected: "a map value after `<key>`",
                            state: "xml-map",
                        })
                    }
                }
            }
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "`<key>` or `</map>`",
                    state: "xml-map",
                })
            }
        }
    }
}

fn e_encoding(e: &quick_xml::events::BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|_| Error::InvalidEncoding { codec: "xml-attribute" })?;
        if attr.key.as_ref() == b"encoding" {
            let value = attr
                .unescape_value()
                .map_err(|_| Error::InvalidEncoding { codec: "xml-attribute" })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn dispatch_started_value<S: EventSink>(
    reader: &mut Reader<&[u8]>,
    name: &[u8],
    encoding_attr: &Option<String>,
    sm: &mut StateMachine<S>,
) -> Result<()> {
    match name {
        b"array" => parse_array(reader, sm),
        b"map" => parse_map(reader, sm),
        b"binary" => parse_binary_leaf(reader, encoding_attr.clone(), sm),
        other => {
            let text = read_leaf_text(reader, other)?;
            parse_scalar_text(other, &text, sm)
        }
    }
}
