// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! An `EventSink` that reconstructs a [`Value`] tree from the events a
//! parser (driven through [`super::state::StateMachine`]) emits.

use super::{BinaryEncoding, EventSink};
use crate::error::{Error, Result};
use crate::value::{Array, Binary, Map, Value};
use std::borrow::Cow;
use uuid::Uuid;

enum Frame {
    Array(Array),
    Map { map: Map, pending_key: Option<String> },
}

/// Consumes SAX events and builds the single [`Value`] they describe.
/// `finish` (via `StateMachine::finish`) hands this sink back once the
/// top-level value is complete; call [`ValueBuilder::into_value`] to
/// take it.
#[derive(Default)]
pub struct ValueBuilder {
    stack: Vec<Frame>,
    collecting_key: bool,
    result: Option<Value>,
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the completed value. Returns `None` if no top-level
    /// value was ever emitted (an empty document).
    pub fn into_value(self) -> Option<Value> {
        self.result
    }

    fn push_value(&mut self, v: Value) -> Result<()> {
        match self.stack.last_mut() {
            None => {
                self.result = Some(v);
                Ok(())
            }
            Some(Frame::Array(arr)) => {
                arr.push(v);
                Ok(())
            }
            Some(Frame::Map { map, pending_key }) => {
                let key = pending_key.take().ok_or(Error::NonStringMapKey)?;
                map.insert(key, v);
                Ok(())
            }
        }
    }
}

impl EventSink for ValueBuilder {
    fn undef(&mut self) -> Result<()> {
        self.push_value(Value::Undef)
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.push_value(Value::Boolean(v))
    }

    fn integer(&mut self, v: i32) -> Result<()> {
        self.push_value(Value::Integer(v))
    }

    fn real(&mut self, v: f64) -> Result<()> {
        self.push_value(Value::Real(v))
    }

    fn uuid(&mut self, v: Uuid) -> Result<()> {
        self.push_value(Value::Uuid(v))
    }

    fn string(&mut self, v: Cow<'_, str>) -> Result<()> {
        if self.collecting_key {
            match self.stack.last_mut() {
                Some(Frame::Map { pending_key, .. }) => {
                    *pending_key = Some(v.into_owned());
                    Ok(())
                }
                _ => Err(Error::NonStringMapKey),
            }
        } else {
            self.push_value(Value::String(v.into_owned()))
        }
    }

    fn date(&mut self, v: f64) -> Result<()> {
        self.push_value(Value::Date(v))
    }

    fn uri(&mut self, v: Cow<'_, str>) -> Result<()> {
        self.push_value(Value::Uri(v.into_owned()))
    }

    fn binary(&mut self, v: Cow<'_, [u8]>, enc_hint: Option<BinaryEncoding>) -> Result<()> {
        let mut bin = Binary::new(v.into_owned());
        if let Some(enc) = enc_hint {
            bin = bin.with_encoding(enc);
        }
        self.push_value(Value::Binary(bin))
    }

    fn array_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        self.stack
            .push(Frame::Array(Array::with_capacity(hint_size.unwrap_or(0))));
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
            Some(Frame::Array(arr)) => self.push_value(Value::Array(arr)),
            _ => Err(Error::UnclosedContainer),
        }
    }

    fn map_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        self.stack.push(Frame::Map {
            map: Map::with_capacity(hint_size.unwrap_or(0)),
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
            Some(Frame::Map { map, .. }) => self.push_value(Value::Map(map)),
            _ => Err(Error::UnclosedContainer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sax::state::StateMachine;
    use crate::sax::TypeTag;

    #[test]
    fn builds_scalar_top_level_value() {
        let mut sm = StateMachine::new(ValueBuilder::new());
        sm.begin_value(TypeTag::Integer).unwrap();
        sm.sink_mut().integer(42).unwrap();
        sm.end_value().unwrap();
        let builder = sm.finish().unwrap();
        assert_eq!(builder.into_value(), Some(Value::Integer(42)));
    }

    #[test]
    fn builds_nested_array_of_maps() {
        let mut sm = StateMachine::new(ValueBuilder::new());
        sm.begin_array(None).unwrap();

        sm.begin_map(None).unwrap();
        sm.begin_value(TypeTag::String).unwrap();
        sm.sink_mut().string(Cow::Borrowed("name")).unwrap();
        sm.end_value().unwrap();
        sm.begin_value(TypeTag::String).unwrap();
        sm.sink_mut().string(Cow::Borrowed("Ford Prefect")).unwrap();
        sm.end_value().unwrap();
        sm.end_map().unwrap();

        sm.end_array().unwrap();

        let builder = sm.finish().unwrap();
        let value = builder.into_value().unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        let map = arr.get(0).unwrap().as_map().unwrap();
        assert_eq!(map.get("name"), Some(&Value::string("Ford Prefect")));
    }
}
