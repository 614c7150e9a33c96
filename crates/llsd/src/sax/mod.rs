// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The SAX-style event interface shared by every parser (producer)
//! and every value-builder/serializer (consumer): a plain callback
//! surface with no grammar enforcement of its own — that lives in
//! [`state::StateMachine`].

pub mod builder;
pub mod driver;
pub mod state;

pub use crate::value::{BinaryEncoding, TypeTag};
use crate::error::Result;
use std::borrow::Cow;
use uuid::Uuid;

/// Receives one callback per token a parser or serialization walk
/// emits. Every method returns `Result<()>`; a callback returning
/// `Err` aborts the walk immediately (`Error::CallbackRejected` is
/// the conventional choice for sinks that want to veto a value
/// without having a more specific error to report).
pub trait EventSink {
    fn undef(&mut self) -> Result<()>;
    fn boolean(&mut self, v: bool) -> Result<()>;
    fn integer(&mut self, v: i32) -> Result<()>;
    fn real(&mut self, v: f64) -> Result<()>;
    fn uuid(&mut self, v: Uuid) -> Result<()>;
    fn string(&mut self, v: Cow<'_, str>) -> Result<()>;
    fn date(&mut self, v: f64) -> Result<()>;
    fn uri(&mut self, v: Cow<'_, str>) -> Result<()>;
    fn binary(&mut self, v: Cow<'_, [u8]>, enc_hint: Option<BinaryEncoding>) -> Result<()>;

    fn array_begin(&mut self, hint_size: Option<usize>) -> Result<()>;
    fn array_value_begin(&mut self) -> Result<()>;
    fn array_value_end(&mut self) -> Result<()>;
    fn array_end(&mut self, size: usize) -> Result<()>;

    fn map_begin(&mut self, hint_size: Option<usize>) -> Result<()>;
    fn map_key_begin(&mut self) -> Result<()>;
    fn map_key_end(&mut self) -> Result<()>;
    fn map_value_begin(&mut self) -> Result<()>;
    fn map_value_end(&mut self) -> Result<()>;
    fn map_end(&mut self, size: usize) -> Result<()>;
}

/// Lets a borrowed sink stand in wherever an owned one is expected —
/// `parse_into`'s callers that only have a `&mut impl EventSink` (e.g.
/// [`crate::parse_sax`]) can hand it over directly instead of wrapping.
impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn undef(&mut self) -> Result<()> {
        (**self).undef()
    }
    fn boolean(&mut self, v: bool) -> Result<()> {
        (**self).boolean(v)
    }
    fn integer(&mut self, v: i32) -> Result<()> {
        (**self).integer(v)
    }
    fn real(&mut self, v: f64) -> Result<()> {
        (**self).real(v)
    }
    fn uuid(&mut self, v: Uuid) -> Result<()> {
        (**self).uuid(v)
    }
    fn string(&mut self, v: Cow<'_, str>) -> Result<()> {
        (**self).string(v)
    }
    fn date(&mut self, v: f64) -> Result<()> {
        (**self).date(v)
    }
    fn uri(&mut self, v: Cow<'_, str>) -> Result<()> {
        (**self).uri(v)
    }
    fn binary(&mut self, v: Cow<'_, [u8]>, enc_hint: Option<BinaryEncoding>) -> Result<()> {
        (**self).binary(v, enc_hint)
    }
    fn array_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        (**self).array_begin(hint_size)
    }
    fn array_value_begin(&mut self) -> Result<()> {
        (**self).array_value_begin()
    }
    fn array_value_end(&mut self) -> Result<()> {
        (**self).array_value_end()
    }
    fn array_end(&mut self, size: usize) -> Result<()> {
        (**self).array_end(size)
    }
    fn map_begin(&mut self, hint_size: Option<usize>) -> Result<()> {
        (**self).map_begin(hint_size)
    }
    fn map_key_begin(&mut self) -> Result<()> {
        (**self).map_key_begin()
    }
    fn map_key_end(&mut self) -> Result<()> {
        (**self).map_key_end()
    }
    fn map_value_begin(&mut self) -> Result<()> {
        (**self).map_value_begin()
    }
    fn map_value_end(&mut self) -> Result<()> {
        (**self).map_value_end()
    }
    fn map_end(&mut self, size: usize) -> Result<()> {
        (**self).map_end(size)
    }
}
