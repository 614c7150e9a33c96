// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The XML wire format: `quick-xml`'s `Reader`/`Writer` give both
//! halves of the same event model this crate needs, unlike the
//! tree-only `roxmltree` the teacher depends on elsewhere — see
//! DESIGN.md for that substitution.

mod parser;
mod serializer;

pub use parser::{parse, parse_into};
pub use serializer::serialize;

/// Leading bytes every XML-format document starts with. The observed
/// original literal (`version"1.0"`, missing `=`) is a typo; this
/// crate only ever emits the well-formed declaration and accepts it
/// on read (spec.md §9).
pub const SIGNATURE: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
