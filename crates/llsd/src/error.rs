// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for LLSD parsing, serialization and coercion.
//!
//! Mirrors the five error kinds a caller can hit: malformed wire input,
//! a coercion between incompatible types, resource exhaustion, I/O
//! failure, and a user `EventSink` callback rejecting a value.

use std::fmt;

/// Errors returned by LLSD operations.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Malformed input
    // ========================================================================
    /// The leading signature bytes did not match the expected format.
    SignatureMismatch,
    /// The byte stream ended before a complete token could be read.
    UnexpectedEof { expected: &'static str },
    /// A binary-format type tag was not one of the known tag bytes.
    UnknownTag(u8),
    /// A Base16/Base64/Base85 payload contained invalid characters or length.
    InvalidEncoding { codec: &'static str },
    /// A UUID literal was not 16 raw bytes / a valid 36-character string.
    InvalidUuid,
    /// A date literal did not parse as ISO-8601.
    InvalidDate(String),
    /// An array or map was never closed before EOF.
    UnclosedContainer,
    /// A map literal bound the same key twice.
    DuplicateMapKey(String),
    /// A map key in the wire form was not a string.
    NonStringMapKey,
    /// The push-parser state machine saw a token that is not legal in the current state.
    UnexpectedToken {
        expected: &'static str,
        state: &'static str,
    },

    // ========================================================================
    // Type error in coercion
    // ========================================================================
    /// Caller asked for a variant that does not match the value's actual type
    /// and no container operation applies (e.g. `len()` on a scalar).
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The requested scalar-to-scalar coercion has no defined conversion.
    CoercionUnsupported {
        from: &'static str,
        to: &'static str,
    },

    // ========================================================================
    // Resource exhaustion
    // ========================================================================
    /// Allocation failed while building a value or output buffer.
    AllocationFailed,

    // ========================================================================
    // I/O error
    // ========================================================================
    /// The underlying `Read`/`Write` stream failed or returned short.
    Io(std::io::Error),

    // ========================================================================
    // Callback rejection
    // ========================================================================
    /// A user-supplied `EventSink` callback returned failure.
    CallbackRejected,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SignatureMismatch => write!(f, "signature mismatch"),
            Error::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {}", expected)
            }
            Error::UnknownTag(tag) => write!(f, "unknown binary tag byte {:#04x}", tag),
            Error::InvalidEncoding { codec } => write!(f, "invalid {} encoding", codec),
            Error::InvalidUuid => write!(f, "invalid uuid literal"),
            Error::InvalidDate(s) => write!(f, "invalid date literal: {}", s),
            Error::UnclosedContainer => write!(f, "array or map not closed before end of input"),
            Error::DuplicateMapKey(k) => write!(f, "duplicate map key: {}", k),
            Error::NonStringMapKey => write!(f, "map key is not a string"),
            Error::UnexpectedToken { expected, state } => {
                write!(f, "unexpected token in state {}, expected {}", state, expected)
            }
            Error::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            Error::CoercionUnsupported { from, to } => {
                write!(f, "no coercion from {} to {}", from, to)
            }
            Error::AllocationFailed => write!(f, "allocation failed"),
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::CallbackRejected => write!(f, "callback rejected value"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
