// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for buffer, codec and invocation operations.
//!
//! Buffer failures are split from the crate-level [`Error`] so they can be
//! stored in a buffer's sticky status (see [`crate::buffer::BufferStatus`]).
//! A decode that runs out of bytes is deliberately not a separate kind: it is
//! reported as the [`BufferError::Bounds`] raised by the underlying read.

use std::fmt;

/// Result type for buffer operations.
pub type BufferResult<T> = core::result::Result<T, BufferError>;

/// Failure kinds recorded by a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Buffer was constructed with an invalid capacity or empty external
    /// storage; a fallback of `fallback` bytes is in use.
    Init { requested: usize, fallback: usize },

    /// An access addressed bytes outside the logical size.
    Bounds {
        position: usize,
        len: usize,
        size: usize,
    },

    /// A growth or append would exceed `limit` bytes, or targets storage that
    /// cannot grow.
    Capacity { requested: usize, limit: usize },

    /// `resize(0)` is rejected.
    InvalidCount,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init {
                requested,
                fallback,
            } => write!(
                f,
                "invalid initial capacity {} (using {} bytes instead)",
                requested, fallback
            ),
            Self::Bounds {
                position,
                len,
                size,
            } => write!(
                f,
                "access of {} byte(s) at position {} is out of bounds (size {})",
                len, position, size
            ),
            Self::Capacity { requested, limit } => {
                write!(f, "capacity {} exceeds limit {}", requested, limit)
            }
            Self::InvalidCount => write!(f, "invalid element count 0"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Errors returned by codec and invocation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Underlying buffer operation failed.
    Buffer(BufferError),

    /// A decoded string was not valid UTF-8.
    InvalidUtf8 { offset: usize },

    /// A binding was invoked against a target of another concrete type.
    TargetMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The target does not support the requested operation.
    Unsupported(&'static str),

    /// No binding is registered under this name.
    MethodNotFound(String),

    /// A binding is already registered under this name.
    DuplicateMethod(String),

    /// Key is absent from an argument pack.
    MissingArgument(String),

    /// Value stored under `key` does not parse as the requested type.
    InvalidArgument { key: String, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(e) => write!(f, "buffer error: {}", e),
            Self::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 in string at offset {}", offset)
            }
            Self::TargetMismatch { expected, actual } => write!(
                f,
                "target mismatch: binding expects {}, got {}",
                expected, actual
            ),
            Self::Unsupported(what) => write!(f, "unsupported operation: {}", what),
            Self::MethodNotFound(name) => write!(f, "method not found: {}", name),
            Self::DuplicateMethod(name) => write!(f, "method already registered: {}", name),
            Self::MissingArgument(key) => write!(f, "missing argument: {}", key),
            Self::InvalidArgument { key, value } => {
                write!(f, "invalid argument {}: cannot parse {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Buffer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for Error {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}

/// Convenient alias for results using the crate `Error` type.
pub type Result<T> = core::result::Result<T, Error>;
