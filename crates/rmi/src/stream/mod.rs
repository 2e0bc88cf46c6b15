// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-order aware binary stream codec.
//!
//! A stream is a short-lived cursor over a [`ByteBuffer`] with one byte order
//! fixed for its lifetime. Reading and writing are split in two types, the
//! same way a read cursor and a write cursor are kept apart:
//!
//! - [`StreamWriter`] appends encoded values to a buffer
//! - [`StreamReader`] decodes values from a buffer, tracking its own position
//!
//! # Wire format
//!
//! | Type | Encoding |
//! |------|----------|
//! | `bool`, `u8`, `i8` | 1 byte |
//! | 16/32/64-bit integers | 2/4/8 bytes, byte-order corrected |
//! | `f32`, `f64` | IEEE-754 bit pattern as `u32`/`u64` |
//! | `String` | `u32` length, then raw bytes (no order correction) |
//! | `Vec<T>` | `u32` count, then each element |
//! | `ByteArray` | `u32` length, then raw bytes |
//! | tuples | each element in order, no framing |
//!
//! A sequence count is checked against the bytes left before any element is
//! decoded, using [`Decode::MIN_ENCODED_LEN`] of the element type.
//!
//! # Example
//!
//! ```
//! use rmi::stream::{decode_value, encode_value, ByteOrder};
//!
//! let bytes = encode_value(&("TestString".to_string(), 2i32), ByteOrder::BigEndian).unwrap();
//! let (s, n): (String, i32) = decode_value(&bytes, ByteOrder::BigEndian).unwrap();
//! assert_eq!((s.as_str(), n), ("TestString", 2));
//! ```

mod codec;
mod reader;
mod writer;

pub use reader::StreamReader;
pub use writer::StreamWriter;

use crate::buffer::{ByteArray, ByteBuffer};
use crate::error::Result;

/// Byte order of multi-byte scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the host.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// The other byte order.
    pub const fn swapped(self) -> Self {
        match self {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
        }
    }
}

/// Types that can be written to a [`StreamWriter`].
pub trait Encode {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()>;
}

/// Types that can be read from a [`StreamReader`].
pub trait Decode: Sized {
    /// Fewest bytes any encoded value of this type occupies.
    ///
    /// Sequence decoding uses it to reject counts that cannot fit in the
    /// remaining bytes. Leave it at zero when a value may encode to nothing.
    const MIN_ENCODED_LEN: usize = 0;

    fn decode(reader: &mut StreamReader<'_>) -> Result<Self>;
}

/// Encode `value` into a fresh buffer.
pub fn encode_value<T: Encode + ?Sized>(value: &T, order: ByteOrder) -> Result<ByteArray> {
    let mut buf = ByteArray::new();
    StreamWriter::new(&mut buf, order).write(value)?;
    Ok(buf)
}

/// Decode one `T` from the start of `buffer` (strict policy).
pub fn decode_value<T: Decode>(buffer: &dyn ByteBuffer, order: ByteOrder) -> Result<T> {
    StreamReader::new(buffer, order).read()
}
