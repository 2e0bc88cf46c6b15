// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoding side of the stream codec.

use super::{ByteOrder, Encode};
use crate::buffer::ByteBuffer;
use crate::error::{BufferError, Result};

/// Generate write methods for fixed-width integers.
///
/// Each generated method converts the value to bytes in the stream's order
/// and appends them to the buffer.
macro_rules! impl_write_int {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> Result<()> {
            let bytes = match self.order {
                ByteOrder::LittleEndian => value.to_le_bytes(),
                ByteOrder::BigEndian => value.to_be_bytes(),
            };
            self.write_data(&bytes)
        }
    };
}

/// Write cursor appending to a byte buffer.
pub struct StreamWriter<'a> {
    buffer: &'a mut dyn ByteBuffer,
    order: ByteOrder,
}

impl<'a> StreamWriter<'a> {
    pub fn new(buffer: &'a mut dyn ByteBuffer, order: ByteOrder) -> Self {
        Self { buffer, order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Buffer being written to.
    pub fn buffer(&self) -> &dyn ByteBuffer {
        &*self.buffer
    }

    /// Append raw bytes without byte-order correction.
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.append(data)?;
        Ok(())
    }

    /// Encode `value` and return the writer for chaining.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        value.encode(self)?;
        Ok(self)
    }

    impl_write_int!(write_u8, u8);
    impl_write_int!(write_i8, i8);
    impl_write_int!(write_u16, u16);
    impl_write_int!(write_i16, i16);
    impl_write_int!(write_u32, u32);
    impl_write_int!(write_i32, i32);
    impl_write_int!(write_u64, u64);
    impl_write_int!(write_i64, i64);

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    /// Write a `u32` length or count prefix.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| BufferError::Capacity {
            requested: len,
            limit: u32::MAX as usize,
        })?;
        self.write_u32(len)
    }
}
