// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoding side of the stream codec.

use super::{ByteOrder, Decode};
use crate::buffer::{ByteArray, ByteBuffer};
use crate::config::{ErrorPolicy, MAXIMUM_BUFFER_SIZE};
use crate::error::{BufferError, Result};

/// Generate read methods for fixed-width integers.
///
/// Each generated method:
/// 1. Reads N bytes at the cursor (zeroed on failure)
/// 2. Advances the cursor by N
/// 3. Converts with the stream's byte order
macro_rules! impl_read_int {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self) -> Result<$type> {
            let bytes = self.read_array()?;
            Ok(match self.order {
                ByteOrder::LittleEndian => <$type>::from_le_bytes(bytes),
                ByteOrder::BigEndian => <$type>::from_be_bytes(bytes),
            })
        }
    };
}

/// Read cursor over a byte buffer.
///
/// Under [`ErrorPolicy::Strict`] a read past the end returns the buffer's
/// bounds error. Under [`ErrorPolicy::Lenient`] it yields a zeroed value and
/// decoding continues; the failure is still recorded in the buffer status.
/// The cursor advances by the requested width either way.
pub struct StreamReader<'a> {
    buffer: &'a dyn ByteBuffer,
    order: ByteOrder,
    position: usize,
    policy: ErrorPolicy,
}

impl<'a> StreamReader<'a> {
    pub fn new(buffer: &'a dyn ByteBuffer, order: ByteOrder) -> Self {
        Self {
            buffer,
            order,
            position: 0,
            policy: ErrorPolicy::Strict,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Buffer being read.
    pub fn buffer(&self) -> &'a dyn ByteBuffer {
        self.buffer
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Whether the cursor has been moved past the end of the buffer.
    pub fn is_overrun(&self) -> bool {
        self.position > self.buffer.len()
    }

    /// Apply the policy to a failed read.
    fn fail(&self, error: BufferError) -> Result<()> {
        match self.policy {
            ErrorPolicy::Strict => Err(error.into()),
            ErrorPolicy::Lenient => Ok(()),
        }
    }

    /// Read `out.len()` raw bytes without byte-order correction.
    pub fn read_data(&mut self, out: &mut [u8]) -> Result<()> {
        let result = self.buffer.read(self.position, out);
        self.position = self.position.saturating_add(out.len());
        match result {
            Ok(()) => Ok(()),
            Err(error) => self.fail(error),
        }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.read_data(&mut bytes)?;
        Ok(bytes)
    }

    /// Read `len` raw bytes.
    ///
    /// The length is checked against the remaining bytes before allocating,
    /// so a corrupt length prefix cannot trigger a huge allocation. Under the
    /// lenient policy an overlong request yields an empty vector.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if len > self.remaining() {
            let error = self.buffer.status().record(BufferError::Bounds {
                position: self.position,
                len,
                size: self.buffer.len(),
            });
            self.position = self.position.saturating_add(len);
            self.fail(error)?;
            return Ok(Vec::new());
        }
        let mut out = vec![0u8; len];
        self.read_data(&mut out)?;
        Ok(out)
    }

    /// Everything from the cursor to the end of the buffer.
    pub fn read_remaining(&mut self) -> Result<ByteArray> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(ByteArray::new());
        }
        let data = self.read_bytes(remaining)?;
        Ok(ByteArray::from(data))
    }

    /// Advance the cursor without reading. Not bounds checked; a later read
    /// reports the overrun.
    pub fn skip(&mut self, len: usize) {
        self.position = self.position.saturating_add(len);
    }

    /// Decode a value.
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    impl_read_int!(read_u8, u8);
    impl_read_int!(read_i8, i8);
    impl_read_int!(read_u16, u16);
    impl_read_int!(read_i16, i16);
    impl_read_int!(read_u32, u32);
    impl_read_int!(read_i32, i32);
    impl_read_int!(read_u64, u64);
    impl_read_int!(read_i64, i64);

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a `u32` length or count prefix.
    pub fn read_len(&mut self) -> Result<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Read a `u32` element count and check it against the bytes left.
    ///
    /// `min_width` is the smallest encoded size of one element. A count whose
    /// elements cannot fit in the remaining bytes is a bounds failure. Elements
    /// of zero width are capped at `MAXIMUM_BUFFER_SIZE`. Under the lenient
    /// policy the count is clamped to the limit instead.
    pub fn read_count(&mut self, min_width: usize) -> Result<usize> {
        let count = self.read_len()?;
        let (limit, error) = match min_width {
            0 => (
                MAXIMUM_BUFFER_SIZE,
                BufferError::Capacity {
                    requested: count,
                    limit: MAXIMUM_BUFFER_SIZE,
                },
            ),
            width => (
                self.remaining() / width,
                BufferError::Bounds {
                    position: self.position,
                    len: count.saturating_mul(width),
                    size: self.buffer.len(),
                },
            ),
        };
        if count <= limit {
            return Ok(count);
        }
        let error = self.buffer.status().record(error);
        self.fail(error)?;
        Ok(limit)
    }
}
