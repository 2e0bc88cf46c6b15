// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked byte buffers.
//!
//! Three storage flavours share the [`ByteBuffer`] interface:
//!
//! | Type | Storage | Growable |
//! |------|---------|----------|
//! | [`ByteArray`] | owned `Vec<u8>` | yes, up to [`MAXIMUM_BUFFER_SIZE`](crate::config::MAXIMUM_BUFFER_SIZE) |
//! | [`FixedByteArray`] | borrowed `&mut [u8]` | no |
//! | [`StaticByteArray`] | inline `[u8; N]` | no |
//!
//! # Error model
//!
//! Every fallible operation returns a [`BufferResult`] and also records the
//! failure in the buffer's [`BufferStatus`]. The recorded failure is sticky:
//! it survives later successful operations until it is inspected with
//! [`ByteBuffer::is_operation_valid`] or [`ByteBuffer::take_error`]. Callers
//! that ignore return values (the lenient stream policy does this) can still
//! find out afterwards that something went wrong.
//!
//! Failed operations never touch memory outside the logical size: appends
//! that do not fit are dropped whole, out-of-range reads zero the output.

mod fixed;
mod owned;

pub use fixed::{FixedByteArray, StaticByteArray};
pub use owned::ByteArray;

use crate::error::{BufferError, BufferResult};
use std::cell::Cell;

/// Sticky failure indicator attached to every buffer.
///
/// Interior mutability lets `&self` reads record failures; it also makes
/// buffers `!Sync`, matching their single-owner contract.
#[derive(Debug, Default)]
pub struct BufferStatus {
    init: Option<BufferError>,
    last: Cell<Option<BufferError>>,
}

impl BufferStatus {
    pub(crate) fn with_init_error(error: BufferError) -> Self {
        log::warn!("[ByteArray] {}", error);
        Self {
            init: Some(error),
            last: Cell::new(None),
        }
    }

    /// Record a failure and hand it back for propagation.
    pub(crate) fn record(&self, error: BufferError) -> BufferError {
        log::warn!("[ByteArray] {}", error);
        self.last.set(Some(error));
        error
    }

    /// Error recorded at construction, if any. Never cleared.
    pub fn init_error(&self) -> Option<BufferError> {
        self.init
    }

    /// Most recent operation failure, without clearing it.
    pub fn last_error(&self) -> Option<BufferError> {
        self.last.get()
    }

    /// Most recent operation failure, clearing it.
    pub fn take_error(&self) -> Option<BufferError> {
        self.last.take()
    }

    /// `false` if the buffer is degraded or an operation failed since the
    /// last check. Clears the operation flag (not the init error).
    pub fn is_operation_valid(&self) -> bool {
        if self.init.is_some() {
            return false;
        }
        self.last.take().is_none()
    }
}

/// Common interface of all byte buffers.
///
/// The trait is object safe; streams operate on `dyn ByteBuffer`.
pub trait ByteBuffer {
    /// Logical content (`len()` bytes).
    fn as_slice(&self) -> &[u8];

    /// Mutable logical content.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Number of bytes the buffer can hold without growing.
    fn capacity(&self) -> usize;

    /// Whether the storage can be reallocated.
    fn is_growable(&self) -> bool;

    /// Sticky failure indicator.
    fn status(&self) -> &BufferStatus;

    /// Grow storage to at least `new_capacity` bytes.
    ///
    /// No-op for zero, for already sufficient capacity and for storage that
    /// cannot grow. Refuses capacities at or above the maximum buffer size.
    fn reserve(&mut self, new_capacity: usize) -> BufferResult<()>;

    /// Append `bytes` at the end.
    ///
    /// Empty input is a no-op. When the bytes do not fit, nothing is written
    /// and a capacity error is recorded.
    fn append(&mut self, bytes: &[u8]) -> BufferResult<()>;

    /// Truncate to `count` bytes or zero-extend up to `count` bytes.
    fn resize(&mut self, count: usize) -> BufferResult<()>;

    /// Drop all content, keeping the capacity.
    fn clear(&mut self);

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes available for reading (same as `len()`).
    fn bytes_available(&self) -> usize {
        self.len()
    }

    /// Make room for `additional` more bytes.
    fn prealloc(&mut self, additional: usize) -> BufferResult<()> {
        self.reserve(self.len().saturating_add(additional))
    }

    /// Append a single byte.
    fn push(&mut self, byte: u8) -> BufferResult<()> {
        self.append(&[byte])
    }

    /// Append `len` bytes of `source` starting at `offset`.
    fn append_from(&mut self, source: &dyn ByteBuffer, len: usize, offset: usize) -> BufferResult<()> {
        if source.is_empty() || len == 0 {
            return Ok(());
        }
        let data = source.as_slice();
        match offset.checked_add(len) {
            Some(end) if end <= data.len() => self.append(&data[offset..end]),
            _ => Err(self.status().record(BufferError::Bounds {
                position: offset,
                len,
                size: data.len(),
            })),
        }
    }

    /// Copy `out.len()` bytes starting at `position` into `out`.
    ///
    /// If any requested byte lies outside the logical size nothing is
    /// copied, `out` is zeroed and a bounds error is recorded.
    fn read(&self, position: usize, out: &mut [u8]) -> BufferResult<()> {
        if out.is_empty() {
            return Ok(());
        }
        let data = self.as_slice();
        match position.checked_add(out.len()) {
            Some(end) if end <= data.len() => {
                out.copy_from_slice(&data[position..end]);
                Ok(())
            }
            _ => {
                out.fill(0);
                Err(self.status().record(BufferError::Bounds {
                    position,
                    len: out.len(),
                    size: data.len(),
                }))
            }
        }
    }

    /// Byte at `position`.
    fn get(&self, position: usize) -> BufferResult<u8> {
        self.as_slice().get(position).copied().ok_or_else(|| {
            self.status().record(BufferError::Bounds {
                position,
                len: 1,
                size: self.len(),
            })
        })
    }

    /// Byte at `position`, or `0` (failure recorded) when out of range.
    fn at(&self, position: usize) -> u8 {
        self.get(position).unwrap_or(0)
    }

    /// First byte.
    fn front(&self) -> BufferResult<u8> {
        self.get(0)
    }

    /// Last byte.
    fn back(&self) -> BufferResult<u8> {
        match self.len() {
            0 => self.get(0),
            n => self.get(n - 1),
        }
    }

    fn last_error(&self) -> Option<BufferError> {
        self.status().last_error()
    }

    fn take_error(&self) -> Option<BufferError> {
        self.status().take_error()
    }

    /// See [`BufferStatus::is_operation_valid`].
    fn is_operation_valid(&self) -> bool {
        self.status().is_operation_valid()
    }
}

const ZERO: u8 = 0;

/// Indexing, equality and slice conversions shared by the concrete buffers.
///
/// Out-of-range indexing records a bounds error and yields a zero sentinel
/// (a scratch byte for `IndexMut`) instead of panicking.
macro_rules! impl_buffer_traits {
    ([$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> std::ops::Index<usize> for $ty {
            type Output = u8;

            fn index(&self, position: usize) -> &u8 {
                match self.as_slice().get(position) {
                    Some(byte) => byte,
                    None => {
                        self.status().record($crate::error::BufferError::Bounds {
                            position,
                            len: 1,
                            size: self.len(),
                        });
                        &$crate::buffer::ZERO
                    }
                }
            }
        }

        impl<$($gen)*> std::ops::IndexMut<usize> for $ty {
            fn index_mut(&mut self, position: usize) -> &mut u8 {
                let size = self.len();
                if position < size {
                    return &mut self.as_mut_slice()[position];
                }
                self.status.record($crate::error::BufferError::Bounds {
                    position,
                    len: 1,
                    size,
                });
                self.scratch = 0;
                &mut self.scratch
            }
        }

        impl<$($gen)* B: $crate::buffer::ByteBuffer + ?Sized> PartialEq<B> for $ty {
            fn eq(&self, other: &B) -> bool {
                self.as_slice() == other.as_slice()
            }
        }

        impl<$($gen)*> PartialEq<[u8]> for $ty {
            fn eq(&self, other: &[u8]) -> bool {
                self.as_slice() == other
            }
        }

        impl<$($gen)*> Eq for $ty {}

        impl<$($gen)*> AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                self.as_slice()
            }
        }
    };
}

pub(crate) use impl_buffer_traits;
