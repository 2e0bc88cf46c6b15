// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-capacity byte buffers (borrowed and inline storage).

use super::{impl_buffer_traits, BufferStatus, ByteBuffer};
use crate::config::INITIAL_BUFFER_SIZE;
use crate::error::{BufferError, BufferResult};

fn append_fixed(
    region: &mut [u8],
    len: &mut usize,
    status: &BufferStatus,
    bytes: &[u8],
) -> BufferResult<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    let end = len.saturating_add(bytes.len());
    if end > region.len() {
        return Err(status.record(BufferError::Capacity {
            requested: end,
            limit: region.len(),
        }));
    }
    region[*len..end].copy_from_slice(bytes);
    *len = end;
    Ok(())
}

fn resize_fixed(
    region: &mut [u8],
    len: &mut usize,
    status: &BufferStatus,
    count: usize,
) -> BufferResult<()> {
    if count == 0 {
        return Err(status.record(BufferError::InvalidCount));
    }
    if count > region.len() {
        return Err(status.record(BufferError::Capacity {
            requested: count,
            limit: region.len(),
        }));
    }
    if count > *len {
        region[*len..count].fill(0);
    }
    *len = count;
    Ok(())
}

#[derive(Debug)]
enum Storage<'a> {
    Borrowed(&'a mut [u8]),
    /// Substituted when the caller supplied no usable storage.
    Fallback(Box<[u8]>),
}

impl Storage<'_> {
    fn region(&self) -> &[u8] {
        match self {
            Storage::Borrowed(slice) => slice,
            Storage::Fallback(boxed) => boxed,
        }
    }

    fn region_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Borrowed(slice) => slice,
            Storage::Fallback(boxed) => boxed,
        }
    }
}

/// Byte buffer over caller-supplied storage.
///
/// The capacity is the length of the borrowed slice and never changes;
/// `reserve` is a no-op and appends that do not fit are dropped.
///
/// # Example
///
/// ```
/// use rmi::{ByteBuffer, FixedByteArray};
///
/// let mut storage = [0u8; 4];
/// let mut buf = FixedByteArray::new(&mut storage);
/// buf.append(&[1, 2, 3]).unwrap();
/// assert!(buf.append(&[4, 5]).is_err());
/// assert_eq!(buf.as_slice(), &[1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct FixedByteArray<'a> {
    storage: Storage<'a>,
    len: usize,
    status: BufferStatus,
    scratch: u8,
}

impl<'a> FixedByteArray<'a> {
    /// Buffer using the whole of `storage` as its capacity.
    ///
    /// Empty storage records an init error and falls back to a private
    /// region of the default size (still fixed).
    pub fn new(storage: &'a mut [u8]) -> Self {
        let capacity = storage.len();
        Self::with_capacity(storage, capacity)
    }

    /// Buffer using the first `capacity` bytes of `storage`.
    ///
    /// A capacity larger than the storage is clamped to the storage length
    /// and recorded as an init error.
    pub fn with_capacity(storage: &'a mut [u8], capacity: usize) -> Self {
        if capacity == 0 || storage.is_empty() {
            let error = BufferError::Init {
                requested: capacity,
                fallback: INITIAL_BUFFER_SIZE,
            };
            return Self {
                storage: Storage::Fallback(vec![0u8; INITIAL_BUFFER_SIZE].into_boxed_slice()),
                len: 0,
                status: BufferStatus::with_init_error(error),
                scratch: 0,
            };
        }

        let status = if capacity > storage.len() {
            BufferStatus::with_init_error(BufferError::Init {
                requested: capacity,
                fallback: storage.len(),
            })
        } else {
            BufferStatus::default()
        };
        let usable = capacity.min(storage.len());
        let (region, _) = storage.split_at_mut(usable);

        Self {
            storage: Storage::Borrowed(region),
            len: 0,
            status,
            scratch: 0,
        }
    }

    /// Whether the buffer writes into caller storage (not the fallback).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }
}

impl ByteBuffer for FixedByteArray<'_> {
    fn as_slice(&self) -> &[u8] {
        &self.storage.region()[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len;
        &mut self.storage.region_mut()[..len]
    }

    fn capacity(&self) -> usize {
        self.storage.region().len()
    }

    fn is_growable(&self) -> bool {
        false
    }

    fn status(&self) -> &BufferStatus {
        &self.status
    }

    fn reserve(&mut self, _new_capacity: usize) -> BufferResult<()> {
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> BufferResult<()> {
        append_fixed(self.storage.region_mut(), &mut self.len, &self.status, bytes)
    }

    fn resize(&mut self, count: usize) -> BufferResult<()> {
        resize_fixed(self.storage.region_mut(), &mut self.len, &self.status, count)
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

impl_buffer_traits!(['a,] FixedByteArray<'a>);

/// Byte buffer with inline storage of `N` bytes.
///
/// Useful when the payload size is known up front and no heap allocation
/// is wanted. `N == 0` records an init error and leaves a zero-capacity
/// buffer.
#[derive(Debug)]
pub struct StaticByteArray<const N: usize> {
    data: [u8; N],
    len: usize,
    status: BufferStatus,
    scratch: u8,
}

impl<const N: usize> StaticByteArray<N> {
    pub fn new() -> Self {
        let status = if N == 0 {
            BufferStatus::with_init_error(BufferError::Init {
                requested: 0,
                fallback: 0,
            })
        } else {
            BufferStatus::default()
        };
        Self {
            data: [0u8; N],
            len: 0,
            status,
            scratch: 0,
        }
    }
}

impl<const N: usize> Default for StaticByteArray<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteBuffer for StaticByteArray<N> {
    fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    fn capacity(&self) -> usize {
        N
    }

    fn is_growable(&self) -> bool {
        false
    }

    fn status(&self) -> &BufferStatus {
        &self.status
    }

    fn reserve(&mut self, _new_capacity: usize) -> BufferResult<()> {
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> BufferResult<()> {
        append_fixed(&mut self.data, &mut self.len, &self.status, bytes)
    }

    fn resize(&mut self, count: usize) -> BufferResult<()> {
        resize_fixed(&mut self.data, &mut self.len, &self.status, count)
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

impl_buffer_traits!([const N: usize,] StaticByteArray<N>);
