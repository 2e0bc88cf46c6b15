// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Self-owned, growable byte buffer.

use super::{impl_buffer_traits, BufferStatus, ByteBuffer};
use crate::config::{INITIAL_BUFFER_SIZE, MAXIMUM_BUFFER_SIZE};
use crate::error::{BufferError, BufferResult};

/// Growable byte buffer backed by a `Vec<u8>`.
///
/// Capacity is tracked explicitly so that growth is deterministic and can be
/// refused at [`MAXIMUM_BUFFER_SIZE`].
///
/// # Example
///
/// ```
/// use rmi::{ByteArray, ByteBuffer};
///
/// let mut buf = ByteArray::with_capacity(4);
/// buf.append(b"hello").unwrap();
/// assert_eq!(buf.as_slice(), b"hello");
/// assert!(buf.capacity() >= 5);
/// ```
#[derive(Debug)]
pub struct ByteArray {
    data: Vec<u8>,
    capacity: usize,
    status: BufferStatus,
    scratch: u8,
}

impl ByteArray {
    /// Empty buffer with the default capacity (512 bytes).
    pub fn new() -> Self {
        Self::allocate(INITIAL_BUFFER_SIZE, BufferStatus::default())
    }

    /// Empty buffer with `capacity` bytes reserved.
    ///
    /// An invalid capacity (zero, or at/above the maximum) does not fail:
    /// the default capacity is used and an init error is recorded.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buf) => buf,
            Err(error) => Self::allocate(INITIAL_BUFFER_SIZE, BufferStatus::with_init_error(error)),
        }
    }

    /// Strict variant of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> BufferResult<Self> {
        if capacity == 0 {
            return Err(BufferError::Init {
                requested: 0,
                fallback: INITIAL_BUFFER_SIZE,
            });
        }
        if capacity >= MAXIMUM_BUFFER_SIZE {
            return Err(BufferError::Capacity {
                requested: capacity,
                limit: MAXIMUM_BUFFER_SIZE,
            });
        }
        Ok(Self::allocate(capacity, BufferStatus::default()))
    }

    fn allocate(capacity: usize, status: BufferStatus) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            status,
            scratch: 0,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Capacity to grow to when `needed` bytes must fit.
    ///
    /// Doubles the current capacity, clamped below the maximum.
    fn growth_target(&self, needed: usize) -> usize {
        let doubled = self.capacity.saturating_mul(2).min(MAXIMUM_BUFFER_SIZE - 1);
        needed.max(doubled)
    }
}

impl ByteBuffer for ByteArray {
    fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_growable(&self) -> bool {
        true
    }

    fn status(&self) -> &BufferStatus {
        &self.status
    }

    fn reserve(&mut self, new_capacity: usize) -> BufferResult<()> {
        if new_capacity == 0 || new_capacity <= self.capacity {
            return Ok(());
        }
        if new_capacity >= MAXIMUM_BUFFER_SIZE {
            return Err(self.status.record(BufferError::Capacity {
                requested: new_capacity,
                limit: MAXIMUM_BUFFER_SIZE,
            }));
        }
        self.data.reserve_exact(new_capacity - self.data.len());
        self.capacity = new_capacity;
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> BufferResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let needed = self.data.len().saturating_add(bytes.len());
        if needed > self.capacity {
            if needed >= MAXIMUM_BUFFER_SIZE {
                return Err(self.status.record(BufferError::Capacity {
                    requested: needed,
                    limit: MAXIMUM_BUFFER_SIZE,
                }));
            }
            self.reserve(self.growth_target(needed))?;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn resize(&mut self, count: usize) -> BufferResult<()> {
        if count == 0 {
            return Err(self.status.record(BufferError::InvalidCount));
        }
        if count > self.data.len() {
            self.reserve(count)?;
        }
        self.data.resize(count, 0);
        Ok(())
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl_buffer_traits!([] ByteArray);

impl Default for ByteArray {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies content and capacity; the copy starts with a clean status.
impl Clone for ByteArray {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
            status: BufferStatus::default(),
            scratch: 0,
        }
    }
}

/// Adopts the vector and its allocation.
///
/// A vector at or above [`MAXIMUM_BUFFER_SIZE`] is kept whole rather than
/// truncated: the buffer records a capacity init error and refuses any
/// further growth.
impl From<Vec<u8>> for ByteArray {
    fn from(data: Vec<u8>) -> Self {
        let len = data.len();
        let status = if len >= MAXIMUM_BUFFER_SIZE {
            BufferStatus::with_init_error(BufferError::Capacity {
                requested: len,
                limit: MAXIMUM_BUFFER_SIZE,
            })
        } else {
            BufferStatus::default()
        };
        let capacity = data.capacity().min(MAXIMUM_BUFFER_SIZE - 1).max(len);
        Self {
            data,
            capacity,
            status,
            scratch: 0,
        }
    }
}

impl From<&[u8]> for ByteArray {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl<'a> IntoIterator for &'a ByteArray {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_substitutes_default() {
        let buf = ByteArray::with_capacity(0);
        assert_eq!(buf.capacity(), INITIAL_BUFFER_SIZE);
        assert!(buf.is_empty());
        assert!(buf.status().init_error().is_some());

        assert!(ByteArray::try_with_capacity(0).is_err());
        assert!(ByteArray::try_with_capacity(MAXIMUM_BUFFER_SIZE).is_err());
    }

    #[test]
    fn test_fallback_buffer_is_usable() {
        let mut buf = ByteArray::with_capacity(0);
        buf.append(&[1, 2, 3]).expect("fallback buffer accepts data");
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_growth_preserves_data() {
        let mut buf = ByteArray::with_capacity(4);
        buf.append(&[1, 2, 3]).expect("fits");
        buf.append(&[4, 5, 6, 7, 8, 9]).expect("grows");

        assert!(buf.capacity() >= 9);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(buf.is_operation_valid());
    }

    #[test]
    fn test_reserve_rules() {
        let mut buf = ByteArray::with_capacity(16);
        buf.reserve(0).expect("zero is a no-op");
        buf.reserve(8).expect("already sufficient");
        assert_eq!(buf.capacity(), 16);

        buf.reserve(100).expect("grows");
        assert_eq!(buf.capacity(), 100);

        let err = buf.reserve(MAXIMUM_BUFFER_SIZE).unwrap_err();
        assert_eq!(
            err,
            BufferError::Capacity {
                requested: MAXIMUM_BUFFER_SIZE,
                limit: MAXIMUM_BUFFER_SIZE
            }
        );
        assert_eq!(buf.capacity(), 100);
        assert!(!buf.is_operation_valid());
    }

    #[test]
    fn test_append_beyond_maximum_is_dropped() {
        let mut buf = ByteArray::from(vec![7u8; 10]);
        let big = vec![0u8; MAXIMUM_BUFFER_SIZE];
        assert!(buf.append(&big).is_err());
        assert_eq!(buf.len(), 10);
        assert!(buf.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_from_vec_at_maximum_records_capacity_error() {
        let mut buf = ByteArray::from(vec![3u8; MAXIMUM_BUFFER_SIZE]);
        assert_eq!(buf.len(), MAXIMUM_BUFFER_SIZE);
        assert_eq!(
            buf.status().init_error(),
            Some(BufferError::Capacity {
                requested: MAXIMUM_BUFFER_SIZE,
                limit: MAXIMUM_BUFFER_SIZE
            })
        );
        assert!(!buf.is_operation_valid());
        assert!(buf.push(1).is_err());
        assert_eq!(buf.len(), MAXIMUM_BUFFER_SIZE);
        assert_eq!(buf.back(), Ok(3));
    }

    #[test]
    fn test_from_vec_keeps_allocation_below_maximum() {
        let mut data = Vec::with_capacity(64);
        data.extend_from_slice(&[1u8, 2, 3]);
        let mut buf = ByteArray::from(data);
        assert!(buf.capacity() >= 64);
        assert!(buf.status().init_error().is_none());

        buf.append(&[0u8; 100]).expect("grows past the adopted allocation");
        assert_eq!(buf.len(), 103);
        assert!(buf.is_operation_valid());
    }

    #[test]
    fn test_append_empty_is_noop() {
        let mut buf = ByteArray::new();
        buf.append(&[]).expect("no-op");
        assert!(buf.is_empty());
        assert!(buf.is_operation_valid());
    }

    #[test]
    fn test_resize_truncates_and_zero_extends() {
        let mut buf = ByteArray::from(vec![1u8, 2, 3, 4]);
        buf.resize(2).expect("truncate");
        assert_eq!(buf.as_slice(), &[1, 2]);

        buf.resize(5).expect("extend");
        assert_eq!(buf.as_slice(), &[1, 2, 0, 0, 0]);

        assert_eq!(buf.resize(0), Err(BufferError::InvalidCount));
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_clone_has_clean_status() {
        let buf = ByteArray::from(vec![1u8, 2]);
        let _ = buf.get(9);
        let copy = buf.clone();
        assert_eq!(copy, buf);
        assert_eq!(copy.capacity(), buf.capacity());
        assert!(copy.is_operation_valid());
        assert!(!buf.is_operation_valid());
    }

    #[test]
    fn test_prealloc_and_push() {
        let mut buf = ByteArray::with_capacity(2);
        buf.push(1).expect("fits");
        buf.prealloc(10).expect("grows");
        assert!(buf.capacity() >= 11);
        buf.push(2).expect("fits");
        assert_eq!(buf.front(), Ok(1));
        assert_eq!(buf.back(), Ok(2));
    }
}
