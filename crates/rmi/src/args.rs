// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String-keyed argument bag for object factories.
//!
//! Factories receive free-form construction parameters as key/value strings
//! and parse them on demand with [`ArgumentPack::read_as`]. The bag is not
//! used on the invocation path.
//!
//! # Example
//!
//! ```
//! use rmi::ArgumentPack;
//!
//! let args: ArgumentPack = [("port", "7400"), ("name", "svc")].into_iter().collect();
//! assert_eq!(args.read_as::<u16>("port").unwrap(), 7400);
//! assert!(args.read_as::<u16>("name").is_err());
//! ```

use crate::config::LENGTH_PREFIX_SIZE;
use crate::error::{Error, Result};
use crate::stream::{Decode, Encode, StreamReader, StreamWriter};
use std::collections::btree_map::{self, BTreeMap};
use std::str::FromStr;

/// Key/value pairs with typed parsing.
///
/// Iteration is in key order, so the wire form is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentPack {
    args: BTreeMap<String, String>,
}

impl ArgumentPack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` with `value`. If the key is already present the existing
    /// value is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.args.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Parse the value stored under `key`.
    ///
    /// The stored value is parsed as-is first. If that fails, surrounding
    /// whitespace is trimmed and parsing is retried, so `" 42 "` reads as a
    /// number while a `String` comes back unchanged.
    pub fn read_as<T: FromStr>(&self, key: &str) -> Result<T> {
        let value = self
            .args
            .get(key)
            .ok_or_else(|| Error::MissingArgument(key.to_string()))?;
        value
            .parse()
            .or_else(|_| value.trim().parse())
            .map_err(|_| Error::InvalidArgument {
                key: key.to_string(),
                value: value.clone(),
            })
    }

    /// Raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.args.iter(),
        }
    }
}

/// Iterator over `(key, value)` pairs of an [`ArgumentPack`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a ArgumentPack {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArgumentPack {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pack = Self::new();
        for (key, value) in iter {
            pack.insert(key, value);
        }
        pack
    }
}

/// `u32` count, then each key and value as strings.
impl Encode for ArgumentPack {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        writer.write_len(self.args.len())?;
        for (key, value) in &self.args {
            key.encode(writer)?;
            value.encode(writer)?;
        }
        Ok(())
    }
}

impl Decode for ArgumentPack {
    const MIN_ENCODED_LEN: usize = LENGTH_PREFIX_SIZE;

    fn decode(reader: &mut StreamReader<'_>) -> Result<Self> {
        let count = reader.read_count(2 * LENGTH_PREFIX_SIZE)?;
        let mut pack = Self::new();
        for _ in 0..count {
            let key: String = reader.read()?;
            let value: String = reader.read()?;
            if reader.is_overrun() {
                break;
            }
            pack.insert(key, value);
        }
        Ok(pack)
    }
}
