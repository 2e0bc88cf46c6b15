// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RMI Global Configuration - Single Source of Truth
//!
//! This module centralizes the marshaling constants and runtime settings.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: Compile-time constants (buffer sizes, wire order)
//! - **Level 2 (Dynamic)**: `RuntimeConfig` for settings swapped at runtime
//!
//! Settings are snapshotted by consumers when they are built (a
//! [`MethodBinding`](crate::method::MethodBinding) reads the error policy once
//! at construction), so swapping the config never changes a live binding.
//!
//! # Example
//!
//! ```
//! use rmi::config::{CodecSettings, ErrorPolicy, RuntimeConfig};
//!
//! let config = RuntimeConfig::new();
//! config.set_codec(CodecSettings {
//!     error_policy: ErrorPolicy::Lenient,
//! });
//! assert_eq!(config.codec().error_policy, ErrorPolicy::Lenient);
//! ```

use crate::stream::ByteOrder;
use arc_swap::ArcSwap;
use std::sync::{Arc, OnceLock};

// =======================================================================
// Buffer Sizes
// =======================================================================

/// Capacity substituted when a buffer is created with capacity 0.
pub const INITIAL_BUFFER_SIZE: usize = 512;

/// Upper bound for self-owned buffer growth (4 MiB).
///
/// Requests for a capacity at or above this value are refused.
pub const MAXIMUM_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Width of string and sequence length prefixes on the wire.
pub const LENGTH_PREFIX_SIZE: usize = 4;

// =======================================================================
// Wire Convention
// =======================================================================

/// Byte order of every argument and result payload.
pub const INVOCATION_BYTE_ORDER: ByteOrder = ByteOrder::BigEndian;

/// Environment variable read by [`RuntimeConfig::from_env`].
pub const ERROR_POLICY_ENV: &str = "RMI_ERROR_POLICY";

// =======================================================================
// Runtime Settings
// =======================================================================

/// How a stream reacts when a read runs past the end of its buffer.
///
/// Both policies record the failure in the buffer's sticky status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return the bounds error to the caller.
    #[default]
    Strict,
    /// Substitute a zeroed value and keep decoding.
    Lenient,
}

impl ErrorPolicy {
    /// Parse a policy name (`strict` or `lenient`, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" | "compat" => Some(Self::Lenient),
            _ => None,
        }
    }
}

/// Codec settings shared by streams and bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecSettings {
    pub error_policy: ErrorPolicy,
}

/// Shared runtime configuration (thread-safe, lock-free reads).
///
/// `ArcSwap` allows replacing the settings atomically without a lock;
/// cloning the config only increments the `Arc` counter.
#[derive(Clone)]
pub struct RuntimeConfig {
    codec: Arc<ArcSwap<CodecSettings>>,
}

static GLOBAL_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

impl RuntimeConfig {
    /// Create a config holding default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            codec: Arc::new(ArcSwap::from_pointee(CodecSettings::default())),
        }
    }

    /// Create a config from the process environment.
    ///
    /// Unknown values of `RMI_ERROR_POLICY` are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::new();
        if let Ok(raw) = std::env::var(ERROR_POLICY_ENV) {
            match ErrorPolicy::parse(&raw) {
                Some(error_policy) => config.set_codec(CodecSettings { error_policy }),
                None => log::warn!("ignoring {}={:?}: unknown policy", ERROR_POLICY_ENV, raw),
            }
        }
        config
    }

    /// Process-wide config, initialized from the environment on first use.
    pub fn global() -> &'static RuntimeConfig {
        GLOBAL_CONFIG.get_or_init(Self::from_env)
    }

    /// Current codec settings (atomic load).
    pub fn codec(&self) -> CodecSettings {
        **self.codec.load()
    }

    /// Replace the codec settings (atomic swap).
    pub fn set_codec(&self, settings: CodecSettings) {
        log::debug!("codec settings updated: {:?}", settings);
        self.codec.store(Arc::new(settings));
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
