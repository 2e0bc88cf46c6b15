// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # RMI - Remote Method Invocation marshaling core
//!
//! Turns a method call on a concrete Rust type into bytes and back: argument
//! payloads are decoded into the method's parameters, the method runs on the
//! target, and the return value is encoded into a result payload.
//!
//! Transport, object lookup and lifecycle are out of scope; a caller hands
//! this crate a target and an argument payload and gets result bytes back.
//!
//! ## Quick Start
//!
//! ```rust
//! use rmi::stream::{decode_value, encode_value, ByteOrder};
//! use rmi::{ByteArray, MethodBinding, MethodTable, RemoteObject, Result};
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! impl Greeter {
//!     fn greet(&mut self, name: String, times: u8) -> String {
//!         format!("{} {}", self.greeting, name).repeat(times as usize)
//!     }
//! }
//!
//! impl RemoteObject for Greeter {}
//!
//! fn main() -> Result<()> {
//!     let table: MethodTable<dyn RemoteObject> = MethodTable::new();
//!     table.register("greet", MethodBinding::new(Greeter::greet))?;
//!
//!     let mut target = Greeter { greeting: "hello".into() };
//!     let args = encode_value(&("world".to_string(), 1u8), ByteOrder::BigEndian)?;
//!     let result: ByteArray = table.invoke("greet", &mut target, &args)?;
//!
//!     let reply: String = decode_value(&result, ByteOrder::BigEndian)?;
//!     assert_eq!(reply, "hello world");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                       Method Binding Layer                          |
//! |   MethodTable -> MethodBinding (decode args, call, encode result)   |
//! +---------------------------------------------------------------------+
//! |                        Stream Codec Layer                           |
//! |   StreamReader / StreamWriter | Encode / Decode | ByteOrder         |
//! +---------------------------------------------------------------------+
//! |                           Buffer Layer                              |
//! |   ByteArray (owned) | FixedByteArray (borrowed) | StaticByteArray   |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ByteArray`] | Owned, growable, bounds-checked byte buffer |
//! | [`FixedByteArray`] | Fixed-capacity buffer over caller storage |
//! | [`StreamReader`] / [`StreamWriter`] | Byte-order aware cursors |
//! | [`MethodBinding`] | One method bound to the byte-level invoke contract |
//! | [`MethodTable`] | Name to binding dispatch table |
//! | [`RemoteObject`] | Capability implemented by invocation targets |
//!
//! ## Modules Overview
//!
//! - [`buffer`] - Byte buffers and the sticky error status
//! - [`stream`] - Binary codec and wire format
//! - [`method`] - Method bindings and dispatch
//! - [`config`] - Constants and runtime settings

/// Key/value argument bag used by object factories.
pub mod args;
/// Bounds-checked byte buffers (owned, borrowed and inline storage).
pub mod buffer;
/// Global configuration (buffer limits, wire order, runtime error policy).
pub mod config;
/// Error types shared by buffers, codec and bindings.
pub mod error;
/// Generic method bindings and dispatch tables.
pub mod method;
/// Remote object capability.
pub mod remote;
/// Byte-order aware binary stream codec.
pub mod stream;

pub use args::ArgumentPack;
pub use buffer::{BufferStatus, ByteArray, ByteBuffer, FixedByteArray, StaticByteArray};
pub use config::{CodecSettings, ErrorPolicy, RuntimeConfig};
pub use error::{BufferError, BufferResult, Error, Result};
pub use method::{
    Argument, ByRef, Invokable, Lend, Method, MethodBinding, MethodTable, RemoteMethod,
};
pub use remote::{AsAny, RemoteObject};
pub use stream::{ByteOrder, Decode, Encode, StreamReader, StreamWriter};

/// RMI crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
