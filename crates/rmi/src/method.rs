// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic method bindings.
//!
//! A [`MethodBinding`] couples one method of a concrete target type to the
//! uniform byte-level contract [`Invokable`]:
//!
//! 1. Decode the argument payload into the method's parameter tuple
//!    (big-endian, no envelope, parameters in declaration order)
//! 2. Call the method on the target, lending reference parameters
//!    (`&str`, `&[T]`, `&mut String`, ..) from their decoded owned values
//! 3. Encode the return value (a unit return yields an empty payload)
//!
//! Bindings are immutable after construction and can be shared across
//! threads; any synchronization the target needs is the target's business.
//!
//! # Example
//!
//! ```
//! use rmi::stream::{decode_value, encode_value, ByteOrder};
//! use rmi::{Invokable, MethodBinding, RemoteObject};
//!
//! struct Adder {
//!     total: i32,
//! }
//!
//! impl Adder {
//!     fn add(&mut self, amount: i32) -> i32 {
//!         self.total += amount;
//!         self.total
//!     }
//! }
//!
//! impl RemoteObject for Adder {}
//!
//! let binding = MethodBinding::new(Adder::add);
//! let mut adder = Adder { total: 40 };
//! let args = encode_value(&(2i32,), ByteOrder::BigEndian).unwrap();
//!
//! let result = binding.invoke(&mut adder, &args).unwrap();
//! assert_eq!(decode_value::<i32>(&result, ByteOrder::BigEndian).unwrap(), 42);
//! ```

use crate::args::ArgumentPack;
use crate::buffer::{ByteArray, ByteBuffer};
use crate::config::{ErrorPolicy, RuntimeConfig, INVOCATION_BYTE_ORDER};
use crate::error::{Error, Result};
use crate::remote::RemoteObject;
use crate::stream::{Decode, Encode, StreamReader, StreamWriter};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

// =======================================================================
// Call adapters
// =======================================================================

/// A method parameter type, decoded from the payload in its owned form.
///
/// Every [`Decode`] type is its own owned form. Reference parameters such as
/// `&str`, `&[T]` or `&mut String` decode the owned value (`String`,
/// `Vec<T>`) and lend a borrow of it to the method for the duration of the
/// call; see [`Lend`].
pub trait Argument {
    /// Form decoded from the argument payload.
    type Owned: Decode;
}

/// Produces the value passed to the method from the decoded owned form.
///
/// Borrowed parameters park the owned value in `slot` and hand out a
/// reference to it that lives for `'s`.
pub trait Lend<'s>: Argument {
    /// Type the method receives.
    type Lent;

    fn lend(owned: Self::Owned, slot: &'s mut Option<Self::Owned>) -> Self::Lent;
}

impl<T: Decode> Argument for T {
    type Owned = T;
}

impl<'s, T: Decode> Lend<'s> for T {
    type Lent = T;

    fn lend(owned: T, _slot: &'s mut Option<T>) -> T {
        owned
    }
}

impl Argument for &str {
    type Owned = String;
}

impl<'s> Lend<'s> for &str {
    type Lent = &'s str;

    fn lend(owned: String, slot: &'s mut Option<String>) -> &'s str {
        slot.insert(owned).as_str()
    }
}

impl<T: Decode> Argument for &[T] {
    type Owned = Vec<T>;
}

impl<'s, T: Decode + 's> Lend<'s> for &[T] {
    type Lent = &'s [T];

    fn lend(owned: Vec<T>, slot: &'s mut Option<Vec<T>>) -> &'s [T] {
        slot.insert(owned).as_slice()
    }
}

impl<T: Decode> Argument for &mut [T] {
    type Owned = Vec<T>;
}

impl<'s, T: Decode + 's> Lend<'s> for &mut [T] {
    type Lent = &'s mut [T];

    fn lend(owned: Vec<T>, slot: &'s mut Option<Vec<T>>) -> &'s mut [T] {
        slot.insert(owned).as_mut_slice()
    }
}

impl<T: Decode> Argument for &Vec<T> {
    type Owned = Vec<T>;
}

impl<'s, T: Decode + 's> Lend<'s> for &Vec<T> {
    type Lent = &'s Vec<T>;

    fn lend(owned: Vec<T>, slot: &'s mut Option<Vec<T>>) -> &'s Vec<T> {
        slot.insert(owned)
    }
}

impl<T: Decode> Argument for &mut Vec<T> {
    type Owned = Vec<T>;
}

impl<'s, T: Decode + 's> Lend<'s> for &mut Vec<T> {
    type Lent = &'s mut Vec<T>;

    fn lend(owned: Vec<T>, slot: &'s mut Option<Vec<T>>) -> &'s mut Vec<T> {
        slot.insert(owned)
    }
}

/// `&T` and `&mut T` parameters for concrete decodable types.
macro_rules! impl_reference_argument {
    ($($type:ty),* $(,)?) => {
        $(
            impl Argument for &$type {
                type Owned = $type;
            }

            impl<'s> Lend<'s> for &$type {
                type Lent = &'s $type;

                fn lend(owned: $type, slot: &'s mut Option<$type>) -> &'s $type {
                    slot.insert(owned)
                }
            }

            impl Argument for &mut $type {
                type Owned = $type;
            }

            impl<'s> Lend<'s> for &mut $type {
                type Lent = &'s mut $type;

                fn lend(owned: $type, slot: &'s mut Option<$type>) -> &'s mut $type {
                    slot.insert(owned)
                }
            }
        )*
    };
}

impl_reference_argument!(
    bool, u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, String, ByteArray, ArgumentPack,
);

/// A callable that can be bound to targets of type `T`.
///
/// `Signature` is a marker (`fn(A1, .., An) -> R`) that keeps the
/// implementations for different arities apart; it is inferred.
pub trait Method<T: ?Sized, Signature>: Send + Sync {
    /// Owned parameter tuple decoded from the argument payload.
    type Args: Decode;

    /// Call with decoded arguments and encode the return value into `out`.
    fn call(&self, target: &mut T, args: Self::Args, out: &mut StreamWriter<'_>) -> Result<()>;
}

/// Adapter for methods that return a reference into the target
/// (`fn(&mut self) -> &String`). The referenced value is encoded before the
/// borrow ends.
#[derive(Debug, Clone, Copy)]
pub struct ByRef<F>(pub F);

// The first `Fn` bound names the declared parameter types so they can be
// inferred from the method. The higher-ranked second bound is what gets
// called, with each parameter lent from its decoded owned value.
macro_rules! impl_method {
    () => {
        impl<T, F, R> Method<T, fn() -> R> for F
        where
            T: ?Sized,
            F: Fn(&mut T) -> R + Send + Sync,
            R: Encode,
        {
            type Args = ();

            fn call(&self, target: &mut T, _args: (), out: &mut StreamWriter<'_>) -> Result<()> {
                (self)(target).encode(out)
            }
        }

        impl<T, G, R> Method<T, fn() -> *const R> for ByRef<G>
        where
            T: ?Sized,
            G: for<'t> Fn(&'t mut T) -> &'t R + Send + Sync,
            R: Encode + ?Sized,
        {
            type Args = ();

            fn call(&self, target: &mut T, _args: (), out: &mut StreamWriter<'_>) -> Result<()> {
                (self.0)(target).encode(out)
            }
        }
    };
    ($($arg:ident $value:ident $slot:ident),*) => {
        impl<T, F, R, $($arg),*> Method<T, fn($($arg),*) -> R> for F
        where
            T: ?Sized,
            F: Fn(&mut T, $($arg),*) -> R + Send + Sync,
            F: for<'s> Fn(&mut T, $(<$arg as Lend<'s>>::Lent),*) -> R,
            R: Encode,
            $($arg: Argument + for<'s> Lend<'s>,)*
        {
            type Args = ($(<$arg as Argument>::Owned,)*);

            fn call(&self, target: &mut T, args: Self::Args, out: &mut StreamWriter<'_>) -> Result<()> {
                #[allow(clippy::too_many_arguments)]
                fn call_inner<'t, T: ?Sized, O, $($arg),*>(
                    f: impl Fn(&'t mut T, $($arg),*) -> O,
                    target: &'t mut T,
                    $($value: $arg,)*
                ) -> O {
                    f(target, $($value),*)
                }

                let ($($value,)*) = args;
                $(let mut $slot = None;)*
                call_inner(self, target, $(<$arg as Lend<'_>>::lend($value, &mut $slot)),*).encode(out)
            }
        }

        impl<T, G, R, $($arg),*> Method<T, fn($($arg),*) -> *const R> for ByRef<G>
        where
            T: ?Sized,
            G: for<'t> Fn(&'t mut T, $($arg),*) -> &'t R + Send + Sync,
            G: for<'t, 's> Fn(&'t mut T, $(<$arg as Lend<'s>>::Lent),*) -> &'t R,
            R: Encode + ?Sized,
            $($arg: Argument + for<'s> Lend<'s>,)*
        {
            type Args = ($(<$arg as Argument>::Owned,)*);

            fn call(&self, target: &mut T, args: Self::Args, out: &mut StreamWriter<'_>) -> Result<()> {
                #[allow(clippy::too_many_arguments)]
                fn call_inner<'t, T: ?Sized, O, $($arg),*>(
                    f: impl Fn(&'t mut T, $($arg),*) -> O,
                    target: &'t mut T,
                    $($value: $arg,)*
                ) -> O {
                    f(target, $($value),*)
                }

                let ($($value,)*) = args;
                $(let mut $slot = None;)*
                call_inner(&self.0, target, $(<$arg as Lend<'_>>::lend($value, &mut $slot)),*).encode(out)
            }
        }
    };
}

impl_method!();
impl_method!(A1 a1 s1);
impl_method!(A1 a1 s1, A2 a2 s2);
impl_method!(A1 a1 s1, A2 a2 s2, A3 a3 s3);
impl_method!(A1 a1 s1, A2 a2 s2, A3 a3 s3, A4 a4 s4);
impl_method!(A1 a1 s1, A2 a2 s2, A3 a3 s3, A4 a4 s4, A5 a5 s5);
impl_method!(A1 a1 s1, A2 a2 s2, A3 a3 s3, A4 a4 s4, A5 a5 s5, A6 a6 s6);
impl_method!(A1 a1 s1, A2 a2 s2, A3 a3 s3, A4 a4 s4, A5 a5 s5, A6 a6 s6, A7 a7 s7);
impl_method!(A1 a1 s1, A2 a2 s2, A3 a3 s3, A4 a4 s4, A5 a5 s5, A6 a6 s6, A7 a7 s7, A8 a8 s8);

// =======================================================================
// Invocation contract
// =======================================================================

/// Uniform invocation contract: argument bytes in, result bytes out.
pub trait Invokable<T: ?Sized>: Send + Sync {
    fn invoke(&self, target: &mut T, arguments: &dyn ByteBuffer) -> Result<ByteArray>;
}

/// Type-erased binding invoked on any [`RemoteObject`].
///
/// The target's concrete type is checked before the call; a binding built
/// for another type fails with [`Error::TargetMismatch`].
pub type RemoteMethod = dyn Invokable<dyn RemoteObject>;

/// One method of `T` bound to the byte-level contract.
///
/// Holds only the method and the error policy captured at construction.
pub struct MethodBinding<T: ?Sized, S, F> {
    method: F,
    policy: ErrorPolicy,
    _signature: PhantomData<fn(&mut T) -> S>,
}

impl<T: ?Sized, S, F: Method<T, S>> MethodBinding<T, S, F> {
    /// Bind `method`, taking the error policy from the global config.
    pub fn new(method: F) -> Self {
        Self::with_policy(method, RuntimeConfig::global().codec().error_policy)
    }

    /// Bind `method` with an explicit error policy.
    pub fn with_policy(method: F, policy: ErrorPolicy) -> Self {
        Self {
            method,
            policy,
            _signature: PhantomData,
        }
    }
}

impl<T: ?Sized, S, G> MethodBinding<T, S, ByRef<G>>
where
    ByRef<G>: Method<T, S>,
{
    /// Bind a method that returns a reference into the target.
    pub fn by_ref(method: G) -> Self {
        Self::new(ByRef(method))
    }
}

impl<T: ?Sized, S, F> MethodBinding<T, S, F> {
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }
}

impl<T: ?Sized, S, F> fmt::Debug for MethodBinding<T, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBinding")
            .field("target", &type_name::<T>())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T, S, F> Invokable<T> for MethodBinding<T, S, F>
where
    T: ?Sized,
    F: Method<T, S>,
{
    fn invoke(&self, target: &mut T, arguments: &dyn ByteBuffer) -> Result<ByteArray> {
        log::trace!(
            "[rmi] invoke on {} with {} argument byte(s)",
            type_name::<T>(),
            arguments.len()
        );

        let mut reader =
            StreamReader::new(arguments, INVOCATION_BYTE_ORDER).with_policy(self.policy);
        let args = reader.read::<F::Args>()?;
        if reader.remaining() > 0 {
            log::debug!(
                "[rmi] ignoring {} trailing argument byte(s)",
                reader.remaining()
            );
        }

        let mut result = ByteArray::new();
        let mut writer = StreamWriter::new(&mut result, INVOCATION_BYTE_ORDER);
        self.method.call(target, args, &mut writer)?;
        Ok(result)
    }
}

impl<T, S, F> Invokable<dyn RemoteObject> for MethodBinding<T, S, F>
where
    T: RemoteObject,
    F: Method<T, S>,
{
    fn invoke(&self, target: &mut dyn RemoteObject, arguments: &dyn ByteBuffer) -> Result<ByteArray> {
        let actual = target.type_name();
        match target.downcast_mut::<T>() {
            Some(concrete) => Invokable::<T>::invoke(self, concrete, arguments),
            None => {
                log::warn!(
                    "[rmi] binding for {} invoked on {}",
                    type_name::<T>(),
                    actual
                );
                Err(Error::TargetMismatch {
                    expected: type_name::<T>(),
                    actual,
                })
            }
        }
    }
}

// =======================================================================
// Method table
// =======================================================================

/// Concurrent name to binding table for targets of type `T`.
///
/// `MethodTable<dyn RemoteObject>` dispatches on any remote object.
pub struct MethodTable<T: ?Sized + 'static> {
    methods: DashMap<Arc<str>, Arc<dyn Invokable<T>>>,
}

impl<T: ?Sized + 'static> MethodTable<T> {
    pub fn new() -> Self {
        Self {
            methods: DashMap::new(),
        }
    }

    /// Register `binding` under `name`.
    ///
    /// # Errors
    ///
    /// `Error::DuplicateMethod` if the name is taken; the existing binding is
    /// kept.
    pub fn register<B>(&self, name: impl Into<Arc<str>>, binding: B) -> Result<()>
    where
        B: Invokable<T> + 'static,
    {
        let name = name.into();
        match self.methods.entry(Arc::clone(&name)) {
            Entry::Occupied(_) => Err(Error::DuplicateMethod(name.to_string())),
            Entry::Vacant(slot) => {
                log::debug!("[rmi] registered method '{}' on {}", name, type_name::<T>());
                slot.insert(Arc::new(binding));
                Ok(())
            }
        }
    }

    /// Remove the binding registered under `name`. Returns whether one was
    /// present.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.methods.remove(name).is_some();
        if removed {
            log::debug!("[rmi] unregistered method '{}'", name);
        }
        removed
    }

    /// Invoke the binding registered under `name`.
    pub fn invoke(&self, name: &str, target: &mut T, arguments: &dyn ByteBuffer) -> Result<ByteArray> {
        // Release the shard lock before running user code.
        let binding = self
            .methods
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::MethodNotFound(name.to_string()))?;
        binding.invoke(target, arguments)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.iter().map(|e| e.key().to_string()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<T: ?Sized + 'static> Default for MethodTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for MethodTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("target", &type_name::<T>())
            .field("methods", &self.names())
            .finish()
    }
}
