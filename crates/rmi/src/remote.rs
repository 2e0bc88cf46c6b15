// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Remote object capability.
//!
//! Every invocation target implements [`RemoteObject`]. The trait prescribes
//! no method set: concrete targets expose their methods through
//! [`MethodBinding`](crate::method::MethodBinding)s built for the concrete type.

use crate::buffer::ByteBuffer;
use crate::error::{Error, Result};
use std::any::Any;

/// Upcast to `Any` for checked downcasting of trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Capability implemented by every object reachable through RMI.
///
/// # Example
///
/// ```
/// use rmi::{ArgumentPack, ByteBuffer, RemoteObject, Result};
/// use rmi::stream::{decode_value, ByteOrder};
///
/// struct Counter {
///     value: i64,
/// }
///
/// impl RemoteObject for Counter {
///     fn create_new_instance(&self, arguments: &dyn ByteBuffer) -> Result<Box<dyn RemoteObject>> {
///         let args: ArgumentPack = decode_value(arguments, ByteOrder::BigEndian)?;
///         Ok(Box::new(Counter { value: args.read_as("start")? }))
///     }
/// }
/// ```
pub trait RemoteObject: AsAny + Send {
    /// Create a new instance of the same concrete type from encoded
    /// constructor arguments.
    fn create_new_instance(&self, arguments: &dyn ByteBuffer) -> Result<Box<dyn RemoteObject>> {
        let _ = arguments;
        Err(Error::Unsupported("create_new_instance"))
    }

    /// Concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn RemoteObject {
    pub fn is<T: RemoteObject>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    pub fn downcast_ref<T: RemoteObject>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: RemoteObject>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ByteArray;

    struct Plain;

    impl RemoteObject for Plain {}

    struct Seeded {
        seed: u8,
    }

    impl RemoteObject for Seeded {
        fn create_new_instance(&self, arguments: &dyn ByteBuffer) -> Result<Box<dyn RemoteObject>> {
            Ok(Box::new(Seeded {
                seed: arguments.get(0)?,
            }))
        }
    }

    #[test]
    fn test_default_factory_is_unsupported() {
        let plain = Plain;
        let err = plain.create_new_instance(&ByteArray::new()).err();
        assert_eq!(err, Some(Error::Unsupported("create_new_instance")));
    }

    #[test]
    fn test_factory_produces_same_concrete_type() {
        let prototype = Seeded { seed: 0 };
        let mut instance = prototype
            .create_new_instance(&ByteArray::from(vec![9u8]))
            .expect("create");
        assert!(instance.is::<Seeded>());
        assert!(!instance.is::<Plain>());
        assert_eq!(instance.downcast_ref::<Seeded>().map(|s| s.seed), Some(9));

        if let Some(seeded) = instance.downcast_mut::<Seeded>() {
            seeded.seed = 10;
        }
        assert_eq!(instance.downcast_ref::<Seeded>().map(|s| s.seed), Some(10));
    }

    #[test]
    fn test_type_name_through_trait_object() {
        let object: Box<dyn RemoteObject> = Box::new(Plain);
        assert!(object.type_name().ends_with("Plain"));
    }
}
