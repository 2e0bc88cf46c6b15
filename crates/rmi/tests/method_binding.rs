// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end method binding tests: argument payload in, result payload out,
// against small test doubles that record what they receive.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

use rmi::stream::{decode_value, encode_value, ByteOrder};
use rmi::{
    ArgumentPack, ByteArray, ByteBuffer, Error, Invokable, MethodBinding, MethodTable,
    RemoteMethod, RemoteObject, Result,
};
use std::sync::Arc;

// ===== Test doubles =====

/// Records whether it has been called.
#[derive(Default)]
struct BooleanSpy {
    called: bool,
}

impl BooleanSpy {
    fn call(&mut self) {
        self.called = true;
    }
}

impl RemoteObject for BooleanSpy {}

/// Records a string and an integer argument.
struct MultitypeSpy {
    received_string: String,
    received_integer: i32,
}

impl Default for MultitypeSpy {
    fn default() -> Self {
        Self {
            received_string: "a".to_string(),
            received_integer: 0,
        }
    }
}

impl MultitypeSpy {
    fn call(&mut self, string: String, number: i32) {
        self.received_string = string;
        self.received_integer = number;
    }
}

impl RemoteObject for MultitypeSpy {}

/// Returns a configured integer.
struct IntegerStub {
    value: i32,
}

impl IntegerStub {
    fn call(&mut self) -> i32 {
        self.value
    }
}

impl RemoteObject for IntegerStub {}

/// Records a string argument received by reference.
#[derive(Default)]
struct StringReferenceSpy {
    received_string: String,
}

impl StringReferenceSpy {
    fn call(&mut self, string: &str) {
        self.received_string = string.to_string();
    }

    fn append(&mut self, string: &mut String) -> u32 {
        string.push('!');
        self.received_string.push_str(string);
        self.received_string.len() as u32
    }
}

impl RemoteObject for StringReferenceSpy {}

/// Returns a reference to a configured string.
#[derive(Default)]
struct StringReferenceConfigurableStub {
    string_value: String,
}

impl StringReferenceConfigurableStub {
    fn set_string_to_return(&mut self, string: &str) {
        self.string_value = string.to_string();
    }

    fn call(&mut self) -> &String {
        &self.string_value
    }

    fn call_str(&mut self) -> &str {
        &self.string_value
    }
}

impl RemoteObject for StringReferenceConfigurableStub {
    fn create_new_instance(&self, arguments: &dyn ByteBuffer) -> Result<Box<dyn RemoteObject>> {
        let args: ArgumentPack = decode_value(arguments, ByteOrder::BigEndian)?;
        let mut stub = Self::default();
        stub.set_string_to_return(args.get("initial").unwrap_or_default());
        Ok(Box::new(stub))
    }
}

fn payload<T: rmi::Encode + ?Sized>(value: &T) -> ByteArray {
    encode_value(value, ByteOrder::BigEndian).expect("encode payload")
}

// ===== Void methods =====

#[test]
fn void_method_without_arguments_is_called() {
    let binding = MethodBinding::new(BooleanSpy::call);
    let mut spy = BooleanSpy::default();

    binding.invoke(&mut spy, &ByteArray::new()).expect("invoke");
    assert!(spy.called);
}

#[test]
fn void_method_without_arguments_returns_empty_payload() {
    let binding = MethodBinding::new(BooleanSpy::call);
    let mut spy = BooleanSpy::default();

    let result = binding.invoke(&mut spy, &ByteArray::new()).expect("invoke");
    assert_eq!(result.len(), 0);
}

#[test]
fn void_method_receives_both_arguments() {
    let binding = MethodBinding::new(MultitypeSpy::call);
    let mut spy = MultitypeSpy::default();

    let args = payload(&("TestString".to_string(), 2i32));
    binding.invoke(&mut spy, &args).expect("invoke");

    assert_eq!(spy.received_string, "TestString");
    assert_eq!(spy.received_integer, 2);
}

#[test]
fn void_method_receives_string_argument() {
    let binding = MethodBinding::new(StringReferenceSpy::call);
    let mut spy = StringReferenceSpy::default();

    binding
        .invoke(&mut spy, &payload(&("TestString",)))
        .expect("invoke");
    assert_eq!(spy.received_string, "TestString");
}

#[test]
fn void_method_receives_string_by_reference_from_table() {
    let table: MethodTable<dyn RemoteObject> = MethodTable::new();
    table
        .register("call", MethodBinding::new(StringReferenceSpy::call))
        .expect("register");
    table
        .register("append", MethodBinding::new(StringReferenceSpy::append))
        .expect("register");

    let mut spy = StringReferenceSpy::default();
    table
        .invoke("call", &mut spy, &payload(&("Test",)))
        .expect("call");
    let result = table
        .invoke("append", &mut spy, &payload(&(" String",)))
        .expect("append");

    assert_eq!(spy.received_string, "Test String!");
    let len: u32 = decode_value(&result, ByteOrder::BigEndian).expect("decode");
    assert_eq!(len, 12);
}

// ===== Value-returning methods =====

#[test]
fn integer_method_returns_encoded_value() {
    let binding = MethodBinding::new(IntegerStub::call);
    let mut stub = IntegerStub { value: 3 };

    let result = binding.invoke(&mut stub, &ByteArray::new()).expect("invoke");
    assert_eq!(result.len(), 4);
    assert_eq!(result.as_slice(), &[0, 0, 0, 3]);
    assert_eq!(decode_value::<i32>(&result, ByteOrder::BigEndian).expect("decode"), 3);
}

#[test]
fn string_reference_method_returns_encoded_string() {
    let binding = MethodBinding::by_ref(StringReferenceConfigurableStub::call);
    let mut stub = StringReferenceConfigurableStub::default();
    stub.set_string_to_return("Test String");

    let result = binding.invoke(&mut stub, &ByteArray::new()).expect("invoke");
    let decoded: String = decode_value(&result, ByteOrder::BigEndian).expect("decode");
    assert_eq!(decoded, "Test String");
}

#[test]
fn str_reference_method_matches_string_reference_method() {
    let mut stub = StringReferenceConfigurableStub::default();
    stub.set_string_to_return("same bytes");

    let by_string = MethodBinding::by_ref(StringReferenceConfigurableStub::call)
        .invoke(&mut stub, &ByteArray::new())
        .expect("invoke");
    let by_str = MethodBinding::by_ref(StringReferenceConfigurableStub::call_str)
        .invoke(&mut stub, &ByteArray::new())
        .expect("invoke");
    assert_eq!(by_string, by_str);
}

// ===== Remote objects =====

#[test]
fn erased_binding_dispatches_on_remote_object() {
    let binding = MethodBinding::new(IntegerStub::call);
    let erased: Arc<RemoteMethod> = Arc::new(binding);

    let mut target: Box<dyn RemoteObject> = Box::new(IntegerStub { value: -7 });
    let result = erased.invoke(target.as_mut(), &ByteArray::new()).expect("invoke");
    assert_eq!(decode_value::<i32>(&result, ByteOrder::BigEndian).expect("decode"), -7);
}

#[test]
fn erased_binding_rejects_other_target_type() {
    let erased: Arc<RemoteMethod> = Arc::new(MethodBinding::new(IntegerStub::call));
    let mut target: Box<dyn RemoteObject> = Box::new(BooleanSpy::default());

    let err = erased
        .invoke(target.as_mut(), &ByteArray::new())
        .expect_err("type mismatch");
    assert!(matches!(err, Error::TargetMismatch { .. }));
    assert!(err.to_string().contains("IntegerStub"));
}

#[test]
fn factory_creates_configured_instance() {
    let prototype = StringReferenceConfigurableStub::default();
    let args: ArgumentPack = [("initial", "from factory")].into_iter().collect();

    let mut instance = prototype
        .create_new_instance(&payload(&args))
        .expect("create");

    let binding = MethodBinding::by_ref(StringReferenceConfigurableStub::call);
    let result = Invokable::<dyn RemoteObject>::invoke(&binding, instance.as_mut(), &ByteArray::new())
        .expect("invoke");
    let decoded: String = decode_value(&result, ByteOrder::BigEndian).expect("decode");
    assert_eq!(decoded, "from factory");
}

#[test]
fn factory_is_unsupported_by_default() {
    let spy = BooleanSpy::default();
    let err = spy.create_new_instance(&ByteArray::new()).err();
    assert_eq!(err, Some(Error::Unsupported("create_new_instance")));
}

// ===== Method table =====

#[test]
fn remote_table_routes_by_name() {
    let table: MethodTable<dyn RemoteObject> = MethodTable::new();
    table
        .register("spy.call", MethodBinding::new(MultitypeSpy::call))
        .expect("register");
    table
        .register("stub.call", MethodBinding::new(IntegerStub::call))
        .expect("register");

    let mut spy = MultitypeSpy::default();
    table
        .invoke("spy.call", &mut spy, &payload(&("x".to_string(), 9i32)))
        .expect("invoke");
    assert_eq!((spy.received_string.as_str(), spy.received_integer), ("x", 9));

    let mut stub = IntegerStub { value: 11 };
    let result = table
        .invoke("stub.call", &mut stub, &ByteArray::new())
        .expect("invoke");
    assert_eq!(decode_value::<i32>(&result, ByteOrder::BigEndian).expect("decode"), 11);

    assert!(matches!(
        table.invoke("stub.call", &mut spy, &ByteArray::new()),
        Err(Error::TargetMismatch { .. })
    ));
    assert!(matches!(
        table.invoke("missing", &mut spy, &ByteArray::new()),
        Err(Error::MethodNotFound(_))
    ));
}

#[test]
fn table_is_shared_across_threads() {
    let table: Arc<MethodTable<IntegerStub>> = Arc::new(MethodTable::new());
    table
        .register("call", MethodBinding::new(IntegerStub::call))
        .expect("register");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let table = Arc::clone(&table);
            std::thread::spawn(move || {
                let mut stub = IntegerStub { value: i };
                let result = table
                    .invoke("call", &mut stub, &ByteArray::new())
                    .expect("invoke");
                decode_value::<i32>(&result, ByteOrder::BigEndian).expect("decode")
            })
        })
        .collect();

    let mut values: Vec<i32> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    values.sort_unstable();
    assert_eq!(values, vec![0, 1, 2, 3]);
}
