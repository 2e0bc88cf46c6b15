// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Encode`/`Decode` implementations for primitives, strings, sequences and
//! tuples.

use super::{Decode, Encode, StreamReader, StreamWriter};
use crate::buffer::{ByteArray, ByteBuffer};
use crate::config::{ErrorPolicy, LENGTH_PREFIX_SIZE};
use crate::error::{Error, Result};

macro_rules! impl_codec_primitive {
    ($type:ty, $write:ident, $read:ident) => {
        impl Encode for $type {
            fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
                writer.$write(*self)
            }
        }

        impl Decode for $type {
            const MIN_ENCODED_LEN: usize = std::mem::size_of::<$type>();

            fn decode(reader: &mut StreamReader<'_>) -> Result<Self> {
                reader.$read()
            }
        }
    };
}

impl_codec_primitive!(bool, write_bool, read_bool);
impl_codec_primitive!(u8, write_u8, read_u8);
impl_codec_primitive!(i8, write_i8, read_i8);
impl_codec_primitive!(u16, write_u16, read_u16);
impl_codec_primitive!(i16, write_i16, read_i16);
impl_codec_primitive!(u32, write_u32, read_u32);
impl_codec_primitive!(i32, write_i32, read_i32);
impl_codec_primitive!(u64, write_u64, read_u64);
impl_codec_primitive!(i64, write_i64, read_i64);
impl_codec_primitive!(f32, write_f32, read_f32);
impl_codec_primitive!(f64, write_f64, read_f64);

impl Encode for str {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        writer.write_len(self.len())?;
        writer.write_data(self.as_bytes())
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        self.as_str().encode(writer)
    }
}

impl Decode for String {
    const MIN_ENCODED_LEN: usize = LENGTH_PREFIX_SIZE;

    fn decode(reader: &mut StreamReader<'_>) -> Result<Self> {
        let offset = reader.position();
        let len = reader.read_len()?;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = reader.read_bytes(len)?;
        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => match reader.policy() {
                ErrorPolicy::Strict => Err(Error::InvalidUtf8 { offset }),
                ErrorPolicy::Lenient => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        writer.write_len(self.len())?;
        for item in self {
            item.encode(writer)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        self.as_slice().encode(writer)
    }
}

impl<T: Decode> Decode for Vec<T> {
    const MIN_ENCODED_LEN: usize = LENGTH_PREFIX_SIZE;

    fn decode(reader: &mut StreamReader<'_>) -> Result<Self> {
        let count = reader.read_count(T::MIN_ENCODED_LEN)?;
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            items.push(T::decode(reader)?);
            // Lenient decoding past the end only produces sentinels.
            if reader.is_overrun() {
                break;
            }
        }
        Ok(items)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        (**self).encode(writer)
    }
}

/// `u32` length, then the bytes as-is. Use [`StreamWriter::write_data`] and
/// [`StreamReader::read_remaining`] for an unframed trailing payload.
impl Encode for ByteArray {
    fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
        writer.write_len(self.len())?;
        writer.write_data(self.as_slice())
    }
}

impl Decode for ByteArray {
    const MIN_ENCODED_LEN: usize = LENGTH_PREFIX_SIZE;

    fn decode(reader: &mut StreamReader<'_>) -> Result<Self> {
        let len = reader.read_len()?;
        Ok(ByteArray::from(reader.read_bytes(len)?))
    }
}

macro_rules! impl_codec_tuple {
    ($($name:ident),*) => {
        impl<$($name: Encode),*> Encode for ($($name,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn encode(&self, writer: &mut StreamWriter<'_>) -> Result<()> {
                let ($($name,)*) = self;
                $($name.encode(writer)?;)*
                Ok(())
            }
        }

        impl<$($name: Decode),*> Decode for ($($name,)*) {
            const MIN_ENCODED_LEN: usize = 0 $(+ $name::MIN_ENCODED_LEN)*;

            #[allow(unused_variables)]
            fn decode(reader: &mut StreamReader<'_>) -> Result<Self> {
                Ok(($($name::decode(reader)?,)*))
            }
        }
    };
}

impl_codec_tuple!();
impl_codec_tuple!(A1);
impl_codec_tuple!(A1, A2);
impl_codec_tuple!(A1, A2, A3);
impl_codec_tuple!(A1, A2, A3, A4);
impl_codec_tuple!(A1, A2, A3, A4, A5);
impl_codec_tuple!(A1, A2, A3, A4, A5, A6);
impl_codec_tuple!(A1, A2, A3, A4, A5, A6, A7);
impl_codec_tuple!(A1, A2, A3, A4, A5, A6, A7, A8);
