// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec and Invocation Benchmark
//!
//! Measures the marshaling cost on the invocation path:
//! - Encoding and decoding of typical argument tuples
//! - Buffer growth when appending past the initial capacity
//! - A full bound-method invocation (decode, call, encode)

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rmi::stream::{decode_value, encode_value, ByteOrder};
use rmi::{ByteArray, ByteBuffer, Invokable, MethodBinding, RemoteObject};
use std::hint::black_box;

struct Accumulator {
    total: i64,
}

impl Accumulator {
    fn add(&mut self, label: String, values: Vec<i64>) -> i64 {
        self.total += values.iter().sum::<i64>() + label.len() as i64;
        self.total
    }
}

impl RemoteObject for Accumulator {}

fn sample_arguments(count: usize) -> (String, Vec<i64>) {
    ("accumulate".to_string(), (0..count as i64).collect())
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_arguments");
    for count in [1usize, 64, 1024] {
        let args = sample_arguments(count);
        let size = encode_value(&args, ByteOrder::BigEndian)
            .expect("encode")
            .len();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &args, |b, args| {
            b.iter(|| encode_value(black_box(args), ByteOrder::BigEndian).expect("encode"));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_arguments");
    for count in [1usize, 64, 1024] {
        let bytes = encode_value(&sample_arguments(count), ByteOrder::BigEndian).expect("encode");
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| {
                decode_value::<(String, Vec<i64>)>(black_box(bytes), ByteOrder::BigEndian)
                    .expect("decode")
            });
        });
    }
    group.finish();
}

fn bench_append_growth(c: &mut Criterion) {
    let chunk = [0x5Au8; 64];
    c.bench_function("append_64k_in_64b_chunks", |b| {
        b.iter(|| {
            let mut buf = ByteArray::with_capacity(64);
            for _ in 0..1024 {
                buf.append(black_box(&chunk)).expect("append");
            }
            buf
        });
    });
}

fn bench_invoke(c: &mut Criterion) {
    let binding = MethodBinding::new(Accumulator::add);
    let payload = encode_value(&sample_arguments(16), ByteOrder::BigEndian).expect("encode");
    let mut target = Accumulator { total: 0 };

    c.bench_function("invoke_bound_method", |b| {
        b.iter(|| {
            Invokable::<Accumulator>::invoke(&binding, &mut target, black_box(&payload))
                .expect("invoke")
        });
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_append_growth,
    bench_invoke
);
criterion_main!(benches);
