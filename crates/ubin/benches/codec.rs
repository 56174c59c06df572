// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures serialize/deserialize cost of a small nested model with:
//! - Safe (versioned) vs Unsafe (fixed) layouts
//! - Growing collection sizes (0 to 4096 elements)
//!
//! Plan construction is measured separately since codecs are built once.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box as bb;
use ubin::{Binary, SafeCodec, UnsafeCodec};

#[derive(Debug, Default, Clone, PartialEq, Binary)]
struct Sample {
    #[bin(index = 0)]
    seq: u64,
    #[bin(index = 1)]
    label: String,
    #[bin(index = 2)]
    readings: Vec<f32>,
}

#[derive(Debug, Default, Clone, PartialEq, Binary)]
struct Batch {
    #[bin(index = 0)]
    source: Option<String>,
    #[bin(index = 1, generation = 1)]
    samples: Vec<Sample>,
}

impl Batch {
    fn new(len: usize) -> Self {
        Self {
            source: Some("bench/sensor".to_string()),
            samples: (0..len)
                .map(|i| Sample {
                    seq: i as u64,
                    label: format!("s{}", i),
                    readings: vec![i as f32; 4],
                })
                .collect(),
        }
    }
}

/// Benchmark serialization by batch size, both modes
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let safe = SafeCodec::<Batch>::new().expect("safe codec");
    let fixed = UnsafeCodec::<Batch>::new().expect("unsafe codec");

    for len in [0usize, 16, 256, 4096] {
        let batch = Batch::new(len);
        let size = safe.serialize(&batch).expect("serialize").len();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("safe", len), &batch, |b, batch| {
            b.iter(|| safe.serialize(bb(batch)).expect("serialize should succeed"));
        });
        group.bench_with_input(BenchmarkId::new("unsafe", len), &batch, |b, batch| {
            b.iter(|| fixed.serialize(bb(batch)).expect("serialize should succeed"));
        });
    }

    group.finish();
}

/// Benchmark deserialization by batch size, both modes
fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize");
    let safe = SafeCodec::<Batch>::new().expect("safe codec");
    let fixed = UnsafeCodec::<Batch>::new().expect("unsafe codec");

    for len in [0usize, 16, 256, 4096] {
        let batch = Batch::new(len);
        let safe_bytes = safe.serialize(&batch).expect("serialize");
        let fixed_bytes = fixed.serialize(&batch).expect("serialize");
        group.throughput(Throughput::Bytes(safe_bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("safe", len), &safe_bytes, |b, bytes| {
            b.iter(|| safe.deserialize(bb(bytes)).expect("deserialize should succeed"));
        });
        group.bench_with_input(BenchmarkId::new("unsafe", len), &fixed_bytes, |b, bytes| {
            b.iter(|| fixed.deserialize(bb(bytes)).expect("deserialize should succeed"));
        });
    }

    group.finish();
}

/// Benchmark plan construction
fn bench_build(c: &mut Criterion) {
    c.bench_function("build_safe_codec", |b| {
        b.iter(|| SafeCodec::<Batch>::new().expect("safe codec"));
    });
}

criterion_group!(benches, bench_serialize, bench_deserialize, bench_build);
criterion_main!(benches);
