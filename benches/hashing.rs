//! Hash function throughput using criterion.
//!
//! FNV-1a against the standard library's SipHash on byte strings, and the
//! three universal families on 32-bit integers.
//!
//! Run with: `cargo bench --bench hashing`


use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::hint::black_box;
use std::time::Duration;

use algolab::hash::FnvHasher;
use algolab::hash::functions::{
    DEFAULT_PRIME, MaskedUniversalHash, MultiplyShiftHash, UniversalHash, fnv1a_32,
};
use bench_utils::random_u32s;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(200)
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1))
        .noise_threshold(0.02)
}

/// Byte strings: FNV-1a (32 and 64 bit) against SipHash-1-3.
fn bench_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing/bytes");

    for len in [4usize, 16, 64, 256, 1024] {
        let data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("fnv1a_32", len), &data, |b, data| {
            b.iter(|| black_box(fnv1a_32(black_box(data))));
        });

        group.bench_with_input(BenchmarkId::new("fnv1a_64", len), &data, |b, data| {
            b.iter(|| {
                let mut h = FnvHasher::default();
                h.write(black_box(data));
                black_box(h.finish())
            });
        });

        group.bench_with_input(BenchmarkId::new("siphash", len), &data, |b, data| {
            b.iter(|| {
                let mut h = DefaultHasher::new();
                h.write(black_box(data));
                black_box(h.finish())
            });
        });
    }

    group.finish();
}

/// 32-bit integers through each universal family.
fn bench_universal(c: &mut Criterion) {
    const COUNT: usize = 4096;
    const BUCKETS: u32 = 1 << 16;

    let mut group = c.benchmark_group("hashing/universal");
    group.throughput(Throughput::Elements(COUNT as u64));

    let values = random_u32s(COUNT, u32::MAX, 42);
    let mut rng = SmallRng::seed_from_u64(7);

    let modular = UniversalHash::random(&mut rng, DEFAULT_PRIME, u64::from(BUCKETS));
    group.bench_function("carter_wegman", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for &v in black_box(&values) {
                acc ^= modular.hash(v);
            }
            black_box(acc)
        });
    });

    let masked = MaskedUniversalHash::random(&mut rng, DEFAULT_PRIME, u64::from(BUCKETS));
    group.bench_function("carter_wegman_masked", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for &v in black_box(&values) {
                acc ^= masked.hash(v);
            }
            black_box(acc)
        });
    });

    let multiply_shift = MultiplyShiftHash::random(&mut rng, BUCKETS);
    group.bench_function("multiply_shift", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for &v in black_box(&values) {
                acc ^= multiply_shift.hash(v);
            }
            black_box(acc)
        });
    });

    group.bench_function("fnv1a_32_le_bytes", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for &v in black_box(&values) {
                acc ^= fnv1a_32(&v.to_le_bytes());
            }
            black_box(acc)
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = bench_bytes, bench_universal
}

criterion_main!(benches);
