//! Benchmark for face layout generation.
//!
//! TARGET: a full 2500-particle regeneration well under one frame (16ms)
//!
//! Run with: cargo bench --package lumina_procedural --bench face_benchmark

// criterion_group! expands to undocumented public functions.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lumina_procedural::{generate_face_points, FaceGenerator, FaceLayout, PortraitSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let layout = FaceLayout::new(1280.0, 720.0);
    let mut rng = PortraitSeed::new(42).rng();

    c.bench_function("single_face_sample", |b| {
        b.iter(|| black_box(layout.sample(&mut rng)));
    });
}

fn benchmark_full_regeneration(c: &mut Criterion) {
    let mut group = c.benchmark_group("regeneration");

    for count in [800usize, 2500] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_particles"), |b| {
            let mut generator = FaceGenerator::new(PortraitSeed::new(42));
            b.iter(|| black_box(generator.generate(count, 1280.0, 720.0)));
        });
    }

    group.finish();
}

fn benchmark_seeded_rng(c: &mut Criterion) {
    c.bench_function("generate_with_fresh_rng", |b| {
        b.iter(|| {
            let mut rng = PortraitSeed::new(7).rng();
            black_box(generate_face_points(black_box(2500), 1280.0, 720.0, &mut rng))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_full_regeneration,
    benchmark_seeded_rng
);
criterion_main!(benches);
