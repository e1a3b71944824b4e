//! Criterion benchmarks for the capability oracle query path.
//!
//! The oracle sits on the vectorizer's hot path (one query per candidate
//! operation), so table lookup plus tier resolution must stay in the low
//! nanoseconds.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::{Rng, SeedableRng, SliceRandom};
use rand::rngs::StdRng;

use lanecap_core::{
    ArithOp, CompareCondition, CpuFeature, ElementStamp, FeatureSet, IntOp, MachineProfile,
    VectorOp, VectorOracle, VectorizerConfig,
};

const FULL_512: FeatureSet = FeatureSet::of(&[
    CpuFeature::Sse2,
    CpuFeature::Avx,
    CpuFeature::Avx2,
    CpuFeature::Fma,
    CpuFeature::Avx512f,
    CpuFeature::Avx512bw,
    CpuFeature::Avx512dq,
    CpuFeature::Avx512vl,
]);

fn mixed_descriptors(count: usize) -> Vec<(VectorOp, usize)> {
    let mut rng = StdRng::seed_from_u64(0x1a7e_ca95);
    let widths = [8u32, 16, 32, 64];
    let mut ops = Vec::with_capacity(count);
    for _ in 0..count {
        let bits = *widths.choose(&mut rng).unwrap();
        let request = rng.gen_range(2..=64);
        let op = match rng.gen_range(0..4) {
            0 => VectorOp::Arithmetic {
                op: ArithOp::Int(IntOp::Add),
                stamp: ElementStamp::int(bits),
            },
            1 => VectorOp::Compare {
                condition: CompareCondition::BelowThan,
                stamp: ElementStamp::int(bits),
            },
            2 => VectorOp::Blend {
                stamp: ElementStamp::int(bits),
            },
            _ => VectorOp::Permute {
                stamp: ElementStamp::int(bits),
            },
        };
        ops.push((op, request));
    }
    ops
}

fn bench_supported_length(c: &mut Criterion) {
    let avx2 = VectorOracle::new(MachineProfile::new(
        FeatureSet::of(&[CpuFeature::Sse2, CpuFeature::Avx, CpuFeature::Avx2]),
        &VectorizerConfig::default(),
    ));
    let full = VectorOracle::new(MachineProfile::new(FULL_512, &VectorizerConfig::default()));
    let descriptors = mixed_descriptors(1024);

    let mut group = c.benchmark_group("supported_length");
    group.bench_function("avx2_mixed", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (op, request) in &descriptors {
                total += avx2.supported_length(black_box(op), black_box(*request));
            }
            total
        });
    });
    group.bench_function("avx512_mixed", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (op, request) in &descriptors {
                total += full.supported_length(black_box(op), black_box(*request));
            }
            total
        });
    });
    group.finish();
}

fn bench_arithmetic_hot_path(c: &mut Criterion) {
    let oracle = VectorOracle::new(MachineProfile::new(FULL_512, &VectorizerConfig::default()));
    let stamp = ElementStamp::int(32);
    c.bench_function("dword_add_query", |b| {
        b.iter(|| {
            oracle.supported_arithmetic_length(
                black_box(&stamp),
                black_box(16),
                ArithOp::Int(IntOp::Add),
            )
        });
    });
}

criterion_group!(benches, bench_supported_length, bench_arithmetic_hot_path);
criterion_main!(benches);
