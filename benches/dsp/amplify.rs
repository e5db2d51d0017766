//! Benchmarks for the gain stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use anydrum::dsp::amplify;

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut signal_copy = signal.clone();
        group.bench_with_input(
            BenchmarkId::new("apply_gain_flushed", size),
            &size,
            |b, _| {
                b.iter(|| {
                    signal_copy.copy_from_slice(&signal);
                    amplify::apply_gain_flushed(black_box(&mut signal_copy), black_box(0.5))
                })
            },
        );
    }

    group.finish();
}
