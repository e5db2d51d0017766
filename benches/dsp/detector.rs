//! Benchmarks for the windowed peak detector.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use anydrum::dsp::EnvelopeDetector;

use crate::BLOCK_SIZES;

pub fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/detector");

    for &size in BLOCK_SIZES {
        // Noisy-ish signal so the running max keeps changing
        let signal: Vec<f32> = (0..size)
            .map(|i| ((i * 7919) % 1000) as f32 / 500.0 - 1.0)
            .collect();
        let mut detector = EnvelopeDetector::new();

        group.bench_with_input(BenchmarkId::new("observe", size), &size, |b, _| {
            b.iter(|| {
                for &s in &signal {
                    detector.observe(black_box(s));
                }
                black_box(detector.amplitude())
            })
        });
    }

    group.finish();
}
