//! Benchmarks for the trigger state machine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use anydrum::dsp::{TransientTrigger, TriggerLimits};

use crate::BLOCK_SIZES;

pub fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/trigger");

    let limits = TriggerLimits {
        threshold: 0.5,
        offset_window: 64,
        mask_window: 4000,
    };

    for &size in BLOCK_SIZES {
        let signal = vec![0.9f32; size];

        // === HELD ===
        // every sample above threshold: confirmations keep landing
        let mut trigger = TransientTrigger::new();
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                for &s in &signal {
                    black_box(trigger.process(black_box(s), 0.9, &limits));
                }
            })
        });

        // === QUIET ===
        // below threshold, only the mask counter moves
        let mut trigger = TransientTrigger::new();
        group.bench_with_input(BenchmarkId::new("quiet", size), &size, |b, _| {
            b.iter(|| {
                for &s in &signal {
                    black_box(trigger.process(black_box(s), 0.1, &limits));
                }
            })
        });
    }

    group.finish();
}
