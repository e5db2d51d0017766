//! Benchmarks for complete engine blocks.
//!
//! A stereo drum-like input (short decaying bursts) runs through the engine
//! with trigger output off (detection only) and on (sample replacement).

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use anydrum::{ControlParams, Engine, EngineConfig, ParamId, SampleSource};

use crate::BLOCK_SIZES;

const CHANNELS: usize = 2;

/// One second of stereo hits every 250ms
fn drum_loop(sample_rate: usize) -> Vec<f32> {
    let period = sample_rate / 4;
    (0..sample_rate)
        .flat_map(|i| {
            let t = (i % period) as f32;
            let s = (-t / 800.0).exp() * if i % 2 == 0 { 1.0 } else { -1.0 };
            [s, s]
        })
        .collect()
}

fn params(trigger: bool) -> Arc<ControlParams> {
    let params = Arc::new(ControlParams::new());
    params.set(ParamId::Threshold, 0.4);
    params.set(ParamId::Offset, 64.0);
    params.set(ParamId::Mask, 4000.0);
    params.set_trigger_enabled(trigger);
    params
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let config = EngineConfig {
        channels: CHANNELS,
        ..EngineConfig::default()
    };
    let input = drum_loop(48_000);
    let hit = Arc::new(SampleSource::from_mono(
        (0..9600).map(|i| (-(i as f32) / 2000.0).exp()).collect(),
        44_100.0,
    ));

    for &size in BLOCK_SIZES {
        let block_len = size * CHANNELS;
        let mut buffer = vec![0.0f32; block_len];

        // === DETECT ONLY ===
        let (mut engine, mut handle) = Engine::new(config.clone(), params(false));
        let mut offset = 0;
        group.bench_with_input(BenchmarkId::new("detect", size), &size, |b, _| {
            b.iter(|| {
                if offset + block_len > input.len() {
                    offset = 0;
                }
                buffer.copy_from_slice(&input[offset..offset + block_len]);
                offset += block_len;
                engine.process_interleaved(black_box(&mut buffer));
                while handle.pop_event().is_some() {}
            })
        });

        // === REPLACE ===
        // resampled 44.1k hit into a 48k stream
        let (mut engine, mut handle) = Engine::new(config.clone(), params(true));
        if handle.load_source(Arc::clone(&hit)).is_err() {
            continue;
        }
        let mut offset = 0;
        group.bench_with_input(BenchmarkId::new("replace", size), &size, |b, _| {
            b.iter(|| {
                if offset + block_len > input.len() {
                    offset = 0;
                }
                buffer.copy_from_slice(&input[offset..offset + block_len]);
                offset += block_len;
                engine.process_interleaved(black_box(&mut buffer));
                while handle.pop_event().is_some() {}
            })
        });
    }

    group.finish();
}
