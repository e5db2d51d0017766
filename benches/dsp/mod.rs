//! Benchmarks for low-level DSP primitives.

mod amplify;
mod detector;
mod trigger;

pub use amplify::bench_amplify;
pub use detector::bench_detector;
pub use trigger::bench_trigger;
