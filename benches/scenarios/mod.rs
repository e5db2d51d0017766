//! Real-world scenario benchmarks.
//!
//! Whole engine blocks as a host would drive them.

mod engine;

pub use engine::bench_engine;
