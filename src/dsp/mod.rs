//! Low-level detection primitives used by the engine.
//!
//! These components are allocation-free and realtime-safe. They hold only
//! numeric state and know nothing about parameters, players, or threads, so
//! the engine can drive them once per channel-sample in whatever order the
//! host buffer dictates.

/// Input gain, output volume, and non-finite flushing.
pub mod amplify;
/// Windowed peak amplitude estimate.
pub mod detector;
/// Debounce and refractory state machine.
pub mod trigger;

pub use detector::EnvelopeDetector;
pub use trigger::{TransientTrigger, TriggerCounters, TriggerLimits, TriggerState};
