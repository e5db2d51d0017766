pub mod dsp; // Detector and trigger state machine
pub mod engine; // Per-block composition and control handle
pub mod io;
pub mod params; // Lock-free parameter bridge
pub mod player; // One-shot sample playback

pub use engine::{Engine, EngineConfig, EngineError, EngineHandle, EngineMeters, TriggerEvent};
pub use params::{ControlParams, ParamId, ParamSnapshot, ParamSource};
pub use player::{OneShotPlayer, SamplePlayer, SampleSource};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Samples per envelope detection window.
pub const DETECTION_WINDOW_LEN: u32 = 256;
