use std::sync::Arc;

use crate::player::SampleSource;

/// Control-thread requests, applied at the start of the next block.
#[derive(Debug, Clone)]
pub enum EngineMessage {
    /// Swap the player's source. `None` unloads it.
    LoadSource(Option<Arc<SampleSource>>),
    /// Restart the sample at audition gain, if trigger output is enabled.
    Audition,
    /// Stop playback.
    Stop,
}

/// A fired trigger, reported to the control thread for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    /// Frame index since the engine started, of the sample that fired.
    pub frame: u64,
    /// Peak magnitude captured during the offset window.
    pub gain: f32,
    /// Whether the player was actually restarted (trigger output enabled).
    pub played: bool,
}
