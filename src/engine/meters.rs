use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Values the audio thread publishes once per block.
///
/// Display-only: readers get a recent value, not a synchronised one.
#[derive(Debug, Default)]
pub struct EngineMeters {
    amplitude: AtomicU32, // f32 bits
    triggering: AtomicBool,
    fire_count: AtomicU64,
    frames: AtomicU64,
}

impl EngineMeters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published windowed peak.
    pub fn amplitude(&self) -> f32 {
        f32::from_bits(self.amplitude.load(Ordering::Relaxed))
    }

    /// Whether the trigger is inside its mask window.
    pub fn is_triggering(&self) -> bool {
        self.triggering.load(Ordering::Relaxed)
    }

    /// Successful fires since the engine was created.
    pub fn fire_count(&self) -> u64 {
        self.fire_count.load(Ordering::Relaxed)
    }

    /// Frames processed since the engine was created.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn publish(&self, amplitude: f32, triggering: bool, frames: u64) {
        self.amplitude.store(amplitude.to_bits(), Ordering::Relaxed);
        self.triggering.store(triggering, Ordering::Relaxed);
        self.frames.store(frames, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_fire(&self) {
        self.fire_count.fetch_add(1, Ordering::Relaxed);
    }
}
