//! UI-side state
//!
//! Everything here lives on the UI thread. The audio thread only ever talks
//! to it through the engine handle's rings and meters.

use std::collections::VecDeque;

use anydrum::TriggerEvent;

/// Static state captured once at startup (can allocate)
#[derive(Clone, Debug)]
pub struct UiStateInit {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Output channels
    pub channels: usize,
    /// Input channels
    pub input_channels: usize,
}

/// Most recent hits, newest first
pub struct HitLog {
    entries: VecDeque<TriggerEvent>,
    capacity: usize,
    total: u64,
}

impl HitLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    pub fn push(&mut self, event: TriggerEvent) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(event);
        self.total += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerEvent> {
        self.entries.iter()
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Peak and RMS of the scope buffer
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Convert a sample count to milliseconds
pub fn samples_to_ms(samples: f32, sample_rate: f32) -> f32 {
    if sample_rate > 0.0 {
        samples * 1000.0 / sample_rate
    } else {
        0.0
    }
}
