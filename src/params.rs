//! Lock-free parameter bridge between the control thread and the audio thread.
//!
//! Every parameter is its own atomic. Writers (UI, CLI, preset loader) clamp to
//! the documented range; the audio thread reads each value once per block into
//! a [`ParamSnapshot`]. Reads never block and never tear, but two parameters
//! written together may be observed one block apart.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::TriggerLimits;

/// The six control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    TriggerEnabled,
    Gain,
    Threshold,
    Offset,
    Mask,
    Output,
}

impl ParamId {
    pub const ALL: [ParamId; 6] = [
        ParamId::TriggerEnabled,
        ParamId::Gain,
        ParamId::Threshold,
        ParamId::Offset,
        ParamId::Mask,
        ParamId::Output,
    ];

    /// Stable identifier, used by presets and the CLI.
    pub fn key(self) -> &'static str {
        match self {
            ParamId::TriggerEnabled => "toggle",
            ParamId::Gain => "gain",
            ParamId::Threshold => "threshold",
            ParamId::Offset => "offset",
            ParamId::Mask => "mask",
            ParamId::Output => "output",
        }
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ParamId::TriggerEnabled => 0.0..=1.0,
            ParamId::Gain => 0.0..=6.0,
            ParamId::Threshold => 0.0..=1.0,
            ParamId::Offset => 0.0..=6000.0,
            ParamId::Mask => 1000.0..=50000.0,
            ParamId::Output => 0.0..=2.0,
        }
    }

    pub fn default_value(self) -> f32 {
        match self {
            ParamId::TriggerEnabled => 0.0,
            ParamId::Gain => 1.0,
            ParamId::Threshold => 1.0,
            ParamId::Offset => 512.0,
            ParamId::Mask => 14000.0,
            ParamId::Output => 1.0,
        }
    }

    /// Window parameters only take whole sample counts.
    fn is_stepped(self) -> bool {
        matches!(
            self,
            ParamId::TriggerEnabled | ParamId::Offset | ParamId::Mask
        )
    }

    /// Clamp and quantise a raw value into this parameter's range.
    ///
    /// NaN falls back to the default.
    pub fn sanitize(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default_value();
        }
        let range = self.range();
        let value = value.clamp(*range.start(), *range.end());
        if self.is_stepped() {
            value.round()
        } else {
            value
        }
    }
}

/// Read-only view of the parameters, as seen by the engine.
pub trait ParamSource: Send + Sync {
    fn get(&self, id: ParamId) -> f32;
}

impl<T: ParamSource + ?Sized> ParamSource for Arc<T> {
    fn get(&self, id: ParamId) -> f32 {
        (**self).get(id)
    }
}

/// `f32` stored as its bit pattern.
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Shared parameter store. Wrap in an `Arc` and hand one clone to the engine.
#[derive(Debug)]
pub struct ControlParams {
    trigger_enabled: AtomicBool,
    gain: AtomicF32,
    threshold: AtomicF32,
    offset: AtomicF32,
    mask: AtomicF32,
    output: AtomicF32,
}

impl ControlParams {
    pub fn new() -> Self {
        Self::from_snapshot(&ParamSnapshot::default())
    }

    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        let params = Self {
            trigger_enabled: AtomicBool::new(false),
            gain: AtomicF32::new(ParamId::Gain.default_value()),
            threshold: AtomicF32::new(ParamId::Threshold.default_value()),
            offset: AtomicF32::new(ParamId::Offset.default_value()),
            mask: AtomicF32::new(ParamId::Mask.default_value()),
            output: AtomicF32::new(ParamId::Output.default_value()),
        };
        params.apply(snapshot);
        params
    }

    fn slot(&self, id: ParamId) -> Option<&AtomicF32> {
        match id {
            ParamId::TriggerEnabled => None,
            ParamId::Gain => Some(&self.gain),
            ParamId::Threshold => Some(&self.threshold),
            ParamId::Offset => Some(&self.offset),
            ParamId::Mask => Some(&self.mask),
            ParamId::Output => Some(&self.output),
        }
    }

    /// Store a value, clamped to the parameter's range. Returns what was stored.
    pub fn set(&self, id: ParamId, value: f32) -> f32 {
        let value = id.sanitize(value);
        match self.slot(id) {
            Some(slot) => slot.store(value),
            None => self.trigger_enabled.store(value >= 0.5, Ordering::Relaxed),
        }
        value
    }

    /// Add `delta` to the current value, clamped. Returns the new value.
    pub fn nudge(&self, id: ParamId, delta: f32) -> f32 {
        self.set(id, self.get(id) + delta)
    }

    pub fn set_trigger_enabled(&self, enabled: bool) {
        self.trigger_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Flip trigger output. Returns the new state.
    pub fn toggle_trigger(&self) -> bool {
        !self.trigger_enabled.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot::read(self)
    }

    /// Store every value from a snapshot (each clamped independently).
    pub fn apply(&self, snapshot: &ParamSnapshot) {
        self.set_trigger_enabled(snapshot.trigger_enabled);
        self.set(ParamId::Gain, snapshot.gain);
        self.set(ParamId::Threshold, snapshot.threshold);
        self.set(ParamId::Offset, snapshot.offset);
        self.set(ParamId::Mask, snapshot.mask);
        self.set(ParamId::Output, snapshot.output);
    }
}

impl Default for ControlParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamSource for ControlParams {
    #[inline]
    fn get(&self, id: ParamId) -> f32 {
        match self.slot(id) {
            Some(slot) => slot.load(),
            None => {
                if self.trigger_enabled.load(Ordering::Relaxed) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Plain copy of all six parameters.
///
/// The engine reads one per block; presets store one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamSnapshot {
    #[cfg_attr(feature = "serde", serde(rename = "toggle"))]
    pub trigger_enabled: bool,
    pub gain: f32,
    pub threshold: f32,
    pub offset: f32,
    pub mask: f32,
    pub output: f32,
}

impl ParamSnapshot {
    /// Read each parameter exactly once.
    #[inline]
    pub fn read<P: ParamSource + ?Sized>(source: &P) -> Self {
        Self {
            trigger_enabled: source.get(ParamId::TriggerEnabled) >= 0.5,
            gain: source.get(ParamId::Gain),
            threshold: source.get(ParamId::Threshold),
            offset: source.get(ParamId::Offset),
            mask: source.get(ParamId::Mask),
            output: source.get(ParamId::Output),
        }
    }

    /// Convert the window parameters to whole samples.
    ///
    /// Rounded; negative or NaN windows become 0 rather than wrapping.
    #[inline]
    pub fn trigger_limits(&self) -> TriggerLimits {
        TriggerLimits {
            threshold: self.threshold,
            offset_window: self.offset.round() as u32,
            mask_window: self.mask.round() as u32,
        }
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            trigger_enabled: false,
            gain: ParamId::Gain.default_value(),
            threshold: ParamId::Threshold.default_value(),
            offset: ParamId::Offset.default_value(),
            mask: ParamId::Mask.default_value(),
            output: ParamId::Output.default_value(),
        }
    }
}

impl ParamSource for ParamSnapshot {
    fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::TriggerEnabled => {
                if self.trigger_enabled {
                    1.0
                } else {
                    0.0
                }
            }
            ParamId::Gain => self.gain,
            ParamId::Threshold => self.threshold,
            ParamId::Offset => self.offset,
            ParamId::Mask => self.mask,
            ParamId::Output => self.output,
        }
    }
}

/// What a host needs to restore a session: parameters and the sample path.
///
/// The crate defines no file format; pick any serde format.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub params: ParamSnapshot,
    #[serde(default, rename = "audiofile")]
    pub sample: Option<std::path::PathBuf>,
}
