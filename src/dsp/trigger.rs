/*
Transient Trigger
=================

Consumes the detector's amplitude and decides when a hit has happened. Two
counters do all the work: one debounces the crossing, the other enforces a
refractory period after each fire.

Vocabulary
----------

  threshold      Amplitude the detector must exceed for a sample to count
                 as "above".

  offset window  Debounce length in samples. The signal has to stay above
                 threshold this long before the crossing is confirmed.
                 Zero disables the debounce entirely.

  offset peak    Loudest magnitude seen while counting the offset window.
                 Becomes the playback gain of the hit.

  mask window    Refractory length in samples. After a fire nothing else can
                 fire until the mask counter wraps.

  confirmation   The offset counter reached the offset window. A
                 confirmation becomes a fire only if the trigger is Idle.


The State Machine
-----------------

    ┌──────┐   confirmation    ┌────────────┐
    │ Idle │ ────────────────→ │ Triggering │
    └──────┘                   └────────────┘
        ↑                             │
        │   mask counter >= mask      │
        └─────────────────────────────┘

Per sample, in this order:

  1. above threshold?  bump offset counter, track offset peak.
       confirmed?      capture fired gain, clear offset peak, try to fire,
                       clear offset counter.
     below?            clear offset counter (offset peak is left alone).
  2. bump mask counter; wrap it and go Idle when it reaches the mask window.

The mask counter runs all the time, not just while Triggering. Confirmations
that land while Triggering are dropped, never queued.

The offset timer is not touched by masking. On a held signal it keeps
confirming every `offset` samples whether or not those confirmations can fire.
*/

/// The two states of the refractory machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,       // ready to fire on the next confirmation
    Triggering, // inside the mask window after a fire
}

/// Per-block view of the trigger parameters, already converted to samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerLimits {
    pub threshold: f32,
    pub offset_window: u32,
    pub mask_window: u32,
}

/// Plain copy of the trigger's internal counters, for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerCounters {
    pub offset_peak: f32,
    pub offset_counter: u32,
    pub mask_counter: u32,
    pub state: TriggerState,
    pub fired_gain: f32,
}

#[derive(Debug, Clone)]
pub struct TransientTrigger {
    offset_peak: f32,    // loudest magnitude while above threshold
    offset_counter: u32, // consecutive samples above threshold
    mask_counter: u32,   // samples since last fire or mask wrap
    state: TriggerState,
    fired_gain: f32, // offset peak captured at the last confirmation
}

impl TransientTrigger {
    pub fn new() -> Self {
        Self {
            offset_peak: 0.0,
            offset_counter: 0,
            mask_counter: 0,
            state: TriggerState::Idle,
            fired_gain: 0.0,
        }
    }

    /// Advance by one sample.
    ///
    /// `sample` is the raw (post input gain) value and `amplitude` the
    /// detector's estimate after observing it. Returns the gain of the hit
    /// when this sample fired.
    #[inline]
    pub fn process(&mut self, sample: f32, amplitude: f32, limits: &TriggerLimits) -> Option<f32> {
        let mut fired = None;

        if amplitude > limits.threshold {
            let magnitude = sample.abs();
            if magnitude > self.offset_peak {
                self.offset_peak = magnitude;
            }

            self.offset_counter += 1;

            if self.offset_counter >= limits.offset_window {
                self.fired_gain = self.offset_peak;
                self.offset_peak = 0.0;

                if self.mask_counter < limits.mask_window
                    && self.state == TriggerState::Idle
                {
                    self.state = TriggerState::Triggering;
                    self.mask_counter = 0;
                    fired = Some(self.fired_gain);
                }

                self.offset_counter = 0;
            }
        } else {
            self.offset_counter = 0;
        }

        self.mask_counter += 1;

        if self.mask_counter >= limits.mask_window {
            self.state = TriggerState::Idle;
            self.mask_counter = 0;
        }

        fired
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_triggering(&self) -> bool {
        self.state == TriggerState::Triggering
    }

    /// Gain captured at the most recent confirmation (fired or dropped).
    pub fn fired_gain(&self) -> f32 {
        self.fired_gain
    }

    pub fn counters(&self) -> TriggerCounters {
        TriggerCounters {
            offset_peak: self.offset_peak,
            offset_counter: self.offset_counter,
            mask_counter: self.mask_counter,
            state: self.state,
            fired_gain: self.fired_gain,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for TransientTrigger {
    fn default() -> Self {
        Self::new()
    }
}
