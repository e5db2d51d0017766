use crate::DETECTION_WINDOW_LEN;

/*
Windowed Peak Detection
=======================

The detector turns a stream of samples into a slowly-updating amplitude
estimate. It is deliberately crude: no attack/release smoothing, no RMS, just
the loudest magnitude seen in the last fixed-size window.

Vocabulary
----------

  magnitude   Absolute value of one sample. Polarity doesn't matter for
              detecting a hit.

  window      A run of DETECTION_WINDOW_LEN (256) consecutive observations.

  max_peak    The running maximum inside the current window. Reset to zero
              at every window boundary.

  amplitude   The published estimate. Only written at a window boundary,
              so consumers see a step function, not a per-sample value.


The Shape
---------

  |x|
    │   ╷      ╷╷                    ╷
    │  ╷│╷    ╷│││    ╷             ╷│╷
    │ ╷│││╷ ╷╷│││││╷ ╷│╷           ╷│││╷
    └───────────────────────────────────→ samples
        ┌──────────┐
  amp   │          └─────────┐       ┌─────
    ────┘                    └───────┘
    |<- 256 ->|<- 256 ->|<- 256 ->|

Each step of the amplitude line is the max of the window before it. At 48 kHz
a window is ~5.3 ms, which is short enough to catch a drum attack and long
enough that the threshold comparison isn't chattering on every zero crossing.


Channel Coupling
----------------

The detector is shared by every channel of a block and is fed in
channel-major order (all of channel 0, then all of channel 1, ...). With a
stereo stream a window therefore spans 128 frames of the left channel, or the
tail of one channel and the head of the next, and detection latency scales
with the channel count.
*/

#[derive(Debug, Clone)]
pub struct EnvelopeDetector {
    max_peak: f32,       // loudest magnitude in the current window
    sample_counter: u32, // observations in the current window
    amplitude: f32,      // last published window peak
}

impl EnvelopeDetector {
    pub fn new() -> Self {
        Self {
            max_peak: 0.0,
            sample_counter: 0,
            amplitude: 0.0,
        }
    }

    /// Feed one sample. Returns `true` when this sample closed a window and a
    /// new amplitude was published.
    #[inline]
    pub fn observe(&mut self, sample: f32) -> bool {
        let magnitude = sample.abs();
        if magnitude > self.max_peak {
            self.max_peak = magnitude;
        }

        self.sample_counter += 1;

        if self.sample_counter >= DETECTION_WINDOW_LEN {
            self.amplitude = self.max_peak;
            self.max_peak = 0.0;
            self.sample_counter = 0;
            return true;
        }

        false
    }

    /// Last published window peak.
    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn max_peak(&self) -> f32 {
        self.max_peak
    }

    pub fn sample_counter(&self) -> u32 {
        self.sample_counter
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for EnvelopeDetector {
    fn default() -> Self {
        Self::new()
    }
}
