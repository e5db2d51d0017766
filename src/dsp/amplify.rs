//! Gain staging helpers.

/*
Gain Staging
============

The engine touches levels at exactly two points: input gain before
detection, and output volume at the very end. Both are plain multiplies.

  input gain    Scales the live signal before the detector sees it. Raising
                it makes quiet hits cross the threshold, so it doubles as a
                sensitivity control.

  output volume Scales whatever leaves the engine (live input or the
                substituted sample).

Neither stage can report an error to anyone, so both flush non-finite
results (NaN, ±inf) to silence instead of letting them reach the detector or
the host.
*/

/// Multiply by `gain` in place, replacing NaN and infinite results with 0.0.
#[inline]
pub fn apply_gain_flushed(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        let scaled = *sample * gain;
        *sample = if scaled.is_finite() { scaled } else { 0.0 };
    }
}
