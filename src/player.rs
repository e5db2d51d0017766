//! One-shot sample playback.

/*
One-Shot Player
===============

The player is the engine's only sound source besides the live input. It is
told three things by the dispatcher on every hit: the gain, "go back to the
start", and "play". Everything else (where the data came from, what rate it
was recorded at) is settled before the data ever reaches the audio thread.

Vocabulary
----------

  source      Immutable, already-decoded interleaved f32 frames plus their
              channel count and sample rate. Shared as `Arc<SampleSource>`.

  position    Read head, in source frames. Fractional, because the source
              rate and the output rate rarely match.

  step        Source frames advanced per output frame:
                step = source_rate / output_rate

  gain ramp   When the gain changes between blocks, it is interpolated
              linearly across the next block instead of jumping. A hard
              jump at a hit boundary clicks.


Rate Conversion
---------------

Linear interpolation between the two nearest source frames:

    idx  = floor(position)
    frac = position - idx
    out  = s[idx] + (s[idx + 1] - s[idx]) * frac

Past the last frame the player stops itself and renders silence, so a short
drum sample ends cleanly even while the engine is still masked.


Channel Mapping
---------------

Output channel `ch` reads source channel `ch % source_channels`. A mono
sample feeds every output channel; a stereo sample into a mono output plays
its left channel.
*/

use std::sync::Arc;

/// Decoded sample data, built off the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSource {
    samples: Vec<f32>, // interleaved
    channels: usize,
    sample_rate: f32,
    frames: usize,
}

impl SampleSource {
    /// Wrap interleaved samples. A trailing partial frame is dropped.
    pub fn from_interleaved(mut samples: Vec<f32>, channels: usize, sample_rate: f32) -> Self {
        let channels = channels.max(1);
        let frames = samples.len() / channels;
        samples.truncate(frames * channels);

        Self {
            samples,
            channels,
            sample_rate,
            frames,
        }
    }

    pub fn from_mono(samples: Vec<f32>, sample_rate: f32) -> Self {
        Self::from_interleaved(samples, 1, sample_rate)
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate > 0.0 {
            self.frames as f64 / self.sample_rate as f64
        } else {
            0.0
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    fn frame_sample(&self, frame: usize, channel: usize) -> f32 {
        self.samples[frame * self.channels + channel % self.channels]
    }
}

/// What the engine needs from a sample player.
///
/// Every method except `load_source` runs on the audio thread and must not
/// allocate, lock, or free memory. `load_source` hands back the previous
/// source so the caller decides where it gets dropped.
pub trait SamplePlayer: Send {
    /// Set the output sample rate. Called before processing starts.
    fn prepare(&mut self, _sample_rate: f32) {}

    /// Swap the source. Playback stops and rewinds. Returns the old source.
    fn load_source(&mut self, source: Option<Arc<SampleSource>>) -> Option<Arc<SampleSource>>;

    fn set_gain(&mut self, gain: f32);

    /// Seek, in seconds from the start of the source.
    fn set_position(&mut self, seconds: f64);

    fn start(&mut self);

    fn stop(&mut self);

    /// Overwrite `out` (interleaved, `channels` wide) with the next block.
    ///
    /// Renders silence when nothing is loaded or playback is stopped.
    fn render_block(&mut self, out: &mut [f32], channels: usize);

    fn is_playing(&self) -> bool;
}

/// Plays a source once from the current position, then stops.
pub struct OneShotPlayer {
    source: Option<Arc<SampleSource>>,
    output_rate: f32,
    position: f64, // in source frames
    step: f64,     // source frames per output frame
    gain: f32,
    last_gain: f32, // gain at the end of the previous block
    playing: bool,
}

impl OneShotPlayer {
    pub fn new(output_rate: f32) -> Self {
        Self {
            source: None,
            output_rate,
            position: 0.0,
            step: 1.0,
            gain: 1.0,
            last_gain: 1.0,
            playing: false,
        }
    }

    pub fn source(&self) -> Option<&Arc<SampleSource>> {
        self.source.as_ref()
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Read head in seconds.
    pub fn position_secs(&self) -> f64 {
        match &self.source {
            Some(src) if src.sample_rate > 0.0 => self.position / src.sample_rate as f64,
            _ => 0.0,
        }
    }

    fn update_step(&mut self) {
        self.step = match &self.source {
            Some(src) if src.sample_rate > 0.0 && self.output_rate > 0.0 => {
                src.sample_rate as f64 / self.output_rate as f64
            }
            _ => 1.0,
        };
    }
}

impl SamplePlayer for OneShotPlayer {
    fn prepare(&mut self, sample_rate: f32) {
        self.output_rate = sample_rate;
        self.update_step();
    }

    fn load_source(&mut self, source: Option<Arc<SampleSource>>) -> Option<Arc<SampleSource>> {
        self.playing = false;
        self.position = 0.0;
        let old = std::mem::replace(&mut self.source, source);
        self.update_step();
        old
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = if gain.is_finite() { gain } else { 0.0 };
    }

    fn set_position(&mut self, seconds: f64) {
        let rate = self.source.as_ref().map_or(0.0, |src| src.sample_rate as f64);
        let frames = seconds * rate;
        self.position = if frames.is_finite() { frames.max(0.0) } else { 0.0 };
    }

    fn start(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn render_block(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let frames = out.len() / channels;

        let Some(src) = self.source.as_deref() else {
            out.fill(0.0);
            self.last_gain = self.gain;
            return;
        };
        if !self.playing || src.frames == 0 || frames == 0 {
            out.fill(0.0);
            self.last_gain = self.gain;
            return;
        }

        let start_gain = self.last_gain;
        let gain_delta = (self.gain - start_gain) / frames as f32;
        let last_frame = src.frames - 1;
        let mut rendered = frames;

        for (i, frame) in out.chunks_exact_mut(channels).enumerate() {
            if self.position > last_frame as f64 {
                rendered = i;
                break;
            }

            let idx = self.position as usize;
            let frac = (self.position - idx as f64) as f32;
            let next = (idx + 1).min(last_frame);
            let g = start_gain + gain_delta * i as f32;

            for (ch, out_sample) in frame.iter_mut().enumerate() {
                let a = src.frame_sample(idx, ch);
                let b = src.frame_sample(next, ch);
                *out_sample = (a + (b - a) * frac) * g;
            }

            self.position += self.step;
        }

        if rendered < frames {
            out[rendered * channels..].fill(0.0);
            self.playing = false;
        }
        // partial trailing frame, if the caller passed one
        out[frames * channels..].fill(0.0);

        self.last_gain = self.gain;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
