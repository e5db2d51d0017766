//! The realtime engine: detection, triggering, and output composition.
//!
//! [`Engine`] lives on the audio thread; [`EngineHandle`] is its control-side
//! counterpart. They talk only through fixed-capacity `rtrb` rings and the
//! atomics in [`ControlParams`](crate::params::ControlParams) and
//! [`EngineMeters`], so nothing on the audio path allocates or blocks.
//!
//! Per block:
//!
//! ```text
//!   input ──► × gain ──► detector ──► trigger ──► dispatch ──► player
//!                │                                               │
//!                └──────── (trigger off) ──┐      (trigger on) ──┘
//!                                          ▼
//!                                     × output ──► out
//! ```

pub mod handle;
pub mod message;
pub mod meters;

use std::sync::Arc;

use rtrb::{Consumer, Producer, RingBuffer};

pub use handle::{EngineError, EngineHandle};
pub use message::{EngineMessage, TriggerEvent};
pub use meters::EngineMeters;

use crate::{
    dsp::{amplify, EnvelopeDetector, TransientTrigger, TriggerLimits},
    params::{ParamSnapshot, ParamSource},
    player::{OneShotPlayer, SamplePlayer, SampleSource},
    MAX_BLOCK_SIZE,
};

/// Player gain used by [`EngineHandle::audition`].
pub const AUDITION_GAIN: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Channels per frame. Fixed for the engine's lifetime.
    pub channels: usize,
    /// Largest block processed in one pass; longer blocks are chunked.
    pub max_block_size: usize,
    /// Capacity of the control → audio message ring.
    pub message_capacity: usize,
    /// Capacity of the trigger event ring. Zero disables events.
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels: 2,
            max_block_size: MAX_BLOCK_SIZE,
            message_capacity: 16,
            event_capacity: 64,
        }
    }
}

/// All mutable detection state, advanced one channel-sample at a time.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    pub detector: EnvelopeDetector,
    pub trigger: TransientTrigger,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one sample. Returns the hit gain when it fired.
    #[inline]
    pub fn step(&mut self, sample: f32, limits: &TriggerLimits) -> Option<f32> {
        self.detector.observe(sample);
        self.trigger
            .process(sample, self.detector.amplitude(), limits)
    }

    pub fn amplitude(&self) -> f32 {
        self.detector.amplitude()
    }

    pub fn is_triggering(&self) -> bool {
        self.trigger.is_triggering()
    }
}

/// Restart the player for a hit. Returns whether playback was started.
///
/// With trigger output disabled this does nothing; the trigger's bookkeeping
/// has already advanced either way.
#[inline]
pub fn dispatch<S: SamplePlayer + ?Sized>(player: &mut S, trigger_enabled: bool, gain: f32) -> bool {
    if !trigger_enabled {
        return false;
    }
    player.set_gain(gain);
    player.set_position(0.0);
    player.start();
    true
}

pub struct Engine<P, S = OneShotPlayer> {
    params: P,
    player: S,
    state: EngineState,
    channels: usize,
    max_block_size: usize,
    meters: Arc<EngineMeters>,
    rx: Consumer<EngineMessage>,
    retired_tx: Producer<Arc<SampleSource>>,
    events_tx: Option<Producer<TriggerEvent>>,
    scratch: Vec<f32>, // interleaved player output for planar blocks
    frame_counter: u64,
}

impl<P: ParamSource> Engine<P> {
    /// Build an engine with a [`OneShotPlayer`] and its control handle.
    pub fn new(config: EngineConfig, params: P) -> (Self, EngineHandle) {
        let player = OneShotPlayer::new(config.sample_rate);
        Self::with_player(config, params, player)
    }
}

impl<P: ParamSource, S: SamplePlayer> Engine<P, S> {
    pub fn with_player(config: EngineConfig, params: P, mut player: S) -> (Self, EngineHandle) {
        let channels = config.channels.max(1);
        let max_block_size = config.max_block_size.max(1);
        let message_capacity = config.message_capacity.max(1);

        player.prepare(config.sample_rate);

        let (tx, rx) = RingBuffer::new(message_capacity);
        // one slot per possible LoadSource, plus the one already loaded
        let (retired_tx, retired_rx) = RingBuffer::new(message_capacity + 1);
        let (events_tx, events_rx) = if config.event_capacity > 0 {
            let (tx, rx) = RingBuffer::new(config.event_capacity);
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };
        let meters = Arc::new(EngineMeters::new());

        let engine = Self {
            params,
            player,
            state: EngineState::new(),
            channels,
            max_block_size,
            meters: Arc::clone(&meters),
            rx,
            retired_tx,
            events_tx,
            scratch: vec![0.0; max_block_size * channels],
            frame_counter: 0,
        };
        let handle = EngineHandle::new(tx, retired_rx, events_rx, meters);

        (engine, handle)
    }

    /// Process an interleaved block in place.
    pub fn process_interleaved(&mut self, data: &mut [f32]) {
        let snapshot = ParamSnapshot::read(&self.params);
        self.drain_messages(snapshot.trigger_enabled);

        let chunk_len = self.max_block_size * self.channels;
        for chunk in data.chunks_mut(chunk_len) {
            self.process_interleaved_chunk(chunk, &snapshot);
        }

        self.publish();
    }

    /// Process one buffer per channel in place.
    ///
    /// Only the frames every channel buffer has are processed. Longer buffers
    /// have their tail cleared, and buffers beyond the configured channel
    /// count are cleared entirely.
    pub fn process_planar(&mut self, buffers: &mut [&mut [f32]]) {
        let snapshot = ParamSnapshot::read(&self.params);
        self.drain_messages(snapshot.trigger_enabled);

        let channels = buffers.len().min(self.channels);
        let frames = buffers[..channels]
            .iter()
            .map(|b| b.len())
            .min()
            .unwrap_or(0);

        let mut start = 0;
        while start < frames {
            let end = (start + self.max_block_size).min(frames);
            self.process_planar_chunk(&mut buffers[..channels], start, end, &snapshot);
            start = end;
        }

        for buf in buffers[..channels].iter_mut() {
            buf[frames..].fill(0.0);
        }
        for buf in buffers.iter_mut().skip(channels) {
            buf.fill(0.0);
        }

        self.publish();
    }

    fn process_interleaved_chunk(&mut self, chunk: &mut [f32], snapshot: &ParamSnapshot) {
        let channels = self.channels;
        let frames = chunk.len() / channels;
        let limits = snapshot.trigger_limits();

        amplify::apply_gain_flushed(chunk, snapshot.gain);

        // channel-major, sharing one detector across channels
        for ch in 0..channels {
            for frame in 0..frames {
                let sample = chunk[frame * channels + ch];
                self.step(sample, frame, &limits, snapshot.trigger_enabled);
            }
        }

        if snapshot.trigger_enabled {
            self.player.render_block(chunk, channels);
        }

        amplify::apply_gain_flushed(chunk, snapshot.output);
        self.frame_counter += frames as u64;
    }

    fn process_planar_chunk(
        &mut self,
        buffers: &mut [&mut [f32]],
        start: usize,
        end: usize,
        snapshot: &ParamSnapshot,
    ) {
        let channels = buffers.len();
        let frames = end - start;
        let limits = snapshot.trigger_limits();

        for buf in buffers.iter_mut() {
            let block = &mut buf[start..end];
            amplify::apply_gain_flushed(block, snapshot.gain);
            for (frame, &sample) in block.iter().enumerate() {
                self.step(sample, frame, &limits, snapshot.trigger_enabled);
            }
        }

        if snapshot.trigger_enabled {
            let scratch = &mut self.scratch[..frames * channels];
            self.player.render_block(scratch, channels);

            for (ch, buf) in buffers.iter_mut().enumerate() {
                for (i, sample) in buf[start..end].iter_mut().enumerate() {
                    *sample = scratch[i * channels + ch];
                }
            }
        }

        for buf in buffers.iter_mut() {
            amplify::apply_gain_flushed(&mut buf[start..end], snapshot.output);
        }

        self.frame_counter += frames as u64;
    }

    #[inline]
    fn step(&mut self, sample: f32, frame: usize, limits: &TriggerLimits, trigger_enabled: bool) {
        let Some(gain) = self.state.step(sample, limits) else {
            return;
        };

        let played = dispatch(&mut self.player, trigger_enabled, gain);
        self.meters.record_fire();

        if let Some(tx) = self.events_tx.as_mut() {
            // dropped when the control side falls behind
            let _ = tx.push(TriggerEvent {
                frame: self.frame_counter + frame as u64,
                gain,
                played,
            });
        }
    }

    fn drain_messages(&mut self, trigger_enabled: bool) {
        while let Ok(msg) = self.rx.pop() {
            match msg {
                EngineMessage::LoadSource(source) => {
                    if let Some(old) = self.player.load_source(source) {
                        // only fails if the handle never collects; the Arc then drops here
                        let _ = self.retired_tx.push(old);
                    }
                }
                EngineMessage::Audition => {
                    dispatch(&mut self.player, trigger_enabled, AUDITION_GAIN);
                }
                EngineMessage::Stop => self.player.stop(),
            }
        }
    }

    fn publish(&self) {
        self.meters.publish(
            self.state.amplitude(),
            self.state.is_triggering(),
            self.frame_counter,
        );
    }

    /// Change the output sample rate. Call from the same thread as processing.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.player.prepare(sample_rate);
    }

    /// Clear detection state. Parameters, player, and counters are untouched.
    pub fn reset(&mut self) {
        self.state = EngineState::new();
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn player(&self) -> &S {
        &self.player
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn meters(&self) -> &Arc<EngineMeters> {
        &self.meters
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn amplitude(&self) -> f32 {
        self.state.amplitude()
    }

    pub fn is_triggering(&self) -> bool {
        self.state.is_triggering()
    }

    /// Frames processed since the engine was created.
    pub fn frames_processed(&self) -> u64 {
        self.frame_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ControlParams, ParamId};
    use crate::DETECTION_WINDOW_LEN;

    const WINDOW: usize = DETECTION_WINDOW_LEN as usize;

    /// Remembers the gain of every start; renders 1.0 while playing.
    #[derive(Default)]
    struct RecordingPlayer {
        starts: Vec<f32>,
        gain: f32,
        position: f64,
        playing: bool,
    }

    impl SamplePlayer for RecordingPlayer {
        fn load_source(&mut self, _source: Option<Arc<SampleSource>>) -> Option<Arc<SampleSource>> {
            None
        }

        fn set_gain(&mut self, gain: f32) {
            self.gain = gain;
        }

        fn set_position(&mut self, seconds: f64) {
            self.position = seconds;
        }

        fn start(&mut self) {
            assert_eq!(self.position, 0.0, "hits always restart from zero");
            self.starts.push(self.gain);
            self.playing = true;
        }

        fn stop(&mut self) {
            self.playing = false;
        }

        fn render_block(&mut self, out: &mut [f32], _channels: usize) {
            out.fill(if self.playing { 1.0 } else { 0.0 });
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    fn mono_config() -> EngineConfig {
        EngineConfig {
            channels: 1,
            ..EngineConfig::default()
        }
    }

    fn params(threshold: f32, offset: f32, mask: f32, enabled: bool) -> Arc<ControlParams> {
        let params = Arc::new(ControlParams::new());
        params.set(ParamId::Threshold, threshold);
        params.set(ParamId::Offset, offset);
        params.set(ParamId::Mask, mask);
        params.set_trigger_enabled(enabled);
        params
    }

    /// Snapshot-backed params so windows outside the UI range can be used.
    fn raw_params(threshold: f32, offset: f32, mask: f32, enabled: bool) -> ParamSnapshot {
        ParamSnapshot {
            trigger_enabled: enabled,
            threshold,
            offset,
            mask,
            ..ParamSnapshot::default()
        }
    }

    fn drain_events(handle: &mut EngineHandle) -> Vec<TriggerEvent> {
        std::iter::from_fn(|| handle.pop_event()).collect()
    }

    #[test]
    fn passthrough_when_trigger_disabled() {
        let params = params(1.0, 0.0, 1000.0, false);
        params.set(ParamId::Gain, 2.0);
        params.set(ParamId::Output, 0.5);
        let (mut engine, _handle) = Engine::new(mono_config(), Arc::clone(&params));

        let mut block = [0.1, -0.2, 0.3, -0.4];
        engine.process_interleaved(&mut block);

        assert_eq!(block, [0.1, -0.2, 0.3, -0.4]);
    }

    #[test]
    fn enabled_trigger_substitutes_whole_block() {
        let params = params(1.0, 0.0, 1000.0, true);
        let (mut engine, _handle) = Engine::new(mono_config(), params);

        let mut block = [0.4f32; 64];
        engine.process_interleaved(&mut block);

        assert_eq!(block, [0.0; 64], "nothing loaded, nothing playing");
    }

    #[test]
    fn quiet_input_never_fires() {
        let (mut engine, mut handle) = Engine::with_player(
            mono_config(),
            raw_params(0.5, 0.0, 100.0, true),
            RecordingPlayer::default(),
        );

        let mut block = vec![0.0f32; 512];
        for _ in 0..40 {
            for (i, s) in block.iter_mut().enumerate() {
                *s = if i % 3 == 0 { 0.5 } else { -0.49 };
            }
            engine.process_interleaved(&mut block);
            assert!(!engine.is_triggering());
        }

        assert!(engine.player().starts.is_empty());
        assert!(drain_events(&mut handle).is_empty());
    }

    /// 0.9 held after the detector has published its first window.
    ///
    /// Crossing starts on sample 256 (the first window boundary). Measured
    /// from there, fires land at 50, 150 and 250; the confirmation at 100 is
    /// masked and dropped.
    #[test]
    fn held_signal_refires_after_mask_wraps() {
        let (mut engine, mut handle) = Engine::with_player(
            mono_config(),
            raw_params(0.5, 50.0, 100.0, true),
            RecordingPlayer::default(),
        );

        let mut block = vec![0.9f32; WINDOW + 300];
        engine.process_interleaved(&mut block);

        let frames: Vec<u64> = drain_events(&mut handle).iter().map(|e| e.frame).collect();
        let crossing = (WINDOW - 1) as u64;
        assert_eq!(frames, vec![crossing + 49, crossing + 149, crossing + 249]);
        assert_eq!(engine.player().starts, vec![0.9, 0.9, 0.9]);
    }

    #[test]
    fn zero_offset_fires_at_first_boundary() {
        let (mut engine, mut handle) = Engine::with_player(
            mono_config(),
            raw_params(0.5, 0.0, 14000.0, true),
            RecordingPlayer::default(),
        );

        let mut block = vec![0.8f32; WINDOW];
        engine.process_interleaved(&mut block);

        let events = drain_events(&mut handle);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame, (WINDOW - 1) as u64);
        assert_eq!(events[0].gain, 0.8);
        assert!(events[0].played);
    }

    #[test]
    fn disabled_output_keeps_identical_bookkeeping() {
        let (mut on, mut on_handle) = Engine::with_player(
            mono_config(),
            raw_params(0.3, 20.0, 1500.0, true),
            RecordingPlayer::default(),
        );
        let (mut off, mut off_handle) = Engine::with_player(
            mono_config(),
            raw_params(0.3, 20.0, 1500.0, false),
            RecordingPlayer::default(),
        );

        for n in 0..64 {
            let mut a: Vec<f32> = (0..128)
                .map(|i| if (n * 128 + i) % 3000 < 700 { 0.8 } else { 0.05 })
                .collect();
            let mut b = a.clone();

            on.process_interleaved(&mut a);
            off.process_interleaved(&mut b);

            assert_eq!(on.state().trigger.counters(), off.state().trigger.counters());
            assert_eq!(on.amplitude(), off.amplitude());
        }

        let on_events = drain_events(&mut on_handle);
        let off_events = drain_events(&mut off_handle);
        assert!(!on_events.is_empty());
        assert_eq!(on_events.len(), off_events.len());
        for (a, b) in on_events.iter().zip(&off_events) {
            assert_eq!((a.frame, a.gain), (b.frame, b.gain));
            assert!(a.played && !b.played);
        }
        assert!(off.player().starts.is_empty());
        assert_eq!(on.meters().fire_count(), off.meters().fire_count());
    }

    #[test]
    fn channels_share_one_detector() {
        let config = EngineConfig {
            channels: 2,
            ..EngineConfig::default()
        };
        let (mut engine, _handle) = Engine::new(config, raw_params(1.0, 0.0, 1000.0, false));

        // 128 stereo frames are 256 detector observations
        let mut block: Vec<f32> = (0..WINDOW).map(|i| if i % 2 == 0 { 0.2 } else { -0.7 }).collect();
        engine.process_interleaved(&mut block);

        assert_eq!(engine.amplitude(), 0.7);
        assert_eq!(engine.frames_processed(), (WINDOW / 2) as u64);
    }

    #[test]
    fn amplitude_tracks_post_gain_signal() {
        let params = params(1.0, 0.0, 1000.0, false);
        params.set(ParamId::Gain, 2.0);
        let (mut engine, handle) = Engine::new(mono_config(), params);

        let mut block = vec![0.25f32; WINDOW];
        engine.process_interleaved(&mut block);

        assert_eq!(engine.amplitude(), 0.5);
        assert_eq!(handle.meters().amplitude(), 0.5);
    }

    #[test]
    fn non_finite_input_is_contained() {
        let (mut engine, _handle) = Engine::new(mono_config(), raw_params(0.5, 0.0, 1000.0, false));

        let mut block = vec![f32::NAN; WINDOW];
        block[3] = f32::INFINITY;
        block[7] = 0.3;
        engine.process_interleaved(&mut block);

        assert!(block.iter().all(|s| s.is_finite()));
        assert_eq!(engine.amplitude(), 0.3);
        assert!(!engine.is_triggering());
    }

    #[test]
    fn long_blocks_are_chunked() {
        let config = EngineConfig {
            channels: 1,
            max_block_size: 64,
            ..EngineConfig::default()
        };
        let (mut engine, _handle) = Engine::new(config, raw_params(1.0, 0.0, 1000.0, false));

        let mut block = vec![0.5f32; 1000];
        engine.process_interleaved(&mut block);

        assert_eq!(engine.frames_processed(), 1000);
        assert!(block.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn planar_matches_interleaved_in_mono() {
        let p = raw_params(0.4, 10.0, 1200.0, false);
        let (mut a, mut a_handle) = Engine::new(mono_config(), p);
        let (mut b, mut b_handle) = Engine::new(mono_config(), p);

        let signal: Vec<f32> = (0..4096).map(|i| ((i / 300) % 2) as f32 * 0.9).collect();
        let mut interleaved = signal.clone();
        let mut planar = signal;

        a.process_interleaved(&mut interleaved);
        b.process_planar(&mut [planar.as_mut_slice()]);

        assert_eq!(interleaved, planar);
        assert_eq!(drain_events(&mut a_handle), drain_events(&mut b_handle));
    }

    #[test]
    fn planar_substitutes_every_channel() {
        let config = EngineConfig {
            channels: 2,
            ..EngineConfig::default()
        };
        let (mut engine, _handle) = Engine::with_player(
            config,
            raw_params(0.5, 0.0, 1000.0, true),
            RecordingPlayer::default(),
        );

        let mut left = vec![0.9f32; WINDOW];
        let mut right = vec![0.9f32; WINDOW];
        let mut spare = vec![0.3f32; WINDOW];
        engine.process_planar(&mut [
            left.as_mut_slice(),
            right.as_mut_slice(),
            spare.as_mut_slice(),
        ]);

        assert_eq!(engine.player().starts.len(), 1);
        assert!(left.iter().chain(&right).all(|&s| s == 1.0));
        assert!(spare.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn planar_tail_past_shortest_buffer_is_cleared() {
        let config = EngineConfig {
            channels: 2,
            ..EngineConfig::default()
        };
        let snap = ParamSnapshot {
            output: 0.5,
            ..raw_params(1.0, 0.0, 1000.0, false)
        };
        let (mut engine, _handle) = Engine::new(config, snap);

        let mut left = vec![0.4f32; 8];
        let mut right = vec![0.4f32; 4];
        engine.process_planar(&mut [left.as_mut_slice(), right.as_mut_slice()]);

        assert_eq!(left, [0.2, 0.2, 0.2, 0.2, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(right, [0.2; 4]);
        assert_eq!(engine.frames_processed(), 4);
    }

    #[test]
    fn output_volume_scales_substituted_sample() {
        let snap = ParamSnapshot {
            output: 0.5,
            ..raw_params(0.5, 0.0, 1000.0, true)
        };
        let (mut engine, _handle) =
            Engine::with_player(mono_config(), snap, RecordingPlayer::default());

        let mut block = vec![0.9f32; WINDOW];
        engine.process_interleaved(&mut block);

        assert_eq!(engine.player().starts.len(), 1);
        assert!(block.iter().all(|&s| s == 0.5), "{block:?}");
    }

    #[test]
    fn loaded_sample_plays_at_fired_gain() {
        let (mut engine, mut handle) = Engine::new(mono_config(), raw_params(0.5, 0.0, 1000.0, true));
        let source = Arc::new(SampleSource::from_mono(vec![1.0; 1024], 48_000.0));
        handle.load_source(source).unwrap();

        // fires on the last sample of the first window; the player then
        // renders the whole block, ramping from its previous gain
        let mut block = vec![0.75f32; WINDOW];
        engine.process_interleaved(&mut block);
        assert!(engine.player().is_playing());
        assert_eq!(block[0], 1.0);
        assert!(block.iter().all(|&s| (0.75..=1.0).contains(&s)));

        let mut block = vec![0.0f32; 16];
        engine.process_interleaved(&mut block);
        assert!(block.iter().all(|&s| (s - 0.75).abs() < 1e-6), "{block:?}");
    }

    #[test]
    fn swapped_sources_are_retired_to_handle() {
        let (mut engine, mut handle) = Engine::new(mono_config(), raw_params(1.0, 0.0, 1000.0, false));
        let mut block = [0.0f32; 8];

        handle
            .load_source(Arc::new(SampleSource::from_mono(vec![0.1; 8], 48_000.0)))
            .unwrap();
        engine.process_interleaved(&mut block);
        assert_eq!(handle.collect_retired(), 0);

        handle
            .load_source(Arc::new(SampleSource::from_mono(vec![0.2; 8], 48_000.0)))
            .unwrap();
        engine.process_interleaved(&mut block);
        assert_eq!(handle.collect_retired(), 1);

        handle.unload_source().unwrap();
        engine.process_interleaved(&mut block);
        assert_eq!(handle.collect_retired(), 1);
        assert!(engine.player().source().is_none());
    }

    #[test]
    fn audition_needs_trigger_output() {
        let params = params(1.0, 0.0, 1000.0, false);
        let (mut engine, mut handle) = Engine::with_player(
            mono_config(),
            Arc::clone(&params),
            RecordingPlayer::default(),
        );

        handle.audition().unwrap();
        engine.process_interleaved(&mut [0.0; 4]);
        assert!(engine.player().starts.is_empty());

        params.set_trigger_enabled(true);
        handle.audition().unwrap();
        engine.process_interleaved(&mut [0.0; 4]);
        assert_eq!(engine.player().starts, vec![AUDITION_GAIN]);

        handle.stop().unwrap();
        let mut block = [0.5f32; 4];
        engine.process_interleaved(&mut block);
        assert_eq!(block, [0.0; 4]);
    }

    #[test]
    fn full_message_ring_reports_error() {
        let config = EngineConfig {
            message_capacity: 2,
            ..mono_config()
        };
        let (_engine, mut handle) = Engine::new(config, raw_params(1.0, 0.0, 1000.0, false));

        handle.stop().unwrap();
        handle.stop().unwrap();
        assert!(matches!(handle.stop(), Err(EngineError::MessageQueueFull)));
    }

    #[test]
    fn meters_follow_trigger_state() {
        let (mut engine, handle) = Engine::with_player(
            mono_config(),
            raw_params(0.5, 0.0, 2000.0, false),
            RecordingPlayer::default(),
        );

        let mut block = vec![0.9f32; WINDOW];
        engine.process_interleaved(&mut block);
        assert!(handle.meters().is_triggering());
        assert_eq!(handle.meters().fire_count(), 1);

        let mut block = vec![0.0f32; 2048];
        engine.process_interleaved(&mut block);
        assert!(!handle.meters().is_triggering());
        assert_eq!(handle.meters().frames(), (WINDOW + 2048) as u64);
    }
}
