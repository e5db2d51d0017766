//! Live duplex processing: input device -> engine -> output device

use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{ensure, eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};
use rtrb::{PushError, RingBuffer};

use anydrum::{params::Preset, ControlParams, Engine, EngineConfig, MAX_BLOCK_SIZE};

use super::cli::LiveArgs;
use super::session;
use super::ui::{UiApp, UiStateInit};

/// Widest input frame the bridge can carry without allocating.
const MAX_INPUT_CHANNELS: usize = 32;
/// Capacity of the input → output bridge, in frames.
const BRIDGE_FRAMES: usize = MAX_BLOCK_SIZE * 4;
/// Silence queued ahead of the first input callback, in frames.
const LATENCY_FRAMES: usize = 512;
/// Capacity of the audio → UI scope ring, in samples.
const SCOPE_RING_LEN: usize = 1024 * 16;

pub fn run(args: LiveArgs) -> EyreResult<()> {
    // --- Set up CPAL ---

    let host = cpal::default_host();
    let output_device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let input_device = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;

    let out_config = output_device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let in_config = input_device
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;

    ensure!(
        out_config.sample_format() == cpal::SampleFormat::F32
            && in_config.sample_format() == cpal::SampleFormat::F32,
        "live mode requires f32 devices (input {:?}, output {:?})",
        in_config.sample_format(),
        out_config.sample_format()
    );
    ensure!(
        in_config.sample_rate() == out_config.sample_rate(),
        "input runs at {} Hz but output at {} Hz",
        in_config.sample_rate().0,
        out_config.sample_rate().0
    );

    let sample_rate = out_config.sample_rate().0 as f32;
    let channels = out_config.channels() as usize;
    let in_channels = in_config.channels() as usize;
    ensure!(
        (1..=MAX_INPUT_CHANNELS).contains(&in_channels),
        "unsupported input channel count {in_channels}"
    );

    info!(
        "input {} ch, output {} ch, {} Hz",
        in_channels, channels, sample_rate
    );

    // --- Engine ---

    let params = Arc::new(ControlParams::from_snapshot(&args.params.snapshot()));
    let config = EngineConfig {
        sample_rate,
        channels,
        ..EngineConfig::default()
    };
    let (mut engine, mut handle) = Engine::new(config, Arc::clone(&params));

    // a preset that doesn't exist yet is created on quit
    let preset = args.preset.as_deref().filter(|path| path.exists());
    let sample = session::start(&params, &mut handle, args.sample.as_deref(), preset)?;

    // --- Cross-thread rings ---

    let (mut in_tx, mut in_rx) = RingBuffer::<f32>::new(BRIDGE_FRAMES * in_channels);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING_LEN);

    for _ in 0..LATENCY_FRAMES * in_channels {
        let _ = in_tx.push(0.0);
    }

    let input_stream = input_device
        .build_input_stream(
            &in_config.into(),
            move |data: &[f32], _| {
                for &s in data {
                    if let Err(PushError::Full(_)) = in_tx.push(s) {
                        break; // output side stalled, drop the rest
                    }
                }
            },
            move |err| error!("input stream error: {err}"),
            None,
        )
        .wrap_err("failed to build input stream")?;

    // Buffer reused by the output callback
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE * channels];

    let output_stream = output_device
        .build_output_stream(
            &out_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render * channels];

                    // Pull one input frame per output frame; underruns read as silence
                    let mut in_frame = [0.0f32; MAX_INPUT_CHANNELS];
                    for frame in block.chunks_exact_mut(channels) {
                        for slot in in_frame[..in_channels].iter_mut() {
                            *slot = in_rx.pop().unwrap_or(0.0);
                        }
                        for (ch, out) in frame.iter_mut().enumerate() {
                            *out = in_frame[ch % in_channels];
                        }
                    }

                    engine.process_interleaved(block);

                    let out_off = frames_written * channels;
                    data[out_off..out_off + block.len()].copy_from_slice(block);

                    // First channel to the scope, non-blocking (drop on overflow)
                    for frame in block.chunks_exact(channels) {
                        if let Err(PushError::Full(_)) = scope_tx.push(frame[0]) {
                            break;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            move |err| error!("output stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    input_stream.play().wrap_err("failed to start input stream")?;
    output_stream.play().wrap_err("failed to start output stream")?;

    // --- UI ---

    let init = UiStateInit {
        sample_rate,
        channels,
        input_channels: in_channels,
    };
    let mut app = UiApp::new(init, Arc::clone(&params), handle, scope_rx, sample);

    let mut terminal = ratatui::init();
    let res = app.run(&mut terminal);
    ratatui::restore();

    drop(output_stream);
    drop(input_stream);
    info!("stopped after {} hits", app.hit_count());

    if let Some(path) = &args.preset {
        let preset = Preset {
            params: params.snapshot(),
            sample: app.sample_path().map(Path::to_path_buf),
        };
        session::save_preset(path, &preset)?;
    }

    res
}
