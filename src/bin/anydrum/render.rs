//! Offline processing: WAV in, engine, WAV out

use std::sync::Arc;

use color_eyre::eyre::{ensure, Result as EyreResult, WrapErr};
use log::{info, warn};

use anydrum::{io::wav, ControlParams, Engine, EngineConfig, MAX_BLOCK_SIZE};

use super::cli::RenderArgs;
use super::session;

pub fn run(args: RenderArgs) -> EyreResult<()> {
    let input = wav::load_audio(&args.input)
        .wrap_err_with(|| format!("failed to load input {}", args.input.display()))?;
    ensure!(input.sample_rate > 0, "input has a sample rate of 0 Hz");

    let channels = input.channels;
    let sample_rate = input.sample_rate;
    let block_size = args.block_size.clamp(1, MAX_BLOCK_SIZE);

    let params = Arc::new(ControlParams::from_snapshot(&args.params.snapshot()));
    let config = EngineConfig {
        sample_rate: sample_rate as f32,
        channels,
        max_block_size: block_size,
        // drained after every block, so one block's worth of hits is plenty
        event_capacity: block_size * channels,
        ..EngineConfig::default()
    };
    let (mut engine, mut handle) = Engine::new(config, Arc::clone(&params));

    let sample = session::start(
        &params,
        &mut handle,
        args.sample.as_deref(),
        args.preset.as_deref(),
    )?;
    if sample.is_none() && params.trigger_enabled() {
        warn!("trigger output is on but no sample was given; hits will be silent");
    }

    let snap = params.snapshot();
    info!(
        "rendering {} ({} ch, {} Hz): threshold {:.3}, offset {}, mask {}, trigger {}",
        args.input.display(),
        channels,
        sample_rate,
        snap.threshold,
        snap.offset,
        snap.mask,
        if snap.trigger_enabled { "on" } else { "off" },
    );

    let mut output = input.samples;
    let mut hits = 0usize;

    for block in output.chunks_mut(block_size * channels) {
        engine.process_interleaved(block);

        while let Some(event) = handle.pop_event() {
            hits += 1;
            info!(
                "hit at {:.3}s, gain {:.3}{}",
                event.frame as f64 / sample_rate as f64,
                event.gain,
                if event.played { "" } else { " (trigger output off)" },
            );
        }
    }
    handle.collect_retired();

    wav::write(&args.output, &output, channels, sample_rate)
        .wrap_err_with(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Rendered {} frames, {} hits -> {}",
        engine.frames_processed(),
        hits,
        args.output.display()
    );

    Ok(())
}
