//! Command line definition

use std::path::PathBuf;

use anydrum::{ParamId, ParamSnapshot};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "anydrum", version, about = "Replace drum hits with a one-shot sample")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process the default input device into the default output device
    Live(LiveArgs),
    /// Process a WAV file offline
    Render(RenderArgs),
}

/// Initial parameter values. Out-of-range values are clamped.
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// Input gain applied before detection (0 - 6)
    #[arg(long, default_value_t = ParamId::Gain.default_value())]
    pub gain: f32,

    /// Amplitude a hit has to exceed (0 - 1)
    #[arg(long, default_value_t = ParamId::Threshold.default_value())]
    pub threshold: f32,

    /// Samples the signal must stay above threshold (0 - 6000)
    #[arg(long, default_value_t = ParamId::Offset.default_value())]
    pub offset: f32,

    /// Samples after a hit before the next can fire (1000 - 50000)
    #[arg(long, default_value_t = ParamId::Mask.default_value())]
    pub mask: f32,

    /// Output volume (0 - 2)
    #[arg(long = "output-volume", default_value_t = ParamId::Output.default_value())]
    pub output_volume: f32,

    /// Start with trigger output enabled (sample replaces the input)
    #[arg(long)]
    pub trigger: bool,
}

impl ParamArgs {
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            trigger_enabled: self.trigger,
            gain: ParamId::Gain.sanitize(self.gain),
            threshold: ParamId::Threshold.sanitize(self.threshold),
            offset: ParamId::Offset.sanitize(self.offset),
            mask: ParamId::Mask.sanitize(self.mask),
            output: ParamId::Output.sanitize(self.output_volume),
        }
    }
}

#[derive(Args, Debug)]
pub struct LiveArgs {
    /// One-shot sample to play on each hit
    #[arg(long)]
    pub sample: Option<PathBuf>,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Session preset (JSON). Loaded at startup when it exists and written
    /// back on quit; its parameters replace the flags above
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Write logs here (the terminal is taken by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// WAV file to process
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the processed audio (32-bit float WAV)
    #[arg(long)]
    pub output: PathBuf,

    /// One-shot sample to play on each hit
    #[arg(long)]
    pub sample: Option<PathBuf>,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Session preset (JSON) to start from; its parameters replace the flags above
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Frames per processing block
    #[arg(long, default_value_t = 512)]
    pub block_size: usize,
}
