//! anydrum - replace drum hits with a one-shot sample
//!
//! Run with: cargo run -- live --sample kick.wav --threshold 0.4 --trigger

mod cli;
mod live;
mod render;
mod session;
mod ui;

use std::fs::File;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::LevelFilter;

use cli::{Cli, Command};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Live(args) => {
            // the TUI owns the terminal, so logs only go to a file
            init_logging(args.log_file.as_deref(), args.log_file.is_some())?;
            live::run(args)
        }
        Command::Render(args) => {
            init_logging(None, true)?;
            render::run(args)
        }
    }
}

fn init_logging(log_file: Option<&Path>, enabled: bool) -> EyreResult<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if !enabled {
        builder.filter_level(LevelFilter::Off);
    }

    if let Some(path) = log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().wrap_err("failed to initialise logging")
}
