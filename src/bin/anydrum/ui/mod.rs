//! TUI module for anydrum
//!
//! Shows the detector, the trigger state, the parameters, and the output
//! waveform, and lets the keyboard drive the parameters while audio runs.

mod hits;
mod meter;
pub mod state;
mod transport;
mod waveform;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use anydrum::{ControlParams, EngineHandle, ParamId};

use super::session;

pub use state::UiStateInit;
use state::{AudioStats, HitLog};

use hits::render_hits;
use meter::{render_meter, render_params};
use transport::render_transport;
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;
/// Hits kept for display
const HIT_LOG_LEN: usize = 64;

/// UI application state
pub struct UiApp {
    /// Static info captured at startup
    init: UiStateInit,
    /// Shared parameters (written here, read by the audio thread)
    params: Arc<ControlParams>,
    /// Control side of the engine
    handle: EngineHandle,
    /// Ring buffer receiver for output samples
    scope_rx: Consumer<f32>,
    /// Output sample buffer for visualization
    scope_buffer: Vec<f32>,
    /// Recent hits
    hits: HitLog,
    /// Path of the loaded sample
    sample: Option<PathBuf>,
    /// Path being typed after [O], if the prompt is open
    prompt: Option<String>,
    /// Last message for the help bar
    status: Option<String>,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        init: UiStateInit,
        params: Arc<ControlParams>,
        handle: EngineHandle,
        scope_rx: Consumer<f32>,
        sample: Option<PathBuf>,
    ) -> Self {
        Self {
            init,
            params,
            handle,
            scope_rx,
            scope_buffer: vec![0.0; VIS_BUFFER_SIZE],
            hits: HitLog::new(HIT_LOG_LEN),
            sample,
            prompt: None,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_engine();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.total()
    }

    pub fn sample_path(&self) -> Option<&Path> {
        self.sample.as_deref()
    }

    fn sample_name(&self) -> Option<String> {
        self.sample
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Keys while the open-sample prompt is showing
    fn handle_prompt_key(&mut self, key: KeyCode) {
        let Some(input) = self.prompt.as_mut() else {
            return;
        };
        match key {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                let path = PathBuf::from(input.trim());
                self.prompt = None;
                self.open_sample(path);
            }
            _ => {}
        }
    }

    /// Swap in a new sample from disk; the old one keeps playing on failure
    fn open_sample(&mut self, path: PathBuf) {
        match session::load_sample(&mut self.handle, &path) {
            Ok(()) => {
                self.status = Some(format!("loaded {}", path.display()));
                self.sample = Some(path);
            }
            Err(err) => {
                warn!("{err:#}");
                self.status = Some(format!("{err:#}"));
            }
        }
    }

    /// Poll for new output samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope_buffer.push(sample);
            received = true;
        }

        if received && self.scope_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.scope_buffer.len() - VIS_BUFFER_SIZE;
            self.scope_buffer.drain(0..excess);
        }
    }

    /// Drain trigger events and release swapped-out samples
    fn poll_engine(&mut self) {
        while let Some(event) = self.handle.pop_event() {
            info!("hit at frame {}, gain {:.3}", event.frame, event.gain);
            self.hits.push(event);
        }
        self.handle.collect_retired();
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        let p = &self.params;
        let changed = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                let on = p.toggle_trigger();
                Some(format!("trigger output {}", if on { "on" } else { "off" }))
            }
            KeyCode::Up => Some(format!("threshold {:.3}", p.nudge(ParamId::Threshold, 0.01))),
            KeyCode::Down => Some(format!("threshold {:.3}", p.nudge(ParamId::Threshold, -0.01))),
            KeyCode::Right => Some(format!("offset {:.0}", p.nudge(ParamId::Offset, 64.0))),
            KeyCode::Left => Some(format!("offset {:.0}", p.nudge(ParamId::Offset, -64.0))),
            KeyCode::Char(']') => Some(format!("mask {:.0}", p.nudge(ParamId::Mask, 500.0))),
            KeyCode::Char('[') => Some(format!("mask {:.0}", p.nudge(ParamId::Mask, -500.0))),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                Some(format!("gain {:.2}", p.nudge(ParamId::Gain, 0.1)))
            }
            KeyCode::Char('-') => Some(format!("gain {:.2}", p.nudge(ParamId::Gain, -0.1))),
            KeyCode::Char('>') | KeyCode::Char('.') => {
                Some(format!("output {:.2}", p.nudge(ParamId::Output, 0.1)))
            }
            KeyCode::Char('<') | KeyCode::Char(',') => {
                Some(format!("output {:.2}", p.nudge(ParamId::Output, -0.1)))
            }
            KeyCode::Char(' ') => Some(match self.handle.audition() {
                Ok(()) if self.params.trigger_enabled() => "audition".to_string(),
                Ok(()) => "audition needs trigger output on [T]".to_string(),
                Err(err) => {
                    warn!("audition failed: {err}");
                    err.to_string()
                }
            }),
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.prompt = Some(
                    self.sample
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                );
                None
            }
            KeyCode::Char('s') | KeyCode::Char('S') => Some(match self.handle.stop() {
                Ok(()) => "stopped".to_string(),
                Err(err) => err.to_string(),
            }),
            _ => None,
        };

        if changed.is_some() {
            self.status = changed;
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let snapshot = self.params.snapshot();
        let meters = self.handle.meters();

        // Main layout: status, meter, params + hits, waveform, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(3), // Detector meter
                Constraint::Length(7), // Parameters / hits
                Constraint::Min(6),    // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.scope_buffer);
        let sample_name = self.sample_name();
        render_transport(
            frame,
            chunks[0],
            &self.init,
            sample_name.as_deref(),
            snapshot.trigger_enabled,
            &stats,
        );

        render_meter(
            frame,
            chunks[1],
            meters.amplitude(),
            snapshot.threshold,
            meters.is_triggering(),
        );

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        render_params(frame, middle[0], &snapshot, self.init.sample_rate);
        render_hits(frame, middle[1], &self.hits, self.init.sample_rate);

        render_waveform(frame, chunks[3], &self.scope_buffer, snapshot.threshold);

        let keys = "[Q] Quit  [T] Trigger  [Space] Audition  [S] Stop  [O] Open";
        let (help, color) = match (&self.prompt, &self.status) {
            (Some(input), _) => (
                format!(" Open sample: {input}_  (Enter load, Esc cancel)"),
                Color::Yellow,
            ),
            (None, Some(status)) => (format!(" {status}  |  {keys}"), Color::DarkGray),
            (None, None) => (format!(" {keys}"), Color::DarkGray),
        };
        let help = Paragraph::new(help).style(Style::default().fg(color));
        frame.render_widget(help, chunks[4]);
    }
}
