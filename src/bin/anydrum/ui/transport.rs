//! Status bar widget - shows device format, sample, trigger state, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{AudioStats, UiStateInit};

/// Render the status bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    init: &UiStateInit,
    sample_name: Option<&str>,
    trigger_enabled: bool,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" anydrum ").borders(Borders::ALL);

    let (trigger_str, trigger_color) = if trigger_enabled {
        ("● Trigger ON ", Color::Green)
    } else {
        ("○ Trigger OFF", Color::Yellow)
    };

    // Format sample rate nicely (e.g., 48000 -> "48.0kHz")
    let sample_rate_khz = init.sample_rate / 1000.0;
    let sample = sample_name.unwrap_or("no sample");

    let line = Line::from(vec![
        Span::styled(format!(" {}  ", trigger_str), Style::default().fg(trigger_color)),
        Span::styled(format!("{}  ", sample), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(
                "{:.1}kHz  in {} / out {} ch  ",
                sample_rate_khz, init.input_channels, init.channels
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
