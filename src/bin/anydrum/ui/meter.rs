//! Detector meter, trigger lamp, and parameter readout

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use anydrum::ParamSnapshot;

use super::state::samples_to_ms;

/// Render the amplitude gauge next to the trigger lamp
pub fn render_meter(frame: &mut Frame, area: Rect, amplitude: f32, threshold: f32, triggering: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(11)])
        .split(area);

    let above = amplitude > threshold;
    let gauge = Gauge::default()
        .block(Block::default().title(" Detector ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(if above { Color::LightRed } else { Color::Green }))
        .ratio(amplitude.clamp(0.0, 1.0) as f64)
        .label(format!("amp {:.3} / thr {:.3}", amplitude, threshold));
    frame.render_widget(gauge, chunks[0]);

    let lamp_style = if triggering {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let lamp = Paragraph::new(Line::from(Span::styled("  HIT  ", lamp_style)))
        .block(Block::default().title(" Mask ").borders(Borders::ALL));
    frame.render_widget(lamp, chunks[1]);
}

/// Render the current parameter values with their key bindings
pub fn render_params(frame: &mut Frame, area: Rect, params: &ParamSnapshot, sample_rate: f32) {
    let key = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let row = |name: &str, val: String, keys: &str| {
        Line::from(vec![
            Span::raw(format!(" {:<10}", name)),
            Span::styled(format!("{:<24}", val), value),
            Span::styled(keys.to_string(), key),
        ])
    };

    let lines = vec![
        row("gain", format!("{:.2}", params.gain), "[-/+]"),
        row("threshold", format!("{:.3}", params.threshold), "[Down/Up]"),
        row(
            "offset",
            format!(
                "{:.0} smp ({:.1} ms)",
                params.offset,
                samples_to_ms(params.offset, sample_rate)
            ),
            "[Left/Right]",
        ),
        row(
            "mask",
            format!(
                "{:.0} smp ({:.1} ms)",
                params.mask,
                samples_to_ms(params.mask, sample_rate)
            ),
            "[ [ / ] ]",
        ),
        row("output", format!("{:.2}", params.output), "[</>]"),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().title(" Parameters ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
