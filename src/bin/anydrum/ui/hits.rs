//! Recent hits list

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::state::HitLog;

pub fn render_hits(frame: &mut Frame, area: Rect, hits: &HitLog, sample_rate: f32) {
    let items: Vec<ListItem> = hits
        .iter()
        .map(|hit| {
            let secs = hit.frame as f64 / sample_rate.max(1.0) as f64;
            let style = if hit.played {
                Style::default().fg(Color::LightRed)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(format!(" {:>9.3}s  gain {:.3}", secs, hit.gain)).style(style)
        })
        .collect();

    let title = format!(" Hits ({}) ", hits.total());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}
