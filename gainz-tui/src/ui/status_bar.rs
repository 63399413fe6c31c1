//! Bottom status bar: current symbol, cache counters, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Mode, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let stats = app.cache.stats();
    let focus = match app.mode {
        Mode::Analyzer => app.symbol.clone(),
        Mode::Watchlist => format!("{} symbols", app.watchlist.len()),
    };

    let mut spans = vec![
        Span::styled(format!(" {focus} "), theme::accent_bold()),
        Span::styled(
            format!("cache {}/{} ", stats.hits, stats.hits + stats.misses),
            theme::muted(),
        ),
        Span::raw("| "),
    ];

    match &app.status_message {
        Some((msg, level)) => {
            let style = match level {
                StatusLevel::Info => theme::accent(),
                StatusLevel::Warning => theme::warning(),
                StatusLevel::Error => theme::negative(),
            };
            spans.push(Span::styled(msg.as_str(), style));
        }
        None => spans.push(Span::styled("?:Help q:Quit", theme::muted())),
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
