//! Help overlay: keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1 / 2", "Stock Analyzer / Watchlist");
    key(&mut lines, "Tab", "Switch view");
    key(&mut lines, "r", "Refresh: drop cached quotes and fetch again");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Stock Analyzer");
    key(&mut lines, "s or /", "Enter a symbol to analyze");
    key(&mut lines, "Enter", "Analyze the current symbol again");
    lines.push(Line::from(""));

    section(&mut lines, "Watchlist");
    key(&mut lines, "Enter", "Scan every symbol");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "a", "Add a symbol");
    key(&mut lines, "g", "Add every ticker of a sector");
    key(&mut lines, "d / Del", "Remove the selected symbol");
    key(&mut lines, "o", "Open the selected symbol in the analyzer");
    lines.push(Line::from(""));

    section(&mut lines, "Signals");
    key(&mut lines, "BUY", "EMA 9 above EMA 21 and RSI below 70");
    key(&mut lines, "SELL", "EMA 9 below EMA 21 and RSI above 30");
    key(&mut lines, "HOLD", "Anything else");
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!(
            "Period {} | Interval {} | Quotes cached for 5 minutes",
            app.config.period, app.config.interval
        ),
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>10}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
