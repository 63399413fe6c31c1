//! Watchlist view: one row per symbol with a colour-coded signal cell.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use gainz_core::WatchlistRow;

use crate::app::AppState;
use crate::theme;
use crate::ui::fmt_opt;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let failure_lines = app.report.as_ref().map_or(0, |r| r.failures.len()) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(failure_lines.min(6)),
        ])
        .split(area);

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_failures(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let line = Line::from(vec![
        Span::styled(format!("{} symbols", app.watchlist.len()), theme::accent()),
        Span::styled(
            "  [Enter]scan [a]dd [g]sector [d]elete [o]pen [j/k]move",
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &AppState) {
    let header = Row::new(vec!["Symbol", "Price", "Signal", "RSI"]).style(theme::accent_bold());

    let rows: Vec<Row> = app
        .watchlist
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let scanned = app
                .report
                .as_ref()
                .and_then(|r| r.rows.iter().find(|row| row.symbol == symbol));
            let row = table_row(symbol, scanned);
            if i == app.watchlist_cursor {
                row.style(theme::accent().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header);

    f.render_widget(table, area);
}

fn table_row<'a>(symbol: &'a str, scanned: Option<&WatchlistRow>) -> Row<'a> {
    match scanned {
        Some(r) => Row::new(vec![
            Cell::from(symbol),
            Cell::from(format!("{:.2}", r.price)),
            Cell::from(r.signal.label()).style(theme::signal_style(r.signal)),
            Cell::from(fmt_opt(r.rsi, 1)),
        ]),
        None => Row::new(vec![
            Cell::from(symbol),
            Cell::from("-"),
            Cell::from("-"),
            Cell::from("-"),
        ])
        .style(theme::muted()),
    }
}

fn render_failures(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        return;
    };
    let lines: Vec<Line> = report
        .failures
        .iter()
        .map(|failure| {
            Line::from(vec![
                Span::styled(format!("{:<8}", failure.symbol), theme::negative()),
                Span::styled(failure.error.to_string(), theme::muted()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
