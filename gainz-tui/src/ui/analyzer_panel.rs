//! Stock Analyzer view: headline metrics, price chart, technical details.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use gainz_core::Analysis;

use crate::app::AppState;
use crate::theme;
use crate::ui::{chart_panel, fmt_opt};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(analysis) = &app.analysis else {
        render_empty(f, area, app);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_metrics(f, chunks[0], analysis, app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    chart_panel::render(f, body[0], &analysis.augmented);
    render_details(f, body[1], analysis);
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("Press s to enter a symbol, or Enter to analyze {}.", app.symbol),
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Signals use EMA 9 / EMA 21 crossover with an RSI 14 guard.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_metrics(f: &mut Frame, area: Rect, analysis: &Analysis, app: &AppState) {
    let s = &analysis.summary;
    let line = Line::from(vec![
        Span::styled(format!(" {} ", s.symbol), theme::accent_bold()),
        Span::styled("  Price ", theme::muted()),
        Span::styled(format!("{:.2}", s.price), theme::text()),
        Span::styled("  Change ", theme::muted()),
        Span::styled(
            format!("{:+.2}%", s.change_percent),
            theme::change_style(s.change_percent),
        ),
        Span::styled("  Signal ", theme::muted()),
        Span::styled(s.signal.label(), theme::signal_style(s.signal)),
        Span::styled("  Volume ", theme::muted()),
        Span::styled(format_volume(s.volume), theme::text()),
    ]);
    let sub = Line::from(Span::styled(
        format!(
            " {} bars | period {} | interval {} | [s]ymbol [Enter]analyze [r]efresh",
            analysis.augmented.len(),
            app.config.period,
            app.config.interval
        ),
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(vec![line, sub]), area);
}

fn render_details(f: &mut Frame, area: Rect, analysis: &Analysis) {
    let s = &analysis.summary;
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme::muted())
        .title(" Technical Details ")
        .title_style(theme::accent_bold());

    let rsi_style = s.last_rsi.map_or(theme::text(), theme::rsi_style);
    let lines = vec![
        detail("RSI (14)", fmt_opt(s.last_rsi, 2), rsi_style),
        detail("EMA 9", fmt_opt(s.last_ema_fast, 2), theme::text()),
        detail("EMA 21", fmt_opt(s.last_ema_slow, 2), theme::text()),
        detail("MACD", fmt_opt(s.last_macd, 4), theme::text()),
        detail("MACD Signal", fmt_opt(s.last_macd_signal, 4), theme::text()),
        Line::from(""),
        detail("Volume", format_volume(s.volume), theme::text()),
        detail("Sector", s.sector.clone(), theme::text()),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail(label: &str, value: String, style: ratatui::style::Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), theme::muted()),
        Span::styled(value, style),
    ])
}

/// Thousands-separated volume, e.g. 51,234,567.
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
