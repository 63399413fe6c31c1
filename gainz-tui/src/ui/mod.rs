//! Top-level UI layout: one view at a time with a status bar.

pub mod analyzer_panel;
pub mod chart_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;
pub mod watchlist_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Mode, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_view(f, main_area, app);
    status_bar::render(f, status_area, app);

    match &app.overlay {
        Overlay::Input(target) => overlays::render_input(f, main_area, *target, &app.input, app),
        Overlay::Help => help_panel::render(f, main_area, app),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

fn draw_view(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = app.mode;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", mode.label(), mode.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match mode {
        Mode::Analyzer => analyzer_panel::render(f, inner, app),
        Mode::Watchlist => watchlist_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Format an optional indicator value, or a dash while it is warming up.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn fmt_opt_uses_dash_for_undefined() {
        assert_eq!(fmt_opt(Some(12.3456), 2), "12.35");
        assert_eq!(fmt_opt(None, 2), "-");
    }

    #[test]
    fn analyzer_view_shows_symbol_and_signal() {
        let mut app = test_app();
        app.analyze();
        let text = render_to_text(&app);
        assert!(text.contains("Stock Analyzer"));
        assert!(text.contains("AAPL"));
        assert!(text.contains("BUY"));
    }

    #[test]
    fn watchlist_view_lists_rows() {
        let mut app = test_app();
        app.mode = Mode::Watchlist;
        app.scan();
        let text = render_to_text(&app);
        assert!(text.contains("Watchlist"));
        assert!(text.contains("GOOGL"));
        assert!(text.contains("TSLA"));
    }

    #[test]
    fn failure_overlay_lists_errors() {
        let mut app = test_app();
        app.analyze_input("zzzz");
        app.overlay = Overlay::ErrorHistory;
        let text = render_to_text(&app);
        assert!(text.contains("Failures (1)"));
        assert!(text.contains("ZZZZ"));
    }

    #[test]
    fn failure_overlay_lists_newest_first() {
        let mut app = test_app();
        app.push_error("first failure".to_string(), "analyze AAA".to_string());
        app.push_error("second failure".to_string(), "analyze BBB".to_string());
        app.overlay = Overlay::ErrorHistory;
        let text = render_to_text(&app);
        let newest = text.find("second failure").unwrap();
        let oldest = text.find("first failure").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn empty_views_render_hints() {
        let app = test_app();
        let text = render_to_text(&app);
        assert!(text.contains("Press s"));
    }
}
