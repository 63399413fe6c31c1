//! Overlay widgets: text input, error history.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::app::{AppState, InputTarget};
use crate::theme;
use crate::ui::centered_rect;

/// Single-line text input for a symbol or sector name.
pub fn render_input(f: &mut Frame, area: Rect, target: InputTarget, input: &str, app: &AppState) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} [Enter]ok [Esc]cancel ", target.prompt()))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let hint = match target {
        InputTarget::Symbol | InputTarget::AddSymbol => "Enter ticker symbol:".to_string(),
        InputTarget::Sector => format!(
            "Sector ({}):",
            app.config.sectors.sector_names().join(", ")
        ),
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(hint, theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text), inner);
}

/// Fetch and analysis failures, newest first. The cursor row is highlighted.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Failures ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    if app.error_history.is_empty() {
        let empty = Paragraph::new(Span::styled(" Nothing has failed yet.", theme::muted()))
            .block(block);
        f.render_widget(empty, popup);
        return;
    }

    let items: Vec<ListItem> = app
        .error_history
        .iter()
        .map(|err| {
            let head = Line::from(vec![
                Span::styled(err.timestamp.format("%H:%M:%S ").to_string(), theme::muted()),
                Span::styled(format!("{:<16} ", err.context), theme::warning()),
                Span::styled(err.message.as_str(), theme::text()),
            ]);
            ListItem::new(head)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::negative().add_modifier(Modifier::BOLD));
    let mut state = ListState::default().with_selected(Some(app.error_scroll));
    f.render_stateful_widget(list, popup, &mut state);
}
