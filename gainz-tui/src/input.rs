//! Keyboard input dispatch: overlays, then global keys, then the active view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, InputTarget, Mode, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay.clone() {
        Overlay::Input(target) => {
            handle_input_overlay(app, target, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.set_mode(Mode::Analyzer);
            return;
        }
        KeyCode::Char('2') => {
            app.set_mode(Mode::Watchlist);
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.set_mode(app.mode.next());
            return;
        }
        KeyCode::Char('r') => {
            app.refresh();
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 3. View-specific keys.
    match app.mode {
        Mode::Analyzer => handle_analyzer_key(app, key),
        Mode::Watchlist => handle_watchlist_key(app, key),
    }
}

fn open_input(app: &mut AppState, target: InputTarget) {
    app.input.clear();
    app.overlay = Overlay::Input(target);
}

fn handle_input_overlay(app: &mut AppState, target: InputTarget, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.input.clear();
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut app.input);
            app.overlay = Overlay::None;
            match target {
                InputTarget::Symbol => app.analyze_input(&text),
                InputTarget::AddSymbol => app.add_to_watchlist(&text),
                InputTarget::Sector => app.add_sector(&text),
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_analyzer_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('/') => open_input(app, InputTarget::Symbol),
        KeyCode::Enter => app.analyze(),
        _ => {}
    }
}

fn handle_watchlist_key(app: &mut AppState, key: KeyEvent) {
    let len = app.watchlist.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if len > 0 && app.watchlist_cursor + 1 < len {
                app.watchlist_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.watchlist_cursor = app.watchlist_cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => open_input(app, InputTarget::AddSymbol),
        KeyCode::Char('g') => open_input(app, InputTarget::Sector),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Enter => app.scan(),
        KeyCode::Char('o') => {
            // Open the selected symbol in the analyzer.
            if let Some(symbol) = app.selected_symbol().map(str::to_string) {
                app.set_mode(Mode::Analyzer);
                app.analyze_input(&symbol);
            }
        }
        _ => {}
    }
}
