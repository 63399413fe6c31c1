//! Gainz TUI: terminal stock dashboard.
//!
//! Views:
//! 1. Stock Analyzer: metrics, price chart with EMA 9 / EMA 21, technical details
//! 2. Watchlist: table of symbols with colour-coded BUY / SELL / HOLD signals
//!
//! Set `GAINZ_CONFIG` to a TOML file to override the defaults. Logs go to
//! `gainz-tui.log` in the working directory.

mod app;
mod input;
mod theme;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use gainz_core::DashboardConfig;
use gainz_core::data::YahooGateway;
use gainz_core::telemetry::{self, LogTarget};

use crate::app::AppState;

const CONFIG_ENV: &str = "GAINZ_CONFIG";
const LOG_FILE: &str = "gainz-tui.log";
const TICK: Duration = Duration::from_millis(50);

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref())
        .with_context(|| format!("loading config from ${CONFIG_ENV}"))?;

    telemetry::init_logging(&config.log_level, LogTarget::File(PathBuf::from(LOG_FILE)))?;
    info!(period = %config.period, interval = %config.interval, "starting dashboard");

    let gateway = YahooGateway::new(config.http_timeout())?;
    let mut app = AppState::new(config, Box::new(gateway));

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    info!(errors = app.error_history.len(), "dashboard closed");
    result
}

fn setup_terminal() -> Result<Term> {
    // Leave raw mode before the panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Term, app: &mut AppState) -> Result<()> {
    // The first fetch blocks, so paint the empty analyzer before it starts.
    terminal.draw(|f| ui::draw(f, app))?;
    app.analyze();

    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
    }
    Ok(())
}
