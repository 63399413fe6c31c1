//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here, including the quote cache and the session
//! watchlist. Every action runs synchronously on the calling thread.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

use gainz_core::data::{CacheKey, FetchError, MarketDataGateway, QuoteCache};
use gainz_core::{
    analyze_symbol, scan_watchlist, Analysis, AnalysisRequest, DashboardConfig, PipelineError,
    Watchlist, WatchlistReport,
};

const ERROR_HISTORY_CAP: usize = 50;

pub type Gateway = Box<dyn MarketDataGateway>;

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Analyzer,
    Watchlist,
}

impl Mode {
    pub fn index(self) -> usize {
        match self {
            Mode::Analyzer => 0,
            Mode::Watchlist => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Analyzer => "Stock Analyzer",
            Mode::Watchlist => "Watchlist",
        }
    }

    pub fn next(self) -> Mode {
        match self {
            Mode::Analyzer => Mode::Watchlist,
            Mode::Watchlist => Mode::Analyzer,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// What the text input overlay is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// Symbol to analyze in the Stock Analyzer view.
    Symbol,
    /// Symbol to append to the watchlist.
    AddSymbol,
    /// Sector whose tickers are appended to the watchlist.
    Sector,
}

impl InputTarget {
    pub fn prompt(self) -> &'static str {
        match self {
            InputTarget::Symbol => "Analyze symbol",
            InputTarget::AddSymbol => "Add to watchlist",
            InputTarget::Sector => "Add sector",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Input(InputTarget),
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub mode: Mode,
    pub running: bool,

    // Session state
    pub config: DashboardConfig,
    pub cache: QuoteCache<Gateway>,
    pub watchlist: Watchlist,

    // Stock Analyzer
    pub symbol: String,
    pub analysis: Option<Analysis>,

    // Watchlist
    pub report: Option<WatchlistReport>,
    pub watchlist_cursor: usize,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub input: String,
}

impl AppState {
    pub fn new(config: DashboardConfig, gateway: Gateway) -> Self {
        let watchlist = config.initial_watchlist();
        let symbol = config.default_symbol.trim().to_uppercase();
        Self {
            mode: Mode::Analyzer,
            running: true,
            config,
            cache: QuoteCache::new(gateway),
            watchlist,
            symbol,
            analysis: None,
            report: None,
            watchlist_cursor: 0,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            input: String::new(),
        }
    }

    fn request(&self, symbol: &str) -> AnalysisRequest {
        AnalysisRequest::new(symbol, &self.config.period, &self.config.interval)
    }

    /// Analyze the current symbol. On failure the previous analysis is kept
    /// and the error goes to the status bar.
    pub fn analyze(&mut self) {
        let symbol = self.symbol.clone();
        self.run_analysis(&symbol);
    }

    /// Analyze a newly entered symbol. It becomes the current symbol only
    /// once the analysis succeeds.
    pub fn analyze_input(&mut self, raw: &str) {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            self.set_warning("Enter a symbol to analyze");
            return;
        }
        self.run_analysis(&symbol);
    }

    fn run_analysis(&mut self, symbol: &str) {
        let request = self.request(symbol);
        match analyze_symbol(&mut self.cache, &request) {
            Ok(analysis) => {
                self.set_status(format!(
                    "{}: {} at {:.2}",
                    analysis.summary.symbol,
                    analysis.signal,
                    analysis.summary.price
                ));
                self.symbol = analysis.summary.symbol.clone();
                self.analysis = Some(analysis);
            }
            Err(e) => {
                self.push_error(describe(&e), format!("analyze {symbol}"));
            }
        }
    }

    /// Switch views. Entering the watchlist rescans it through the cache.
    pub fn set_mode(&mut self, mode: Mode) {
        let entering_watchlist = mode == Mode::Watchlist && self.mode != Mode::Watchlist;
        self.mode = mode;
        if entering_watchlist {
            self.scan();
        }
    }

    /// Re-scan every watchlist symbol through the cache.
    pub fn scan(&mut self) {
        if self.watchlist.is_empty() {
            self.report = None;
            self.set_warning("Watchlist is empty");
            return;
        }

        let report = scan_watchlist(
            &mut self.cache,
            &self.watchlist,
            &self.config.period,
            &self.config.interval,
        );
        for failure in &report.failures {
            self.push_error(
                describe(&failure.error),
                format!("watchlist {}", failure.symbol),
            );
        }
        if report.failures.is_empty() {
            self.set_status(format!("Watchlist updated: {} symbols", report.rows.len()));
        } else {
            self.set_warning(format!(
                "Watchlist updated: {} ok, {} failed",
                report.rows.len(),
                report.failures.len()
            ));
        }
        self.report = Some(report);
    }

    /// Drop cached quotes for the active view and fetch again.
    pub fn refresh(&mut self) {
        match self.mode {
            Mode::Analyzer => {
                let key = CacheKey::new(&self.symbol, &self.config.period, &self.config.interval);
                self.cache.invalidate(&key);
                self.analyze();
            }
            Mode::Watchlist => {
                let keys: Vec<CacheKey> = self
                    .watchlist
                    .iter()
                    .map(|s| CacheKey::new(s, &self.config.period, &self.config.interval))
                    .collect();
                for key in &keys {
                    self.cache.invalidate(key);
                }
                self.scan();
            }
        }
    }

    pub fn add_to_watchlist(&mut self, raw: &str) {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            self.set_warning("Enter a symbol to add");
        } else if self.watchlist.add(&symbol) {
            self.scan();
            self.set_status(format!("Added {symbol} to watchlist"));
        } else {
            self.set_warning(format!("{symbol} is already on the watchlist"));
        }
    }

    pub fn add_sector(&mut self, raw: &str) {
        let name = raw.trim();
        match self.watchlist.extend_from_sector(&self.config.sectors, name) {
            Some(added) => {
                if added > 0 {
                    self.scan();
                }
                self.set_status(format!("Added {added} symbols from {name}"));
            }
            None => {
                let known = self.config.sectors.sector_names().join(", ");
                self.set_warning(format!("Unknown sector '{name}' (known: {known})"));
            }
        }
    }

    /// Remove the symbol under the watchlist cursor.
    pub fn remove_selected(&mut self) {
        let Some(symbol) = self.watchlist.get(self.watchlist_cursor).map(str::to_string) else {
            return;
        };
        self.watchlist.remove(&symbol);
        if let Some(report) = &mut self.report {
            report.rows.retain(|r| r.symbol != symbol);
            report.failures.retain(|f| f.symbol != symbol);
        }
        self.watchlist_cursor = self
            .watchlist_cursor
            .min(self.watchlist.len().saturating_sub(1));
        self.set_status(format!("Removed {symbol}"));
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.watchlist.get(self.watchlist_cursor)
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

/// User-facing wording for a pipeline error.
pub fn describe(error: &PipelineError) -> String {
    match error {
        PipelineError::Fetch(FetchError::NotFound { symbol }) => {
            format!("No data found for {symbol}")
        }
        PipelineError::Fetch(e) => format!("Fetch failed: {e}"),
        PipelineError::Indicator(e) => format!("Not enough history: {e}"),
        PipelineError::Signal(e) => format!("No signal yet: {e}"),
        PipelineError::EmptySymbol => error.to_string(),
    }
}
