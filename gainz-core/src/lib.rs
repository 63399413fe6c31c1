//! Gainz Core: market data, indicators and signals for the stock dashboard.
//!
//! - Domain types (price bars, validated series, quote metadata)
//! - Market data gateway trait, Yahoo Finance gateway and a TTL quote cache
//! - Indicator engine (EMA 9/21, RSI 14, MACD 12/26/9)
//! - BUY / SELL / HOLD classifier
//! - Pipeline tying fetch, indicators and classification together
//! - Session watchlist, sector catalog, CSV export, config and logging setup

pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod indicators;
pub mod pipeline;
pub mod sectors;
pub mod signal;
pub mod telemetry;
pub mod watchlist;

pub use config::{ConfigError, DashboardConfig};
pub use pipeline::{
    analyze_symbol, scan_watchlist, Analysis, AnalysisRequest, AnalysisSummary, PipelineError,
    WatchlistFailure, WatchlistReport, WatchlistRow,
};
pub use signal::Signal;
pub use watchlist::Watchlist;
