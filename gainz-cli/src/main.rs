//! Gainz CLI: analyze a symbol, scan a watchlist, list sectors.
//!
//! Commands:
//! - `analyze` fetches one symbol, prints its summary and signal, optionally exports CSV
//! - `watchlist` scans several symbols and prints one row per symbol
//! - `sectors` lists the sector catalog

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use gainz_core::data::{QuoteCache, YahooGateway};
use gainz_core::export::write_csv;
use gainz_core::telemetry::{self, LogTarget};
use gainz_core::{
    analyze_symbol, scan_watchlist, AnalysisRequest, AnalysisSummary, DashboardConfig, Watchlist,
    WatchlistReport,
};

#[derive(Parser)]
#[command(name = "gainz", about = "Gainz: stock signals from EMA, RSI and MACD")]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one symbol and print its BUY / SELL / HOLD signal.
    Analyze {
        /// Ticker symbol (e.g., AAPL).
        symbol: String,

        /// History range (e.g., 1d, 5d, 1mo). Defaults to the config value.
        #[arg(long)]
        period: Option<String>,

        /// Bar interval (e.g., 1m, 5m, 1h, 1d). Defaults to the config value.
        #[arg(long)]
        interval: Option<String>,

        /// Print the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write every bar with its indicators to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Scan a list of symbols. Uses the configured watchlist when none are given.
    Watchlist {
        /// Symbols to scan (e.g., AAPL MSFT).
        symbols: Vec<String>,

        /// Also scan every ticker in this sector.
        #[arg(long)]
        sector: Option<String>,

        /// History range. Defaults to the config value.
        #[arg(long)]
        period: Option<String>,

        /// Bar interval. Defaults to the config value.
        #[arg(long)]
        interval: Option<String>,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the sector catalog.
    Sectors,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref())?;
    telemetry::init_logging(&config.log_level, LogTarget::Stderr)?;
    debug!(config = ?cli.config, "config loaded");

    match cli.command {
        Commands::Analyze {
            symbol,
            period,
            interval,
            json,
            csv,
        } => run_analyze(&config, symbol, period, interval, json, csv),
        Commands::Watchlist {
            symbols,
            sector,
            period,
            interval,
            json,
        } => run_watchlist(&config, symbols, sector, period, interval, json),
        Commands::Sectors => {
            run_sectors(&config);
            Ok(())
        }
    }
}

fn new_cache(config: &DashboardConfig) -> Result<QuoteCache<YahooGateway>> {
    let gateway = YahooGateway::new(config.http_timeout())?;
    Ok(QuoteCache::new(gateway))
}

fn run_analyze(
    config: &DashboardConfig,
    symbol: String,
    period: Option<String>,
    interval: Option<String>,
    json: bool,
    csv: Option<PathBuf>,
) -> Result<()> {
    let request = AnalysisRequest::new(
        symbol,
        period.unwrap_or_else(|| config.period.clone()),
        interval.unwrap_or_else(|| config.interval.clone()),
    );

    let mut cache = new_cache(config)?;
    let analysis = analyze_symbol(&mut cache, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.summary)?);
    } else {
        print_summary(&analysis.summary, &request);
    }

    if let Some(path) = csv {
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        write_csv(&analysis.augmented, BufWriter::new(file))?;
        eprintln!("Wrote {} bars to {}", analysis.augmented.len(), path.display());
    }

    Ok(())
}

fn run_watchlist(
    config: &DashboardConfig,
    symbols: Vec<String>,
    sector: Option<String>,
    period: Option<String>,
    interval: Option<String>,
    json: bool,
) -> Result<()> {
    let mut watchlist = if symbols.is_empty() && sector.is_none() {
        config.initial_watchlist()
    } else {
        Watchlist::from_symbols(&symbols)
    };
    if let Some(name) = &sector {
        if watchlist.extend_from_sector(&config.sectors, name).is_none() {
            bail!(
                "unknown sector '{name}'. Valid: {}",
                config.sectors.sector_names().join(", ")
            );
        }
    }
    if watchlist.is_empty() {
        bail!("no symbols to scan");
    }

    let period = period.unwrap_or_else(|| config.period.clone());
    let interval = interval.unwrap_or_else(|| config.interval.clone());

    let mut cache = new_cache(config)?;
    let report = scan_watchlist(&mut cache, &watchlist, &period, &interval);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_complete() {
        for failure in &report.failures {
            eprintln!("Error for {}: {}", failure.symbol, failure.error);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_sectors(config: &DashboardConfig) {
    for (name, tickers) in config.sectors.iter() {
        println!("{:<12} {}", name, tickers.join(" "));
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn print_summary(s: &AnalysisSummary, request: &AnalysisRequest) {
    println!();
    println!("=== {} ({} / {}) ===", s.symbol, request.period, request.interval);
    println!("Price:          {:.2}", s.price);
    println!("Change:         {:+.2}%", s.change_percent);
    println!("Signal:         {}", s.signal);
    println!("RSI (14):       {}", fmt_opt(s.last_rsi));
    println!("EMA 9:          {}", fmt_opt(s.last_ema_fast));
    println!("EMA 21:         {}", fmt_opt(s.last_ema_slow));
    println!("MACD:           {}", fmt_opt(s.last_macd));
    println!("MACD signal:    {}", fmt_opt(s.last_macd_signal));
    println!("Volume:         {}", s.volume);
    println!("Sector:         {}", s.sector);
}

fn print_report(report: &WatchlistReport) {
    println!("{:<8} {:>12} {:<6} {:>8}", "Symbol", "Price", "Signal", "RSI");
    println!("{}", "-".repeat(37));
    for row in &report.rows {
        println!(
            "{:<8} {:>12.2} {:<6} {:>8}",
            row.symbol,
            row.price,
            row.signal,
            fmt_opt(row.rsi)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "gainz", "analyze", "aapl", "--interval", "1h", "--json", "--csv", "out.csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                symbol,
                period,
                interval,
                json,
                csv,
            } => {
                assert_eq!(symbol, "aapl");
                assert_eq!(period, None);
                assert_eq!(interval.as_deref(), Some("1h"));
                assert!(json);
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn parses_watchlist_with_sector_and_global_config() {
        let cli = Cli::try_parse_from([
            "gainz",
            "watchlist",
            "AAPL",
            "MSFT",
            "--sector",
            "Healthcare",
            "--config",
            "gainz.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("gainz.toml")));
        match cli.command {
            Commands::Watchlist {
                symbols, sector, ..
            } => {
                assert_eq!(symbols, vec!["AAPL", "MSFT"]);
                assert_eq!(sector.as_deref(), Some("Healthcare"));
            }
            _ => panic!("expected watchlist"),
        }
    }

    #[test]
    fn analyze_requires_symbol() {
        assert!(Cli::try_parse_from(["gainz", "analyze"]).is_err());
    }

    #[test]
    fn fmt_opt_dash_for_undefined() {
        assert_eq!(fmt_opt(None), "-");
        assert_eq!(fmt_opt(Some(55.0)), "55.00");
    }
}
