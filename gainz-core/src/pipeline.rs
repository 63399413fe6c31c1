//! Fetch → indicators → classify, for one symbol or a whole watchlist.
//!
//! Both entry points take the cache explicitly; the caller owns it for the
//! length of the session.

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{info, warn};

use crate::data::{FetchError, MarketDataGateway, QuoteCache};
use crate::domain::{normalize_symbol, QuoteMetadata, Symbol};
use crate::indicators::{compute_indicators, AugmentedSeries, IndicatorError};
use crate::signal::{classify, Signal, SignalError};
use crate::watchlist::Watchlist;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error(transparent)]
    Signal(#[from] SignalError),
}

/// What to analyze. The symbol is normalized before it reaches the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub period: String,
    pub interval: String,
}

impl AnalysisRequest {
    pub fn new(
        symbol: impl Into<String>,
        period: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            period: period.into(),
            interval: interval.into(),
        }
    }
}

/// Headline figures for one analyzed symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub symbol: Symbol,
    /// Last close.
    pub price: f64,
    /// Move from the first bar's open to the last close, in percent.
    pub change_percent: f64,
    pub signal: Signal,
    pub last_rsi: Option<f64>,
    pub last_ema_fast: Option<f64>,
    pub last_ema_slow: Option<f64>,
    pub last_macd: Option<f64>,
    pub last_macd_signal: Option<f64>,
    pub volume: u64,
    pub sector: String,
}

impl AnalysisSummary {
    fn build(augmented: &AugmentedSeries, signal: Signal, metadata: &QuoteMetadata) -> Self {
        let series = augmented.series();
        let price = series.last().map_or(0.0, |b| b.close);
        let change_percent = match series.first() {
            Some(first) if first.open > 0.0 => (price - first.open) / first.open * 100.0,
            _ => 0.0,
        };
        let row = augmented.indicators().last();

        Self {
            symbol: augmented.symbol().to_string(),
            price,
            change_percent,
            signal,
            last_rsi: row.and_then(|r| r.rsi),
            last_ema_fast: row.and_then(|r| r.ema_fast),
            last_ema_slow: row.and_then(|r| r.ema_slow),
            last_macd: row.and_then(|r| r.macd),
            last_macd_signal: row.and_then(|r| r.macd_signal),
            volume: metadata.volume,
            sector: metadata.sector.clone(),
        }
    }
}

/// Full result of analyzing one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub augmented: AugmentedSeries,
    pub signal: Signal,
    pub metadata: QuoteMetadata,
    pub summary: AnalysisSummary,
}

/// One line of the watchlist table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistRow {
    pub symbol: Symbol,
    pub price: f64,
    pub signal: Signal,
    pub rsi: Option<f64>,
}

impl From<&AnalysisSummary> for WatchlistRow {
    fn from(summary: &AnalysisSummary) -> Self {
        Self {
            symbol: summary.symbol.clone(),
            price: summary.price,
            signal: summary.signal,
            rsi: summary.last_rsi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistFailure {
    pub symbol: Symbol,
    #[serde(serialize_with = "serialize_display")]
    pub error: PipelineError,
}

fn serialize_display<S: Serializer>(error: &PipelineError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Rows for every symbol that analyzed cleanly, in watchlist order, plus the
/// symbols that did not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchlistReport {
    pub rows: Vec<WatchlistRow>,
    pub failures: Vec<WatchlistFailure>,
}

impl WatchlistReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch (through the cache), compute indicators and classify one symbol.
pub fn analyze_symbol<G: MarketDataGateway>(
    cache: &mut QuoteCache<G>,
    request: &AnalysisRequest,
) -> Result<Analysis, PipelineError> {
    let symbol = normalize_symbol(&request.symbol).ok_or(PipelineError::EmptySymbol)?;

    let quote = cache.fetch(&symbol, &request.period, &request.interval)?;
    let augmented = compute_indicators(&quote.series)?;
    let signal = classify(&augmented)?;
    let summary = AnalysisSummary::build(&augmented, signal, &quote.metadata);

    info!(
        %symbol,
        bars = augmented.len(),
        price = summary.price,
        signal = signal.label(),
        "analysis complete"
    );

    Ok(Analysis {
        augmented,
        signal,
        metadata: quote.metadata,
        summary,
    })
}

/// Analyze every watchlist symbol independently. A failing symbol is left out
/// of `rows` and listed in `failures`; it never stops the scan.
pub fn scan_watchlist<G: MarketDataGateway>(
    cache: &mut QuoteCache<G>,
    watchlist: &Watchlist,
    period: &str,
    interval: &str,
) -> WatchlistReport {
    let mut report = WatchlistReport::default();

    for symbol in watchlist.iter() {
        let request = AnalysisRequest::new(symbol, period, interval);
        match analyze_symbol(cache, &request) {
            Ok(analysis) => report.rows.push(WatchlistRow::from(&analysis.summary)),
            Err(error) => {
                warn!(%symbol, %error, "watchlist symbol failed");
                report.failures.push(WatchlistFailure {
                    symbol: symbol.to_string(),
                    error,
                });
            }
        }
    }

    info!(
        rows = report.rows.len(),
        failures = report.failures.len(),
        "watchlist scan complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceSeries, Quote};
    use crate::indicators::make_bars;

    struct FixedGateway {
        closes: Vec<f64>,
    }

    impl MarketDataGateway for FixedGateway {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_history(&self, symbol: &str, _: &str, _: &str) -> Result<Quote, FetchError> {
            if symbol == "ZZZZ" {
                return Err(FetchError::not_found(symbol));
            }
            Ok(Quote {
                series: PriceSeries::new(symbol, make_bars(&self.closes)).unwrap(),
                metadata: QuoteMetadata {
                    sector: "Technology".into(),
                    volume: 42,
                },
            })
        }
    }

    fn rising(n: usize) -> Vec<f64> {
        // Upward drift with a dip every fourth bar.
        (0..n)
            .map(|i| 100.0 + i as f64 * 0.5 - if i % 4 == 3 { 1.2 } else { 0.0 })
            .collect()
    }

    #[test]
    fn analyze_normalizes_symbol_and_builds_summary() {
        let mut cache = QuoteCache::new(FixedGateway { closes: rising(40) });
        let request = AnalysisRequest::new(" aapl ", "1d", "5m");
        let analysis = analyze_symbol(&mut cache, &request).unwrap();

        assert_eq!(analysis.augmented.symbol(), "AAPL");
        assert_eq!(analysis.summary.symbol, "AAPL");
        assert_eq!(analysis.summary.volume, 42);
        assert_eq!(analysis.summary.sector, "Technology");
        assert!(analysis.summary.last_rsi.is_some());
        assert!(analysis.summary.last_macd_signal.is_some());

        let bars = analysis.augmented.series().bars();
        let expected = (bars[39].close - bars[0].open) / bars[0].open * 100.0;
        assert!((analysis.summary.change_percent - expected).abs() < 1e-12);
    }

    #[test]
    fn blank_symbol_is_rejected_before_fetch() {
        let mut cache = QuoteCache::new(FixedGateway { closes: rising(40) });
        let request = AnalysisRequest::new("  ", "1d", "5m");
        let err = analyze_symbol(&mut cache, &request).unwrap_err();
        assert_eq!(err, PipelineError::EmptySymbol);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn short_history_surfaces_signal_error() {
        // Enough bars for the engine, not enough for EMA 21.
        let mut cache = QuoteCache::new(FixedGateway { closes: rising(10) });
        let request = AnalysisRequest::new("AAPL", "1d", "5m");
        let err = analyze_symbol(&mut cache, &request).unwrap_err();
        assert!(matches!(err, PipelineError::Signal(_)));
    }

    #[test]
    fn scan_isolates_failures() {
        let mut cache = QuoteCache::new(FixedGateway { closes: rising(40) });
        let watchlist = Watchlist::from_symbols(["AAPL", "ZZZZ", "MSFT"]);
        let report = scan_watchlist(&mut cache, &watchlist, "1d", "5m");

        let symbols: Vec<&str> = report.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].symbol, "ZZZZ");
        assert!(!report.is_complete());
    }

    #[test]
    fn report_serializes_error_as_message() {
        let report = WatchlistReport {
            rows: vec![],
            failures: vec![WatchlistFailure {
                symbol: "ZZZZ".into(),
                error: FetchError::not_found("ZZZZ").into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        let message = json["failures"][0]["error"].as_str().unwrap();
        assert!(message.contains("ZZZZ"));
    }
}
