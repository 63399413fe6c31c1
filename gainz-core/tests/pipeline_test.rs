//! End-to-end pipeline tests against a scripted gateway.

mod common;

use chrono::{Duration, Utc};
use common::{downtrend, uptrend, ScriptedGateway};
use gainz_core::data::{FetchError, QuoteCache, CACHE_TTL_SECS};
use gainz_core::indicators::IndicatorError;
use gainz_core::{
    analyze_symbol, scan_watchlist, AnalysisRequest, PipelineError, Signal, Watchlist,
};

fn request(symbol: &str) -> AnalysisRequest {
    AnalysisRequest::new(symbol, "1d", "5m")
}

#[test]
fn uptrend_is_buy_and_downtrend_is_sell() {
    let gateway = ScriptedGateway::new()
        .with_closes("AAPL", uptrend(80))
        .with_closes("TSLA", downtrend(80));
    let mut cache = QuoteCache::new(gateway);

    let up = analyze_symbol(&mut cache, &request("AAPL")).unwrap();
    assert_eq!(up.signal, Signal::Buy);
    let rsi = up.summary.last_rsi.unwrap();
    assert!((rsi - 55.0).abs() < 1e-9, "rsi = {rsi}");

    let down = analyze_symbol(&mut cache, &request("TSLA")).unwrap();
    assert_eq!(down.signal, Signal::Sell);
    assert!(down.summary.last_ema_fast.unwrap() < down.summary.last_ema_slow.unwrap());
}

#[test]
fn summary_reports_price_change_and_metadata() {
    let closes = uptrend(80);
    let gateway = ScriptedGateway::new().with_closes("AAPL", closes.clone());
    let mut cache = QuoteCache::new(gateway);

    let summary = analyze_symbol(&mut cache, &request("aapl")).unwrap().summary;
    // The first bar opens at its own close.
    let expected = (closes[79] - closes[0]) / closes[0] * 100.0;
    assert_eq!(summary.price, closes[79]);
    assert!((summary.change_percent - expected).abs() < 1e-9);
    assert_eq!(summary.volume, 1_234_567);
    assert_eq!(summary.sector, "Technology");
}

#[test]
fn single_bar_history_is_insufficient_data() {
    let gateway = ScriptedGateway::new().with_closes("AAPL", vec![100.0]);
    let mut cache = QuoteCache::new(gateway);

    let err = analyze_symbol(&mut cache, &request("AAPL")).unwrap_err();
    assert_eq!(
        err,
        PipelineError::Indicator(IndicatorError::InsufficientData {
            required: 2,
            actual: 1
        })
    );
}

#[test]
fn unknown_symbol_is_not_found() {
    let mut cache = QuoteCache::new(ScriptedGateway::new());
    let err = analyze_symbol(&mut cache, &request("ZZZZ")).unwrap_err();
    assert_eq!(err, PipelineError::Fetch(FetchError::not_found("ZZZZ")));
}

#[test]
fn one_failing_symbol_does_not_abort_the_scan() {
    let gateway = ScriptedGateway::new()
        .with_closes("AAPL", uptrend(60))
        .with_closes("MSFT", uptrend(60))
        .with_error("GOOGL", FetchError::Unavailable("connection reset".into()))
        .with_closes("NVDA", downtrend(60))
        .with_closes("TSLA", downtrend(60));
    let mut cache = QuoteCache::new(gateway);

    let report = scan_watchlist(&mut cache, &Watchlist::new(), "1d", "5m");

    let symbols: Vec<&str> = report.rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "MSFT", "NVDA", "TSLA"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].symbol, "GOOGL");
    assert!(matches!(
        report.failures[0].error,
        PipelineError::Fetch(FetchError::Unavailable(_))
    ));
    assert_eq!(report.rows[0].signal, Signal::Buy);
    assert_eq!(report.rows[3].signal, Signal::Sell);
}

#[test]
fn rescan_within_ttl_is_served_from_cache() {
    let gateway = ScriptedGateway::new()
        .with_closes("AAPL", uptrend(60))
        .with_closes("MSFT", uptrend(60));
    let mut cache = QuoteCache::new(gateway);
    let watchlist = Watchlist::from_symbols(["AAPL", "MSFT", "ZZZZ"]);

    let first = scan_watchlist(&mut cache, &watchlist, "1d", "5m");
    let second = scan_watchlist(&mut cache, &watchlist, "1d", "5m");

    assert_eq!(first, second);
    assert_eq!(cache.gateway().calls("AAPL"), 1);
    assert_eq!(cache.gateway().calls("MSFT"), 1);
    // The failure was not cached, so the second scan asked again.
    assert_eq!(cache.gateway().calls("ZZZZ"), 2);
}

#[test]
fn cache_refetches_once_ttl_has_elapsed() {
    let gateway = ScriptedGateway::new().with_closes("AAPL", uptrend(30));
    let mut cache = QuoteCache::new(gateway);
    let now = Utc::now();

    cache.fetch_at("AAPL", "1d", "5m", now).unwrap();
    cache
        .fetch_at("AAPL", "1d", "5m", now + Duration::seconds(CACHE_TTL_SECS - 1))
        .unwrap();
    assert_eq!(cache.gateway().calls("AAPL"), 1);

    cache
        .fetch_at("AAPL", "1d", "5m", now + Duration::seconds(CACHE_TTL_SECS))
        .unwrap();
    assert_eq!(cache.gateway().calls("AAPL"), 2);
}

#[test]
fn symbols_are_normalized_before_the_cache() {
    let gateway = ScriptedGateway::new().with_closes("AAPL", uptrend(30));
    let mut cache = QuoteCache::new(gateway);

    analyze_symbol(&mut cache, &request("aapl")).unwrap();
    analyze_symbol(&mut cache, &request("  AAPL ")).unwrap();
    assert_eq!(cache.gateway().total_calls(), 1);
}
