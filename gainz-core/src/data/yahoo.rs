//! Yahoo Finance gateway.
//!
//! Fetches intraday or daily OHLCV bars from Yahoo's v8 chart API using a
//! `range` + `interval` query, and looks up the sector through the
//! quoteSummary `assetProfile` module on a best-effort basis.
//!
//! Yahoo has no official API and is subject to unannounced format changes;
//! every parse failure surfaces as `FetchError::Unavailable`. Requests are
//! never retried here.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::canonicalize::{canonicalize, RawBar};
use super::gateway::{FetchError, MarketDataGateway};
use crate::domain::{PriceSeries, Quote, QuoteMetadata, UNKNOWN_SECTOR};

const CHART_BASE: &str = "https://query2.finance.yahoo.com/v8/finance/chart/";
const SUMMARY_BASE: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ── Chart API response ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

// ── quoteSummary response (assetProfile only) ───────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryData>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryData {
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
}

/// Yahoo Finance gateway.
pub struct YahooGateway {
    client: Client,
}

impl YahooGateway {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol, range and interval.
    fn chart_url(symbol: &str, period: &str, interval: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(CHART_BASE)
            .map_err(|e| FetchError::Unavailable(format!("bad chart URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Unavailable("chart URL cannot take a path".into()))?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", period)
            .append_pair("interval", interval)
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    fn summary_url(symbol: &str) -> Option<Url> {
        let mut url = Url::parse(SUMMARY_BASE).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().push(symbol);
        url.query_pairs_mut().append_pair("modules", "assetProfile");
        Some(url)
    }

    fn fetch_chart(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<(PriceSeries, Option<u64>), FetchError> {
        let url = Self::chart_url(symbol, period, interval)?;
        debug!(%symbol, %period, %interval, "requesting chart");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::not_found(symbol));
        }
        if !status.is_success() {
            return Err(FetchError::Unavailable(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            FetchError::Unavailable(format!("failed to parse response for {symbol}: {e}"))
        })?;
        parse_chart(symbol, chart)
    }

    /// Sector from the asset profile; `None` on any failure.
    fn fetch_sector(&self, symbol: &str) -> Option<String> {
        let url = Self::summary_url(symbol)?;
        let resp = match self.client.get(url).send() {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                debug!(%symbol, status = %resp.status(), "asset profile unavailable");
                return None;
            }
            Err(e) => {
                debug!(%symbol, error = %e, "asset profile request failed");
                return None;
            }
        };
        let summary: SummaryResponse = resp.json().ok()?;
        parse_sector(summary)
    }
}

impl MarketDataGateway for YahooGateway {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Quote, FetchError> {
        let (series, market_volume) = self.fetch_chart(symbol, period, interval)?;
        let sector = self
            .fetch_sector(symbol)
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());
        let volume = market_volume
            .or_else(|| series.last().map(|b| b.volume))
            .unwrap_or(0);
        Ok(Quote {
            series,
            metadata: QuoteMetadata { sector, volume },
        })
    }
}

/// Parse a chart response into a validated series plus the reported market volume.
fn parse_chart(
    symbol: &str,
    resp: ChartResponse,
) -> Result<(PriceSeries, Option<u64>), FetchError> {
    let result = match (resp.chart.result, resp.chart.error) {
        (_, Some(err)) if err.code == "Not Found" => return Err(FetchError::not_found(symbol)),
        (_, Some(err)) => {
            return Err(FetchError::Unavailable(format!(
                "{}: {}",
                err.code,
                err.description.unwrap_or_default()
            )))
        }
        (Some(result), None) => result,
        (None, None) => {
            return Err(FetchError::Unavailable("empty result with no error".into()))
        }
    };

    let Some(data) = result.into_iter().next() else {
        return Err(FetchError::not_found(symbol));
    };
    let market_volume = data.meta.and_then(|m| m.regular_market_volume);

    // No timestamps means no bars in the requested range.
    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        rows.push(RawBar {
            timestamp: chrono::DateTime::from_timestamp(ts, 0),
            open: quote.open.get(i).copied().flatten(),
            high: quote.high.get(i).copied().flatten(),
            low: quote.low.get(i).copied().flatten(),
            close: quote.close.get(i).copied().flatten(),
            volume: quote.volume.get(i).copied().flatten(),
        });
    }

    let (bars, report) = canonicalize(rows);
    if report.dropped_incomplete > 0 || report.dropped_duplicates > 0 {
        warn!(
            %symbol,
            incomplete = report.dropped_incomplete,
            duplicates = report.dropped_duplicates,
            "dropped provider rows"
        );
    }
    if bars.is_empty() {
        return Err(FetchError::not_found(symbol));
    }

    let series = PriceSeries::new(symbol, bars)
        .map_err(|e| FetchError::Unavailable(format!("invalid series for {symbol}: {e}")))?;
    Ok((series, market_volume))
}

fn parse_sector(summary: SummaryResponse) -> Option<String> {
    summary
        .quote_summary
        .result?
        .into_iter()
        .next()?
        .asset_profile?
        .sector
        .filter(|s| !s.trim().is_empty())
}
