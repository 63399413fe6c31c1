//! Shared fixtures for the integration tests: synthetic bars and a scripted gateway.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use gainz_core::data::{FetchError, MarketDataGateway};
use gainz_core::domain::{PriceBar, PriceSeries, Quote, QuoteMetadata};

/// 5-minute bars starting at the 2024-03-01 US open. Each bar opens at the
/// previous close.
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: start + Duration::minutes(5 * i as i64),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: 1_000 + i as u64,
            }
        })
        .collect()
}

pub fn make_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(symbol, make_bars(closes)).unwrap()
}

/// Steady climb with alternating noise: EMA 9 ends above EMA 21, RSI near 55.
pub fn uptrend(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 0.2 * i as f64 + if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect()
}

/// Mirror image of [`uptrend`]: EMA 9 ends below EMA 21, RSI near 45.
pub fn downtrend(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 200.0 - 0.2 * i as f64 + if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect()
}

/// Gateway backed by a fixed table of per-symbol outcomes. Unknown symbols
/// are `NotFound`. Every call is counted per symbol.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: HashMap<String, Result<Vec<f64>, FetchError>>,
    calls: RefCell<HashMap<String, usize>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.responses.insert(symbol.to_string(), Ok(closes));
        self
    }

    pub fn with_error(mut self, symbol: &str, error: FetchError) -> Self {
        self.responses.insert(symbol.to_string(), Err(error));
        self
    }

    pub fn calls(&self, symbol: &str) -> usize {
        self.calls.borrow().get(symbol).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }
}

impl MarketDataGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_history(
        &self,
        symbol: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Quote, FetchError> {
        *self.calls.borrow_mut().entry(symbol.to_string()).or_insert(0) += 1;

        match self.responses.get(symbol) {
            Some(Ok(closes)) => Ok(Quote {
                series: PriceSeries::new(symbol, make_bars(closes))
                    .map_err(|e| FetchError::Unavailable(e.to_string()))?,
                metadata: QuoteMetadata {
                    sector: "Technology".into(),
                    volume: 1_234_567,
                },
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::not_found(symbol)),
        }
    }
}
