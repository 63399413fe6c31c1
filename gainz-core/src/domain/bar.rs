//! PriceBar and PriceSeries: the market data units the pipeline consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One sampled OHLCV observation.
///
/// Bars are immutable once fetched; the indicator engine reads them but never
/// writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// All OHLC prices finite and strictly positive.
    pub fn has_positive_prices(&self) -> bool {
        !self.is_void() && self.open > 0.0 && self.high > 0.0 && self.low > 0.0 && self.close > 0.0
    }
}

/// Why a bar sequence was rejected as a `PriceSeries`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar {index} has non-positive or non-finite prices")]
    InvalidPrice { index: usize },

    #[error("bar {index} is not strictly after the previous bar ({timestamp})")]
    OutOfOrder {
        index: usize,
        timestamp: DateTime<Utc>,
    },
}

/// Ordered OHLCV bars for one symbol, strictly ascending by timestamp.
///
/// The only way to build one is through [`PriceSeries::new`], which enforces
/// ordering, timestamp uniqueness and positive prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.has_positive_prices() {
                return Err(SeriesError::InvalidPrice { index });
            }
        }
        for (offset, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SeriesError::OutOfOrder {
                    index: offset + 1,
                    timestamp: pair[1].timestamp,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
