//! Market data gateway trait and structured fetch errors.
//!
//! The gateway abstracts over quote providers so the cache and pipeline can be
//! exercised against a scripted gateway in tests. Gateways know nothing about
//! caching; `QuoteCache` sits above this trait.

use thiserror::Error;

use crate::domain::Quote;

/// Why a history fetch failed.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider does not know the symbol, or returned no bars for it.
    #[error("symbol not found: {symbol}")]
    NotFound { symbol: String },

    /// Network failure, provider error, or an unreadable response.
    #[error("market data unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    pub fn not_found(symbol: impl Into<String>) -> Self {
        FetchError::NotFound {
            symbol: symbol.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

/// Source of price history and quote metadata.
pub trait MarketDataGateway {
    /// Human-readable name of this gateway.
    fn name(&self) -> &str;

    /// Fetch OHLCV history for `symbol` covering `period` (e.g. "1d", "5d",
    /// "1mo") sampled at `interval` (e.g. "5m", "1h", "1d").
    fn fetch_history(&self, symbol: &str, period: &str, interval: &str)
        -> Result<Quote, FetchError>;
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Quote, FetchError> {
        (**self).fetch_history(symbol, period, interval)
    }
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Quote, FetchError> {
        (**self).fetch_history(symbol, period, interval)
    }
}
