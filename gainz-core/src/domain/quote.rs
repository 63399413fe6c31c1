//! Gateway payload: price history plus descriptive metadata.

use serde::{Deserialize, Serialize};

use super::bar::PriceSeries;

/// Sector label used when the provider has no profile for a symbol.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Descriptive metadata returned alongside a price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteMetadata {
    pub sector: String,
    /// Last regular-market volume reported by the provider.
    pub volume: u64,
}

impl Default for QuoteMetadata {
    fn default() -> Self {
        Self {
            sector: UNKNOWN_SECTOR.to_string(),
            volume: 0,
        }
    }
}

/// A successful gateway response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub series: PriceSeries,
    pub metadata: QuoteMetadata,
}
