//! Domain types for Gainz

pub mod bar;
pub mod quote;

pub use bar::{PriceBar, PriceSeries, SeriesError};
pub use quote::{Quote, QuoteMetadata, UNKNOWN_SECTOR};

/// Symbol type alias
pub type Symbol = String;

/// Trim and upper-case a user-entered ticker. Returns `None` for blank input.
pub fn normalize_symbol(raw: &str) -> Option<Symbol> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
