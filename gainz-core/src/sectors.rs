//! Sector catalog: named groups of tickers for quick watchlist seeding.
//!
//! Sectors keep their declaration order, both for the built-in default and
//! for catalogs read from the `[sectors]` table of a config file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorCatalog {
    sectors: IndexMap<String, Vec<String>>,
}

impl SectorCatalog {
    pub fn new() -> Self {
        Self {
            sectors: IndexMap::new(),
        }
    }

    /// Add or replace a sector.
    pub fn insert(&mut self, name: impl Into<String>, tickers: Vec<String>) {
        self.sectors.insert(name.into(), tickers);
    }

    /// Tickers for a sector, matched case-insensitively.
    pub fn sector_tickers(&self, name: &str) -> Option<&[String]> {
        self.sectors
            .iter()
            .find(|(sector, _)| sector.eq_ignore_ascii_case(name))
            .map(|(_, tickers)| tickers.as_slice())
    }

    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.keys().map(|s| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sectors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn ticker_count(&self) -> usize {
        self.sectors.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// The three sectors the dashboard ships with.
    pub fn default_catalog() -> Self {
        fn tickers(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        let mut catalog = Self::new();
        catalog.insert(
            "Technology",
            tickers(&["AAPL", "MSFT", "GOOGL", "NVDA", "META", "TSLA"]),
        );
        catalog.insert("Healthcare", tickers(&["JNJ", "UNH", "LLY", "PFE", "ABBV"]));
        catalog.insert("Financial", tickers(&["BRK-B", "JPM", "V", "MA", "BAC"]));
        catalog
    }
}

impl Default for SectorCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}
