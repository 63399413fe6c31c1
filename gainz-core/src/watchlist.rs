//! Session watchlist: an insertion-ordered set of symbols.
//!
//! Lives only as long as the process that owns it; nothing is written to disk.

use indexmap::IndexSet;

use crate::domain::{normalize_symbol, Symbol};
use crate::sectors::SectorCatalog;

pub const DEFAULT_WATCHLIST: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "NVDA", "TSLA"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    symbols: IndexSet<Symbol>,
}

impl Watchlist {
    /// A watchlist seeded with the default symbols.
    pub fn new() -> Self {
        Self::from_symbols(DEFAULT_WATCHLIST)
    }

    pub fn empty() -> Self {
        Self {
            symbols: IndexSet::new(),
        }
    }

    /// Build from arbitrary input; blanks and duplicates are skipped.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::empty();
        for symbol in symbols {
            list.add(symbol.as_ref());
        }
        list
    }

    /// Add a symbol at the end. Returns false for blank input or a symbol already present.
    pub fn add(&mut self, raw: &str) -> bool {
        match normalize_symbol(raw) {
            Some(symbol) => self.symbols.insert(symbol),
            None => false,
        }
    }

    /// Remove a symbol, keeping the order of the rest.
    pub fn remove(&mut self, raw: &str) -> bool {
        match normalize_symbol(raw) {
            Some(symbol) => self.symbols.shift_remove(&symbol),
            None => false,
        }
    }

    pub fn contains(&self, raw: &str) -> bool {
        normalize_symbol(raw).is_some_and(|s| self.symbols.contains(&s))
    }

    /// Append every ticker of a sector. Returns how many were new, or `None`
    /// if the catalog has no such sector.
    pub fn extend_from_sector(&mut self, catalog: &SectorCatalog, sector: &str) -> Option<usize> {
        let tickers = catalog.sector_tickers(sector)?;
        Some(tickers.iter().filter(|t| self.add(t)).count())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.as_str())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.symbols.get_index(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new()
    }
}
