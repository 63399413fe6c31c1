//! In-memory quote cache with a fixed time-to-live.
//!
//! Keyed by (symbol, period, interval). An entry is served while
//! `now - fetched_at < 300s`; at or past the TTL the gateway is called again.
//!
//! Failures are never stored: a failed refresh leaves the previous entry for
//! that key exactly as it was. Expired entries for other keys are pruned lazily
//! on each access; there is no background eviction.
//!
//! The cache is owned by its caller and mutated through `&mut self`. Two calls
//! for the same key are not deduplicated.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::gateway::{FetchError, MarketDataGateway};
use crate::domain::Quote;

/// Fixed lifetime of a cached quote.
pub const CACHE_TTL_SECS: i64 = 300;

pub fn cache_ttl() -> Duration {
    Duration::seconds(CACHE_TTL_SECS)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: String,
    pub period: String,
    pub interval: String,
}

impl CacheKey {
    pub fn new(symbol: &str, period: &str, interval: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            period: period.to_string(),
            interval: interval.to_string(),
        }
    }
}

/// A stored gateway response and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub quote: Quote,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.age(now) >= cache_ttl()
    }
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
}

/// Memoizing front for a `MarketDataGateway`.
pub struct QuoteCache<G> {
    gateway: G,
    entries: HashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
}

impl<G: MarketDataGateway> QuoteCache<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Fetch through the cache using the current wall-clock time.
    pub fn fetch(
        &mut self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Quote, FetchError> {
        self.fetch_at(symbol, period, interval, Utc::now())
    }

    /// Fetch through the cache as of `now`.
    pub fn fetch_at(
        &mut self,
        symbol: &str,
        period: &str,
        interval: &str,
        now: DateTime<Utc>,
    ) -> Result<Quote, FetchError> {
        let key = CacheKey::new(symbol, period, interval);

        // The requested key is only ever replaced by a successful fetch.
        self.entries
            .retain(|k, entry| k == &key || !entry.is_expired(now));

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired(now) {
                self.stats.hits += 1;
                debug!(
                    %symbol, %period, %interval,
                    age_secs = entry.age(now).num_seconds(),
                    "quote cache hit"
                );
                return Ok(entry.quote.clone());
            }
        }

        self.stats.misses += 1;
        debug!(%symbol, %period, %interval, gateway = self.gateway.name(), "quote cache miss");

        match self.gateway.fetch_history(symbol, period, interval) {
            Ok(quote) => {
                self.entries.insert(
                    key,
                    CacheEntry {
                        quote: quote.clone(),
                        fetched_at: now,
                    },
                );
                Ok(quote)
            }
            Err(e) => {
                self.stats.failures += 1;
                Err(e)
            }
        }
    }

    /// The entry for a key, if present and not expired as of `now`.
    pub fn get_fresh(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|e| !e.is_expired(now))
    }

    /// Drop one key so the next fetch goes to the gateway. Returns true if it was present.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}
