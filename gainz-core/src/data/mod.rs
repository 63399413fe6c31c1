//! Market data: gateway trait, Yahoo gateway, canonicalization and the quote cache

pub mod cache;
pub mod canonicalize;
pub mod gateway;
pub mod yahoo;

pub use cache::{cache_ttl, CacheEntry, CacheKey, CacheStats, QuoteCache, CACHE_TTL_SECS};
pub use canonicalize::{canonicalize, CanonicalReport, RawBar};
pub use gateway::{FetchError, MarketDataGateway};
pub use yahoo::YahooGateway;
