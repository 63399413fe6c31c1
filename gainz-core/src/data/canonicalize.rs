//! Raw provider rows → canonical bar order.
//!
//! Providers occasionally return rows out of order, repeat a timestamp at a
//! session boundary, or emit placeholder rows with missing prices. Canonical
//! form is: incomplete rows dropped, sorted ascending, first row per
//! timestamp kept.

use chrono::{DateTime, Utc};

use crate::domain::PriceBar;

/// One provider row before validation. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBar {
    pub timestamp: Option<DateTime<Utc>>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Counts of rows removed during canonicalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalReport {
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
}

/// Drop incomplete rows, sort by timestamp and dedupe (keep first).
///
/// A missing volume is read as zero; any missing timestamp or price drops the row.
pub fn canonicalize(rows: Vec<RawBar>) -> (Vec<PriceBar>, CanonicalReport) {
    let mut report = CanonicalReport::default();

    let mut bars: Vec<PriceBar> = rows
        .into_iter()
        .filter_map(|row| {
            let bar = to_bar(&row);
            if bar.is_none() {
                report.dropped_incomplete += 1;
            }
            bar
        })
        .collect();

    // Stable sort keeps provider order among equal timestamps, so dedup keeps the first.
    bars.sort_by_key(|b| b.timestamp);
    let before = bars.len();
    bars.dedup_by_key(|b| b.timestamp);
    report.dropped_duplicates = before - bars.len();

    (bars, report)
}

fn to_bar(row: &RawBar) -> Option<PriceBar> {
    let bar = PriceBar {
        timestamp: row.timestamp?,
        open: row.open?,
        high: row.high?,
        low: row.low?,
        close: row.close?,
        volume: row.volume.unwrap_or(0),
    };
    bar.has_positive_prices().then_some(bar)
}
