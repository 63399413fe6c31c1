//! Indicator implementations and the engine that assembles them.
//!
//! Each indicator is a pure function from bar history to a numeric series of
//! the same length, with `f64::NAN` during warm-up. The engine converts those
//! NaN markers into `Option` at the `IndicatorSet` boundary.
//!
//! Multi-series indicators (MACD) are exposed as separate named instances per
//! line, keeping the single-series `Indicator` trait unchanged.

pub mod ema;
pub mod engine;
pub mod macd;
pub mod rsi;

pub use ema::{ema_of_series, Ema};
pub use engine::{
    compute_indicators, compute_indicators_with, AugmentedSeries, IndicatorError, IndicatorRow,
    IndicatorSet,
};
pub use macd::{Macd, MacdLine};
pub use rsi::{Rsi, RsiMethod};

use crate::domain::PriceBar;

/// Trait for indicators.
///
/// The first `lookback()` values of `compute` are `f64::NAN`.
/// No value at bar t may depend on bars after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_9", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;
}

/// Create synthetic five-minute bars from close prices for testing.
///
/// open = prev_close (or close for the first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: base + chrono::Duration::minutes(5 * i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::PriceSeries {
    crate::domain::PriceSeries::new("TEST", make_bars(closes)).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
