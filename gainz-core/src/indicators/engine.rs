//! Indicator engine: derives the dashboard's indicator columns from a price series.
//!
//! The engine is a pure function: the same `PriceSeries` always yields the
//! same `AugmentedSeries`. Indicator values are never cached; callers that
//! hold a newer series must run the engine again.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::{Ema, Indicator, Macd, Rsi, RsiMethod};
use crate::domain::{PriceBar, PriceSeries};

pub const EMA_FAST_PERIOD: usize = 9;
pub const EMA_SLOW_PERIOD: usize = 21;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST_PERIOD: usize = 12;
pub const MACD_SLOW_PERIOD: usize = 26;
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// Fewest bars the engine accepts: RSI needs at least one close-to-close change.
pub const MIN_BARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

/// Indicator values for one bar. `None` marks a value still in warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

/// Per-bar indicator rows aligned 1:1 with the source series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    rows: Vec<IndicatorRow>,
}

impl IndicatorSet {
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A price series together with the indicators derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentedSeries {
    series: PriceSeries,
    indicators: IndicatorSet,
}

impl AugmentedSeries {
    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    pub fn symbol(&self) -> &str {
        self.series.symbol()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Bars paired with their indicator rows, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&PriceBar, &IndicatorRow)> {
        self.series.bars().iter().zip(self.indicators.rows())
    }

    /// The most recent bar and its indicator row.
    pub fn last(&self) -> Option<(&PriceBar, &IndicatorRow)> {
        self.series.last().zip(self.indicators.last())
    }

    pub fn into_parts(self) -> (PriceSeries, IndicatorSet) {
        (self.series, self.indicators)
    }
}

/// Compute EMA 9, EMA 21, RSI 14 (rolling) and MACD 12/26/9 for every bar.
pub fn compute_indicators(series: &PriceSeries) -> Result<AugmentedSeries, IndicatorError> {
    compute_indicators_with(series, RsiMethod::Rolling)
}

/// Same as [`compute_indicators`] with an explicit RSI averaging method.
pub fn compute_indicators_with(
    series: &PriceSeries,
    rsi_method: RsiMethod,
) -> Result<AugmentedSeries, IndicatorError> {
    if series.len() < MIN_BARS {
        return Err(IndicatorError::InsufficientData {
            required: MIN_BARS,
            actual: series.len(),
        });
    }

    let bars = series.bars();
    let ema_fast = Ema::new(EMA_FAST_PERIOD).compute(bars);
    let ema_slow = Ema::new(EMA_SLOW_PERIOD).compute(bars);
    let rsi = Rsi::with_method(RSI_PERIOD, rsi_method).compute(bars);
    let macd =
        Macd::line(MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD).compute(bars);
    let macd_signal =
        Macd::signal(MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD).compute(bars);

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            timestamp: bar.timestamp,
            ema_fast: defined(ema_fast[i]),
            ema_slow: defined(ema_slow[i]),
            rsi: defined(rsi[i]),
            macd: defined(macd[i]),
            macd_signal: defined(macd_signal[i]),
        })
        .collect();

    Ok(AugmentedSeries {
        series: series.clone(),
        indicators: IndicatorSet { rows },
    })
}

fn defined(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 150.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn rejects_empty_series() {
        let series = make_series(&[]);
        assert_eq!(
            compute_indicators(&series).unwrap_err(),
            IndicatorError::InsufficientData {
                required: 2,
                actual: 0
            }
        );
    }

    #[test]
    fn rejects_single_bar() {
        let series = make_series(&[101.5]);
        assert!(matches!(
            compute_indicators(&series),
            Err(IndicatorError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn short_series_is_all_undefined_but_ok() {
        let series = make_series(&[10.0, 11.0, 12.0]);
        let augmented = compute_indicators(&series).unwrap();
        assert_eq!(augmented.len(), 3);
        for (_, row) in augmented.iter() {
            assert!(row.ema_fast.is_none());
            assert!(row.ema_slow.is_none());
            assert!(row.rsi.is_none());
            assert!(row.macd.is_none());
            assert!(row.macd_signal.is_none());
        }
    }

    #[test]
    fn warmup_boundaries() {
        let series = make_series(&wave(40));
        let augmented = compute_indicators(&series).unwrap();
        let rows = augmented.indicators().rows();

        assert!(rows[7].ema_fast.is_none());
        assert!(rows[8].ema_fast.is_some());
        assert!(rows[19].ema_slow.is_none());
        assert!(rows[20].ema_slow.is_some());
        assert!(rows[13].rsi.is_none());
        assert!(rows[14].rsi.is_some());
        assert!(rows[24].macd.is_none());
        assert!(rows[25].macd.is_some());
        assert!(rows[32].macd_signal.is_none());
        assert!(rows[33].macd_signal.is_some());
    }

    #[test]
    fn rows_align_with_bar_timestamps() {
        let series = make_series(&wave(30));
        let augmented = compute_indicators(&series).unwrap();
        for (bar, row) in augmented.iter() {
            assert_eq!(bar.timestamp, row.timestamp);
        }
    }

    #[test]
    fn running_twice_is_identical() {
        let series = make_series(&wave(60));
        let first = compute_indicators(&series).unwrap();
        let second = compute_indicators(&series).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn source_series_is_preserved() {
        let series = make_series(&wave(30));
        let augmented = compute_indicators(&series).unwrap();
        assert_eq!(augmented.series(), &series);
    }

    #[test]
    fn wilder_method_changes_only_rsi() {
        let series = make_series(&wave(40));
        let rolling = compute_indicators(&series).unwrap();
        let wilder = compute_indicators_with(&series, RsiMethod::Wilder).unwrap();
        let (_, r) = rolling.last().unwrap();
        let (_, w) = wilder.last().unwrap();
        assert_eq!(r.ema_fast, w.ema_fast);
        assert_eq!(r.macd_signal, w.macd_signal);
        assert_ne!(r.rsi, w.rsi);
    }
}
