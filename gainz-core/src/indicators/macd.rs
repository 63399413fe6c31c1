//! Moving Average Convergence Divergence (MACD).
//!
//! Two lines (separate Indicator instances):
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal), seeded by the SMA of the first `signal` defined line values
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for the signal.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::PriceBar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::build(fast, slow, signal, MacdLine::Line)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::build(fast, slow, signal, MacdLine::Signal)
    }

    /// The conventional 12/26/9 MACD line.
    pub fn standard_line() -> Self {
        Self::line(12, 26, 9)
    }

    /// The conventional 12/26/9 signal line.
    pub fn standard_signal() -> Self {
        Self::signal(12, 26, 9)
    }

    fn build(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        let name = match line {
            MacdLine::Line => format!("macd_{fast}_{slow}"),
            MacdLine::Signal => format!("macd_signal_{fast}_{slow}_{signal}"),
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Line => self.slow - 1,
            MacdLine::Signal => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let macd_line = macd_line(&closes, self.fast, self.slow);
        match self.line {
            MacdLine::Line => macd_line,
            MacdLine::Signal => ema_of_series(&macd_line, self.signal),
        }
    }
}

/// EMA(fast) - EMA(slow); NaN wherever either side is still warming up.
fn macd_line(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_ema = ema_of_series(closes, fast);
    let slow_ema = ema_of_series(closes, slow);
    fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn trending_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.7).sin()).collect()
    }

    #[test]
    fn line_defined_from_slow_minus_one() {
        let bars = make_bars(&trending_closes(30));
        let result = Macd::standard_line().compute(&bars);
        assert!(result[24].is_nan());
        assert!(!result[25].is_nan());
    }

    #[test]
    fn signal_defined_after_combined_warmup() {
        let bars = make_bars(&trending_closes(40));
        let result = Macd::standard_signal().compute(&bars);
        assert!(result[32].is_nan());
        assert!(!result[33].is_nan());
        assert_eq!(Macd::standard_signal().lookback(), 33);
    }

    #[test]
    fn line_matches_ema_difference() {
        let closes = trending_closes(35);
        let bars = make_bars(&closes);
        let line = Macd::line(3, 5, 2).compute(&bars);
        let fast = ema_of_series(&closes, 3);
        let slow = ema_of_series(&closes, 5);
        for i in 4..35 {
            assert_approx(line[i], fast[i] - slow[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn signal_seeded_by_mean_of_first_defined_line_values() {
        let closes = trending_closes(12);
        let bars = make_bars(&closes);
        let line = Macd::line(2, 4, 3).compute(&bars);
        let signal = Macd::signal(2, 4, 3).compute(&bars);
        // line defined from index 3; signal seed at index 5
        let seed = (line[3] + line[4] + line[5]) / 3.0;
        assert!(signal[4].is_nan());
        assert_approx(signal[5], seed, DEFAULT_EPSILON);
        assert_approx(signal[6], 0.5 * line[6] + 0.5 * seed, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_prices_give_zero_macd() {
        let bars = make_bars(&[42.0; 40]);
        let line = Macd::standard_line().compute(&bars);
        let signal = Macd::standard_signal().compute(&bars);
        assert_approx(line[39], 0.0, DEFAULT_EPSILON);
        assert_approx(signal[39], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    #[should_panic(expected = "fast period must be shorter")]
    fn rejects_inverted_periods() {
        let _ = Macd::line(26, 12, 9);
    }
}
