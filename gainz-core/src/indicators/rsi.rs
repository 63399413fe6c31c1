//! Relative Strength Index (RSI).
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), computed over close-to-close changes.
//! Lookback: period (the first change exists at bar 1).
//! Edge case: avg_loss == 0 → RSI = 100.
//!
//! Two averaging methods are supported. `Rolling` takes the plain mean of the
//! last `period` gains and losses and is what the dashboard uses. `Wilder`
//! seeds with the same mean and then smooths recursively with alpha = 1/period.

use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::domain::PriceBar;

/// How gains and losses are averaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiMethod {
    #[default]
    Rolling,
    Wilder,
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    method: RsiMethod,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_method(period, RsiMethod::Rolling)
    }

    pub fn with_method(period: usize, method: RsiMethod) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        let name = match method {
            RsiMethod::Rolling => format!("rsi_{period}"),
            RsiMethod::Wilder => format!("rsi_wilder_{period}"),
        };
        Self {
            period,
            method,
            name,
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // gains[i] / losses[i] describe the move from bar i-1 to bar i; index 0 unused.
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let change = bars[i].close - bars[i - 1].close;
            if change > 0.0 {
                gains[i] = change;
            } else {
                losses[i] = -change;
            }
        }

        let period = self.period as f64;
        match self.method {
            RsiMethod::Rolling => {
                for i in self.period..n {
                    let window = (i + 1 - self.period)..=i;
                    let avg_gain = gains[window.clone()].iter().sum::<f64>() / period;
                    let avg_loss = losses[window].iter().sum::<f64>() / period;
                    result[i] = compute_rsi(avg_gain, avg_loss);
                }
            }
            RsiMethod::Wilder => {
                let mut avg_gain = gains[1..=self.period].iter().sum::<f64>() / period;
                let mut avg_loss = losses[1..=self.period].iter().sum::<f64>() / period;
                result[self.period] = compute_rsi(avg_gain, avg_loss);

                let alpha = 1.0 / period;
                for i in (self.period + 1)..n {
                    avg_gain = alpha * gains[i] + (1.0 - alpha) * avg_gain;
                    avg_loss = alpha * losses[i] + (1.0 - alpha) * avg_loss;
                    result[i] = compute_rsi(avg_gain, avg_loss);
                }
            }
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
