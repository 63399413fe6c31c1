//! Signal classifier: EMA trend plus RSI guard on the most recent bar.
//!
//! Rules, first match wins:
//! 1. ema_fast > ema_slow and rsi < 70 → Buy
//! 2. ema_fast < ema_slow and rsi > 30 → Sell
//! 3. anything else → Hold
//!
//! Both RSI thresholds are exclusive: an RSI of exactly 70 blocks a Buy and
//! exactly 30 blocks a Sell.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::{AugmentedSeries, IndicatorRow};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("undefined input: {field} is not available on the latest bar")]
    UndefinedInput { field: &'static str },
}

/// Apply the rule table to already-defined values.
pub fn classify_values(ema_fast: f64, ema_slow: f64, rsi: f64) -> Signal {
    if ema_fast > ema_slow && rsi < RSI_OVERBOUGHT {
        Signal::Buy
    } else if ema_fast < ema_slow && rsi > RSI_OVERSOLD {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Classify one indicator row, failing if any rule input is still warming up.
pub fn classify_row(row: &IndicatorRow) -> Result<Signal, SignalError> {
    let ema_fast = row
        .ema_fast
        .ok_or(SignalError::UndefinedInput { field: "ema_fast" })?;
    let ema_slow = row
        .ema_slow
        .ok_or(SignalError::UndefinedInput { field: "ema_slow" })?;
    let rsi = row.rsi.ok_or(SignalError::UndefinedInput { field: "rsi" })?;
    Ok(classify_values(ema_fast, ema_slow, rsi))
}

/// Classify the latest bar of an augmented series.
pub fn classify(augmented: &AugmentedSeries) -> Result<Signal, SignalError> {
    let row = augmented
        .indicators()
        .last()
        .ok_or(SignalError::UndefinedInput { field: "ema_fast" })?;
    classify_row(row)
}
