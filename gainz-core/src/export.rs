//! CSV export of an augmented series.
//!
//! One row per bar: timestamp (RFC 3339), OHLCV, then the indicator columns.
//! Undefined indicator values are written as empty cells.

use std::io::Write;

use serde::Serialize;

use crate::indicators::AugmentedSeries;

#[derive(Serialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    ema_fast: Option<f64>,
    ema_slow: Option<f64>,
    rsi: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
}

/// Write the series and its indicators as CSV with a header row.
pub fn write_csv<W: Write>(augmented: &AugmentedSeries, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (bar, row) in augmented.iter() {
        wtr.serialize(CsvRow {
            timestamp: bar.timestamp.to_rfc3339(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            ema_fast: row.ema_fast,
            ema_slow: row.ema_slow,
            rsi: row.rsi,
            macd: row.macd,
            macd_signal: row.macd_signal,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
