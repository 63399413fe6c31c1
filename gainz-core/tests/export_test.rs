//! CSV export to a real file.

mod common;

use common::{make_series, uptrend};
use gainz_core::export::write_csv;
use gainz_core::indicators::compute_indicators;

#[test]
fn csv_file_has_header_and_every_bar() {
    let closes = uptrend(40);
    let augmented = compute_indicators(&make_series("AAPL", &closes)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aapl.csv");
    let file = std::fs::File::create(&path).unwrap();
    write_csv(&augmented, file).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "timestamp");
    assert_eq!(&headers[6], "ema_fast");
    assert_eq!(&headers[10], "macd_signal");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 40);

    // EMA 9 is undefined until the ninth bar.
    assert_eq!(&records[7][6], "");
    assert!(!records[8][6].is_empty());

    // The last row is fully populated.
    let last = &records[39];
    for col in 6..11 {
        assert!(!last[col].is_empty(), "column {col} empty");
    }
    let close: f64 = last[4].parse().unwrap();
    assert_eq!(close, closes[39]);
}
