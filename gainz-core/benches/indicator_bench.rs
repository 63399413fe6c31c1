//! Criterion benchmarks for the indicator engine.
//!
//! Benchmarks:
//! 1. Single indicators over raw bars (EMA, RSI rolling and Wilder, MACD)
//! 2. Full engine pass producing an augmented series
//! 3. Engine pass plus classification

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gainz_core::domain::{PriceBar, PriceSeries};
use gainz_core::indicators::{compute_indicators, Ema, Indicator, Macd, Rsi, RsiMethod};
use gainz_core::signal::classify;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            PriceBar {
                timestamp: start + Duration::minutes(5 * i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

// ── 1. Single indicators ─────────────────────────────────────────────

fn bench_single_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_single");

    for &bar_count in &[78, 390, 2520] {
        let bars = make_bars(bar_count);
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Ema::new(9)),
            Box::new(Ema::new(21)),
            Box::new(Rsi::new(14)),
            Box::new(Rsi::with_method(14, RsiMethod::Wilder)),
            Box::new(Macd::standard_line()),
            Box::new(Macd::standard_signal()),
        ];

        for ind in &indicators {
            group.bench_with_input(BenchmarkId::new(ind.name(), bar_count), &bar_count, |b, _| {
                b.iter(|| ind.compute(black_box(&bars)));
            });
        }
    }

    group.finish();
}

// ── 2. Full engine pass ──────────────────────────────────────────────

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_engine");

    for &bar_count in &[78, 390, 2520] {
        let series = PriceSeries::new("BENCH", make_bars(bar_count)).unwrap();
        group.bench_with_input(
            BenchmarkId::new("compute_indicators", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| compute_indicators(black_box(&series)).unwrap());
            },
        );
    }

    group.finish();
}

// ── 3. Engine plus classifier ────────────────────────────────────────

fn bench_classify(c: &mut Criterion) {
    let series = PriceSeries::new("BENCH", make_bars(390)).unwrap();

    c.bench_function("compute_and_classify_390", |b| {
        b.iter(|| {
            let augmented = compute_indicators(black_box(&series)).unwrap();
            classify(&augmented).unwrap()
        });
    });
}

criterion_group!(benches, bench_single_indicators, bench_engine, bench_classify);
criterion_main!(benches);
