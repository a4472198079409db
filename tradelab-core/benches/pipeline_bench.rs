//! Pipeline throughput bench: full backtest over synthetic intraday bars.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tradelab_core::domain::Bar;
use tradelab_core::engine::{run_backtest, BacktestConfig};

fn synthetic_bars(n: usize) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.13).sin() * 8.0 + (i as f64 * 0.011).cos() * 3.0;
            Bar {
                timestamp: start + chrono::Duration::minutes(5 * i as i64),
                open: close - 0.2,
                high: close + 1.2,
                low: close - 1.2,
                close,
                volume: 1_000.0 + (i % 97) as f64,
            }
        })
        .collect()
}

fn bench_backtest(c: &mut Criterion) {
    let bars = synthetic_bars(8_640); // 30 days of 5-minute bars
    let cfg = BacktestConfig::default();

    c.bench_function("backtest_30d_5m", |b| {
        b.iter(|| run_backtest(black_box(&bars), black_box(&cfg)).unwrap())
    });
}

criterion_group!(benches, bench_backtest);
criterion_main!(benches);
