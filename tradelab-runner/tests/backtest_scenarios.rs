//! End-to-end scenario tests for the settlement pipeline.

use chrono::{DateTime, TimeZone, Utc};
use tradelab_core::domain::{Bar, ExitReason, Side};
use tradelab_core::engine::{settle, SettlementConfig};
use tradelab_core::indicators::{FeedBar, Indicators};
use tradelab_core::risk::{apply_risk, RiskConfig};
use tradelab_core::signal::SignalAnnotation;
use tradelab_runner::{run_session, PerformanceMetrics, Session};

fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap() + chrono::Duration::minutes(5 * i as i64)
}

fn feed_bar(i: usize, close: f64, atr: f64) -> FeedBar {
    FeedBar {
        bar: Bar {
            timestamp: ts(i),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000.0,
        },
        ind: Indicators {
            ema_fast: close,
            ema_slow: close,
            vwap: close,
            macd: 0.0,
            macd_signal: 0.0,
            macd_histogram: 0.0,
            rsi: 50.0,
            atr,
            bullish_divergence: false,
            bearish_divergence: false,
        },
    }
}

fn long_entry() -> SignalAnnotation {
    SignalAnnotation {
        long_entry: true,
        ..Default::default()
    }
}

fn exit_long() -> SignalAnnotation {
    SignalAnnotation {
        exit_long: true,
        ..Default::default()
    }
}

fn quiet() -> SignalAnnotation {
    SignalAnnotation::default()
}

/// One unit per entry: 0.01 x 10_000 / 100 = 1.0.
fn unit_cfg() -> SettlementConfig {
    SettlementConfig {
        initial_capital: 10_000.0,
        position_size_fraction: 0.01,
    }
}

/// Scenario 1: LONG entry at close 100 with ATR 10 and multipliers
/// (1.5, 2.0, 3.5) sets stop 85 / TP1 120 / TP2 135; close 86 stops out at
/// 85 with negative P&L.
#[test]
fn scenario_1_stop_loss() {
    let feed = vec![feed_bar(0, 100.0, 10.0), feed_bar(1, 86.0, 10.0)];
    let signals = vec![long_entry(), quiet()];

    let risk = apply_risk(&feed, &signals, &RiskConfig::default());
    let pos = risk[0].position.open().unwrap();
    assert_eq!(pos.stop_loss, 85.0);
    assert_eq!(pos.take_profit_1, 120.0);
    assert_eq!(pos.take_profit_2, 135.0);

    assert!(risk[1].sl_hit);
    assert_eq!(risk[1].exit_price, Some(85.0));
    assert_eq!(risk[1].exit_reason, Some(ExitReason::StopLoss));

    let out = settle(&feed, &risk, &unit_cfg());
    assert_eq!(out.trades.len(), 1);
    assert!(out.trades[0].pnl < 0.0);
}

/// Scenario 2: size 1.0 at 100; close 121 realizes the TP1 tranche
/// (0.5 x 20 = 10) and halves the size; close 136 realizes TP2
/// (0.5 x 35 = 17.5).
#[test]
fn scenario_2_partial_then_full_take_profit() {
    let feed = vec![
        feed_bar(0, 100.0, 10.0),
        feed_bar(1, 121.0, 10.0),
        feed_bar(2, 136.0, 10.0),
    ];
    let signals = vec![long_entry(), quiet(), quiet()];

    let risk = apply_risk(&feed, &signals, &RiskConfig::default());
    let out = settle(&feed, &risk, &unit_cfg());

    assert_eq!(out.trades.len(), 2);
    assert_eq!(out.trades[0].exit_reason, ExitReason::TakeProfit1);
    assert!((out.trades[0].pnl - 10.0).abs() < 1e-10);
    assert_eq!(out.trades[1].exit_reason, ExitReason::TakeProfit2);
    assert!((out.trades[1].pnl - 17.5).abs() < 1e-10);

    let final_point = out.equity.last().unwrap();
    assert!((final_point.equity - 10_027.5).abs() < 1e-9);
}

/// Scenario 3: a series that never satisfies an entry condition settles
/// zero trades, constant equity, zero drawdown.
#[test]
fn scenario_3_no_signals() {
    let bars: Vec<Bar> = (0..200)
        .map(|i| {
            // A steady drift with no crossovers after warm-up.
            let close = 100.0 + i as f64 * 0.05;
            Bar {
                timestamp: ts(i),
                open: close,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1_000.0,
            }
        })
        .collect();

    let result = run_session(&Session {
        symbol: "BTCUSDT".into(),
        timeframe: "5m".into(),
        bars,
        config: Default::default(),
    })
    .unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.metrics.trade_count, 0);
    for point in &result.equity {
        assert_eq!(point.equity, result.initial_capital);
        assert_eq!(point.drawdown_pct, 0.0);
    }
}

/// Scenario 4: an exit-long candidate while flat is a no-op — no trade,
/// no equity change.
#[test]
fn scenario_4_exit_while_flat() {
    let feed = vec![feed_bar(0, 100.0, 10.0), feed_bar(1, 101.0, 10.0)];
    let signals = vec![quiet(), exit_long()];

    let risk = apply_risk(&feed, &signals, &RiskConfig::default());
    let out = settle(&feed, &risk, &unit_cfg());

    assert!(out.trades.is_empty());
    assert_eq!(out.equity[1].equity, 10_000.0);
    assert_eq!(out.equity[1].pnl, 0.0);
}

/// Reporting contract: every headline metric derives from trades and
/// equity points alone, with consistent totals.
#[test]
fn metrics_are_consistent_with_trades() {
    let feed = vec![
        feed_bar(0, 100.0, 10.0),
        feed_bar(1, 121.0, 10.0),
        feed_bar(2, 84.0, 10.0),
        feed_bar(3, 100.0, 10.0),
    ];
    let signals = vec![long_entry(), quiet(), quiet(), quiet()];

    let risk = apply_risk(&feed, &signals, &RiskConfig::default());
    let out = settle(&feed, &risk, &unit_cfg());
    let metrics = PerformanceMetrics::compute(&out.equity, &out.trades, 10_000.0);

    // TP1 tranche +10, stop on the remaining half: 0.5 * (85 - 100) = -7.5.
    assert_eq!(metrics.trade_count, 2);
    assert!((metrics.total_pnl - 2.5).abs() < 1e-10);
    assert!((metrics.final_equity - 10_002.5).abs() < 1e-9);
    assert!((metrics.win_rate - 50.0).abs() < 1e-10);
    assert!((metrics.profit_factor - (10.0 / 7.5)).abs() < 1e-10);
    assert!(metrics.max_drawdown_pct > 0.0);

    let side: Vec<Side> = out.trades.iter().map(|t| t.side).collect();
    assert_eq!(side, vec![Side::Long, Side::Long]);
}

/// A square-wave market (abrupt regime flips between two flat levels)
/// exercised end-to-end through the session runner: the trade list and the
/// equity curve stay mutually consistent.
#[test]
fn session_end_to_end_consistency() {
    let bars: Vec<Bar> = (0..400)
        .map(|i| {
            let close = if (i / 25) % 2 == 1 { 108.0 } else { 92.0 };
            Bar {
                timestamp: ts(i),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000.0,
            }
        })
        .collect();

    let result = run_session(&Session {
        symbol: "BTCUSDT".into(),
        timeframe: "5m".into(),
        bars,
        config: Default::default(),
    })
    .unwrap();

    assert!(!result.trades.is_empty(), "expected settled trades");

    // Total realized P&L across trades equals the equity curve's
    // cumulative P&L at the end.
    let trade_pnl: f64 = result.trades.iter().map(|t| t.pnl).sum();
    let final_cum = result.equity.last().unwrap().cumulative_pnl;
    assert!((trade_pnl - final_cum).abs() < 1e-9);

    // Every partial is followed by exactly one full close of the same
    // position before the next entry.
    let mut open_tranches = 0_i32;
    for trade in &result.trades {
        if trade.exit_reason == ExitReason::TakeProfit1 {
            open_tranches += 1;
            assert!(open_tranches <= 1);
        } else {
            open_tranches = 0;
        }
    }
}
