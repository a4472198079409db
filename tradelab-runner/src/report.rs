//! Text report rendering for a settled session.

use crate::session::SessionResult;
use std::fmt::Write;

/// Render the performance report as plain text.
///
/// Shows the headline numbers, trade statistics, and the first ten trades.
pub fn render_report(result: &SessionResult) -> String {
    let m = &result.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(
        out,
        "BACKTEST REPORT - {} ({})",
        result.symbol, result.timeframe
    );
    let _ = writeln!(out, "{}", "=".repeat(50));

    if let (Some(first), Some(last)) = (result.equity.first(), result.equity.last()) {
        let _ = writeln!(out, "Test Period: {} to {}", first.timestamp, last.timestamp);
    }
    let _ = writeln!(out, "Initial Capital: ${:.2}", result.initial_capital);
    let _ = writeln!(out, "Final Equity: ${:.2}", m.final_equity);
    let _ = writeln!(out, "Total Return: {:.2}%", m.return_pct);
    let _ = writeln!(out, "Total P&L: ${:.2}", m.total_pnl);
    let _ = writeln!(out, "Max Drawdown: {:.2}%", m.max_drawdown_pct);
    let _ = writeln!(out);
    let _ = writeln!(out, "Trade Statistics:");
    let _ = writeln!(out, "Number of Trades: {}", m.trade_count);
    let _ = writeln!(out, "Win Rate: {:.2}%", m.win_rate);
    let _ = writeln!(out, "Profit Factor: {:.2}", m.profit_factor);
    let _ = writeln!(out, "Average P&L per Trade: ${:.2}", m.avg_pnl_per_trade);
    let _ = writeln!(out, "Average Win: ${:.2}", m.avg_win);
    let _ = writeln!(out, "Average Loss: ${:.2}", m.avg_loss);

    if !result.trades.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Trade Breakdown:");
        let _ = writeln!(
            out,
            "{:<4} {:<17} {:<17} {:<6} {:>10} {:>10} {:>10}  {}",
            "#", "Entry", "Exit", "Side", "Entry Px", "Exit Px", "P&L", "Reason"
        );
        for (i, trade) in result.trades.iter().take(10).enumerate() {
            let _ = writeln!(
                out,
                "{:<4} {:<17} {:<17} {:<6} {:>10.2} {:>10.2} {:>10.2}  {}",
                i + 1,
                trade.entry_time.format("%Y-%m-%d %H:%M"),
                trade.exit_time.format("%Y-%m-%d %H:%M"),
                trade.side.as_str(),
                trade.entry_price,
                trade.exit_price,
                trade.pnl,
                trade.exit_reason.as_str()
            );
        }
        if result.trades.len() > 10 {
            let _ = writeln!(out, "... and {} more trades", result.trades.len() - 10);
        }
    }

    let _ = writeln!(out, "{}", "=".repeat(50));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PerformanceMetrics;
    use chrono::{TimeZone, Utc};
    use tradelab_core::domain::{EquityPoint, ExitReason, Side, TradeRecord};

    fn sample_result(trade_count: usize) -> SessionResult {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let trades: Vec<TradeRecord> = (0..trade_count)
            .map(|i| TradeRecord {
                side: Side::Long,
                entry_time: ts + chrono::Duration::minutes(i as i64 * 10),
                entry_price: 100.0,
                exit_time: ts + chrono::Duration::minutes(i as i64 * 10 + 5),
                exit_price: 101.0,
                quantity: 1.0,
                pnl: 1.0,
                exit_reason: ExitReason::TakeProfit2,
            })
            .collect();
        let equity = vec![EquityPoint::initial(ts, 10_000.0)];
        let metrics = PerformanceMetrics::compute(&equity, &trades, 10_000.0);
        SessionResult {
            symbol: "BTCUSDT".into(),
            timeframe: "5m".into(),
            bar_count: 1,
            initial_capital: 10_000.0,
            metrics,
            trades,
            equity,
        }
    }

    #[test]
    fn report_contains_headline_numbers() {
        let report = render_report(&sample_result(2));
        assert!(report.contains("BACKTEST REPORT - BTCUSDT (5m)"));
        assert!(report.contains("Initial Capital: $10000.00"));
        assert!(report.contains("Number of Trades: 2"));
        assert!(report.contains("TAKE_PROFIT2"));
    }

    #[test]
    fn report_truncates_long_trade_lists() {
        let report = render_report(&sample_result(14));
        assert!(report.contains("... and 4 more trades"));
    }

    #[test]
    fn empty_session_report_has_no_breakdown() {
        let report = render_report(&sample_result(0));
        assert!(!report.contains("Trade Breakdown"));
        assert!(report.contains("Number of Trades: 0"));
    }
}
