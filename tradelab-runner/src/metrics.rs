//! Performance metrics — pure functions over trades and equity points.
//!
//! Every metric derives from the Trade Record list and the Equity Point
//! sequence alone; nothing here re-walks bars.

use serde::{Deserialize, Serialize};
use tradelab_core::domain::{EquityPoint, TradeRecord};

/// Aggregate performance metrics for one backtest session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_pnl: f64,
    pub final_equity: f64,
    /// Total return in percent of initial capital.
    pub return_pct: f64,
    pub trade_count: usize,
    /// Percentage of trades with positive P&L.
    pub win_rate: f64,
    pub avg_pnl_per_trade: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// Gross profit over absolute gross loss; infinite when nothing was
    /// lost.
    pub profit_factor: f64,
    /// Largest equity retracement observed, in percent.
    pub max_drawdown_pct: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from a settled session.
    ///
    /// A session with no trades reports zeros across the board (and the
    /// initial capital as final equity), matching the empty-report
    /// convention.
    pub fn compute(
        equity: &[EquityPoint],
        trades: &[TradeRecord],
        initial_capital: f64,
    ) -> Self {
        let final_equity = equity
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_capital);

        if trades.is_empty() {
            return Self {
                total_pnl: 0.0,
                final_equity: initial_capital,
                return_pct: 0.0,
                trade_count: 0,
                win_rate: 0.0,
                avg_pnl_per_trade: 0.0,
                avg_win: 0.0,
                avg_loss: 0.0,
                profit_factor: 0.0,
                max_drawdown_pct: 0.0,
            };
        }

        let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();
        let return_pct = if initial_capital != 0.0 {
            (final_equity / initial_capital - 1.0) * 100.0
        } else {
            0.0
        };

        Self {
            total_pnl,
            final_equity,
            return_pct,
            trade_count: trades.len(),
            win_rate: win_rate(trades),
            avg_pnl_per_trade: total_pnl / trades.len() as f64,
            avg_win: avg_win(trades),
            avg_loss: avg_loss(trades),
            profit_factor: profit_factor(trades),
            max_drawdown_pct: max_drawdown_pct(equity),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Winning trades as a percentage of all trades. 0 for no trades.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    wins as f64 / trades.len() as f64 * 100.0
}

/// Mean P&L over winning trades. 0 when there are none.
pub fn avg_win(trades: &[TradeRecord]) -> f64 {
    let wins: Vec<f64> = trades
        .iter()
        .filter(|t| t.is_winner())
        .map(|t| t.pnl)
        .collect();
    if wins.is_empty() {
        return 0.0;
    }
    wins.iter().sum::<f64>() / wins.len() as f64
}

/// Mean P&L over losing (non-winning) trades. 0 when there are none.
pub fn avg_loss(trades: &[TradeRecord]) -> f64 {
    let losses: Vec<f64> = trades
        .iter()
        .filter(|t| !t.is_winner())
        .map(|t| t.pnl)
        .collect();
    if losses.is_empty() {
        return 0.0;
    }
    losses.iter().sum::<f64>() / losses.len() as f64
}

/// Gross profit / |gross loss|; +inf when gross loss is zero.
pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
    let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.pnl <= 0.0)
        .map(|t| t.pnl)
        .sum::<f64>()
        .abs();
    if gross_loss == 0.0 {
        return f64::INFINITY;
    }
    gross_profit / gross_loss
}

/// Maximum of the per-bar drawdown percentages. 0 for an empty curve.
pub fn max_drawdown_pct(equity: &[EquityPoint]) -> f64 {
    equity
        .iter()
        .map(|p| p.drawdown_pct)
        .fold(0.0, f64::max)
}
