//! Settlement — turns risk annotations into trades and an equity curve.
//!
//! A fold over the risk-annotated feed carrying (open lot, trade list,
//! equity curve). The lot is sized once on the entry bar from the previous
//! bar's equity and only changes when TP1 halves it. Equity is appended
//! bar-by-bar and never recomputed retroactively.

use crate::domain::{EquityPoint, ExitReason, Side, TradeRecord};
use crate::indicators::FeedBar;
use crate::risk::RiskAnnotation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capital and sizing parameters for a settlement run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub initial_capital: f64,
    /// Fraction of current equity allocated on each entry.
    pub position_size_fraction: f64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            position_size_fraction: 0.1,
        }
    }
}

/// Trades and equity curve produced by one settlement run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementOutput {
    pub equity: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
}

/// Entry-side tracking for the currently open position.
#[derive(Debug, Clone, Copy)]
struct OpenLot {
    side: Side,
    entry_time: DateTime<Utc>,
    entry_price: f64,
    size: f64,
}

impl OpenLot {
    fn pnl(&self, exit_price: f64, quantity: f64) -> f64 {
        match self.side {
            Side::Long => quantity * (exit_price - self.entry_price),
            Side::Short => quantity * (self.entry_price - exit_price),
        }
    }
}

/// Settle a risk-annotated feed into trades and equity points.
///
/// `feed` and `risk` must be index-parallel.
pub fn settle(
    feed: &[FeedBar],
    risk: &[RiskAnnotation],
    cfg: &SettlementConfig,
) -> SettlementOutput {
    assert_eq!(
        feed.len(),
        risk.len(),
        "feed and risk sequences must be index-parallel"
    );

    let mut equity: Vec<EquityPoint> = Vec::with_capacity(feed.len());
    let mut trades: Vec<TradeRecord> = Vec::new();
    let mut lot: Option<OpenLot> = None;

    for (i, (fb, ann)) in feed.iter().zip(risk).enumerate() {
        let prior_equity = if i == 0 {
            cfg.initial_capital
        } else {
            equity[i - 1].equity
        };

        let mut pnl = 0.0;

        if ann.entry_opened {
            if let Some(pos) = ann.position.open() {
                let size = cfg.position_size_fraction * prior_equity / pos.entry_price;
                lot = Some(OpenLot {
                    side: pos.side,
                    entry_time: fb.bar.timestamp,
                    entry_price: pos.entry_price,
                    size,
                });
            }
        } else if let (Some(exit_price), Some(exit_reason)) = (ann.exit_price, ann.exit_reason) {
            if let Some(l) = lot.take() {
                pnl = l.pnl(exit_price, l.size);
                trades.push(TradeRecord {
                    side: l.side,
                    entry_time: l.entry_time,
                    entry_price: l.entry_price,
                    exit_time: fb.bar.timestamp,
                    exit_price,
                    quantity: l.size,
                    pnl,
                    exit_reason,
                });
            }
        } else if ann.tp1_hit {
            if let (Some(l), Some(pos)) = (lot.as_mut(), ann.position.open()) {
                let tranche = l.size * 0.5;
                let tp1 = pos.take_profit_1;
                pnl = l.pnl(tp1, tranche);
                trades.push(TradeRecord {
                    side: l.side,
                    entry_time: l.entry_time,
                    entry_price: l.entry_price,
                    exit_time: fb.bar.timestamp,
                    exit_price: tp1,
                    quantity: tranche,
                    pnl,
                    exit_reason: ExitReason::TakeProfit1,
                });
                l.size = tranche;
            }
        }

        let point = if i == 0 {
            // Nothing can settle on the first bar: no lot exists yet.
            EquityPoint::initial(fb.bar.timestamp, cfg.initial_capital)
        } else {
            equity[i - 1].next(fb.bar.timestamp, pnl, cfg.initial_capital)
        };
        equity.push(point);
    }

    SettlementOutput { equity, trades }
}
