//! TradeRecord — a settled trade, full or partial.

use super::position::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a position (or a tranche of it) was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    StopLoss,
    TakeProfit1,
    TakeProfit2,
    StrategyExit,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::StopLoss => "STOP_LOSS",
            ExitReason::TakeProfit1 => "TAKE_PROFIT1",
            ExitReason::TakeProfit2 => "TAKE_PROFIT2",
            ExitReason::StrategyExit => "STRATEGY_EXIT",
        }
    }

    /// TP1 closes half the position; everything else closes all of it.
    pub fn is_partial(&self) -> bool {
        matches!(self, ExitReason::TakeProfit1)
    }
}

/// One settled trade. Emitted by the settlement engine whenever a position
/// closes fully or a TP1 tranche is realized; append-only, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_time: DateTime<Utc>,
    pub exit_price: f64,
    /// Units settled by this record (the TP1 tranche is half the open size).
    pub quantity: f64,
    pub pnl: f64,
    pub exit_reason: ExitReason,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
