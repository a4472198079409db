//! Position state — the single authoritative record of the open position.
//!
//! There is exactly one of these per (symbol, timeframe) session, owned by
//! the risk state machine. No pyramiding, no hedging: a position is either
//! `Flat` or one `Open` record.

use serde::{Deserialize, Serialize};

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "LONG",
            Side::Short => "SHORT",
        }
    }
}

/// An open position with its risk levels.
///
/// Levels are fixed at entry from the entry bar's ATR and never move.
/// `tp1_consumed` flips once when the first take-profit fires; the position
/// itself stays open until stop-loss, TP2, or a strategy exit closes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub side: Side,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub tp1_consumed: bool,
}

impl OpenPosition {
    /// Open a position at `entry_price`, deriving stop-loss and both
    /// take-profit levels from the entry bar's ATR.
    ///
    /// LONG: `sl = entry - sl_mult*atr`, `tp_n = entry + tp_n_mult*atr`.
    /// SHORT: mirrored.
    pub fn open(
        side: Side,
        entry_price: f64,
        atr: f64,
        sl_mult: f64,
        tp1_mult: f64,
        tp2_mult: f64,
    ) -> Self {
        let (stop_loss, take_profit_1, take_profit_2) = match side {
            Side::Long => (
                entry_price - atr * sl_mult,
                entry_price + atr * tp1_mult,
                entry_price + atr * tp2_mult,
            ),
            Side::Short => (
                entry_price + atr * sl_mult,
                entry_price - atr * tp1_mult,
                entry_price - atr * tp2_mult,
            ),
        };
        Self {
            side,
            entry_price,
            stop_loss,
            take_profit_1,
            take_profit_2,
            tp1_consumed: false,
        }
    }

    /// Stop-loss breach: LONG when price falls to or through the stop,
    /// SHORT when price rises to or through it.
    pub fn stop_loss_hit(&self, price: f64) -> bool {
        match self.side {
            Side::Long => price <= self.stop_loss,
            Side::Short => price >= self.stop_loss,
        }
    }

    fn take_profit_hit(&self, price: f64, level: f64) -> bool {
        match self.side {
            Side::Long => price >= level,
            Side::Short => price <= level,
        }
    }

    pub fn tp1_reached(&self, price: f64) -> bool {
        self.take_profit_hit(price, self.take_profit_1)
    }

    pub fn tp2_reached(&self, price: f64) -> bool {
        self.take_profit_hit(price, self.take_profit_2)
    }
}

/// Position lifecycle state. Created on an accepted entry signal, destroyed
/// on any full close.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PositionState {
    #[default]
    Flat,
    Open(OpenPosition),
}

impl PositionState {
    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    pub fn open(&self) -> Option<&OpenPosition> {
        match self {
            PositionState::Flat => None,
            PositionState::Open(pos) => Some(pos),
        }
    }

    pub fn side(&self) -> Option<Side> {
        self.open().map(|p| p.side)
    }
}
