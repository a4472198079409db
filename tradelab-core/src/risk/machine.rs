//! The position & risk state machine.
//!
//! A fold over (feed bar, signal annotation) pairs that owns the single
//! authoritative `PositionState`. Entries are accepted only while flat;
//! while a position is open, each bar is checked in strict priority —
//! stop-loss, then TP1 (once), then TP2, then the strategy exit signal —
//! and the first match wins, skipping the rest for that bar. The bar that
//! opens a position performs no exit checks.

use crate::domain::{ExitReason, OpenPosition, PositionState, Side};
use crate::indicators::FeedBar;
use crate::signal::SignalAnnotation;

use super::RiskConfig;
use serde::{Deserialize, Serialize};

/// Per-bar output of the state machine.
///
/// `position` is the as-of-bar snapshot: on an exit bar it still shows the
/// position that was open during the bar (with the exit fields set); the
/// machine itself is flat again from the next bar on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskAnnotation {
    pub position: PositionState,
    /// True on the bar that opened a position.
    pub entry_opened: bool,
    /// Settlement price of a full close (stop level, TP2 level, or close).
    pub exit_price: Option<f64>,
    pub exit_reason: Option<ExitReason>,
    pub tp1_hit: bool,
    pub tp2_hit: bool,
    pub sl_hit: bool,
}

impl RiskAnnotation {
    /// True when a full close settled on this bar.
    pub fn closed(&self) -> bool {
        self.exit_price.is_some()
    }
}

/// Run the state machine over an annotated feed.
///
/// `feed` and `signals` must be index-parallel (the pipeline produces one
/// annotation per feed bar).
pub fn apply_risk(
    feed: &[FeedBar],
    signals: &[SignalAnnotation],
    cfg: &RiskConfig,
) -> Vec<RiskAnnotation> {
    assert_eq!(
        feed.len(),
        signals.len(),
        "feed and signal sequences must be index-parallel"
    );

    let mut state = PositionState::Flat;
    let mut out = Vec::with_capacity(feed.len());

    for (fb, sig) in feed.iter().zip(signals) {
        let mut ann = RiskAnnotation::default();
        let close = fb.bar.close;

        match state {
            PositionState::Flat => {
                if sig.long_entry || sig.short_entry {
                    let side = if sig.long_entry { Side::Long } else { Side::Short };
                    let pos = OpenPosition::open(
                        side,
                        close,
                        fb.ind.atr,
                        cfg.stop_loss_atr,
                        cfg.take_profit_1_atr,
                        cfg.take_profit_2_atr,
                    );
                    tracing::info!(
                        timestamp = %fb.bar.timestamp,
                        side = side.as_str(),
                        entry = close,
                        stop_loss = pos.stop_loss,
                        tp1 = pos.take_profit_1,
                        tp2 = pos.take_profit_2,
                        "position opened"
                    );
                    state = PositionState::Open(pos);
                    ann.entry_opened = true;
                    ann.position = state;
                } else if sig.exit_long || sig.exit_short {
                    // Inconsistent input, not an error: nothing to close.
                    tracing::debug!(
                        timestamp = %fb.bar.timestamp,
                        "exit candidate while flat ignored"
                    );
                }
            }
            PositionState::Open(mut pos) => {
                if pos.stop_loss_hit(close) {
                    ann.exit_price = Some(pos.stop_loss);
                    ann.exit_reason = Some(ExitReason::StopLoss);
                    ann.sl_hit = true;
                    ann.position = PositionState::Open(pos);
                    state = PositionState::Flat;
                    tracing::info!(
                        timestamp = %fb.bar.timestamp,
                        side = pos.side.as_str(),
                        price = pos.stop_loss,
                        "position closed (stop loss)"
                    );
                } else if !pos.tp1_consumed && pos.tp1_reached(close) {
                    pos.tp1_consumed = true;
                    ann.tp1_hit = true;
                    ann.position = PositionState::Open(pos);
                    state = PositionState::Open(pos);
                    tracing::info!(
                        timestamp = %fb.bar.timestamp,
                        side = pos.side.as_str(),
                        price = pos.take_profit_1,
                        "partial exit (TP1)"
                    );
                } else if pos.tp2_reached(close) {
                    ann.exit_price = Some(pos.take_profit_2);
                    ann.exit_reason = Some(ExitReason::TakeProfit2);
                    ann.tp2_hit = true;
                    ann.position = PositionState::Open(pos);
                    state = PositionState::Flat;
                    tracing::info!(
                        timestamp = %fb.bar.timestamp,
                        side = pos.side.as_str(),
                        price = pos.take_profit_2,
                        "position closed (TP2)"
                    );
                } else if (pos.side == Side::Long && sig.exit_long)
                    || (pos.side == Side::Short && sig.exit_short)
                {
                    ann.exit_price = Some(close);
                    ann.exit_reason = Some(ExitReason::StrategyExit);
                    ann.position = PositionState::Open(pos);
                    state = PositionState::Flat;
                    tracing::info!(
                        timestamp = %fb.bar.timestamp,
                        side = pos.side.as_str(),
                        price = close,
                        "position closed (strategy exit)"
                    );
                } else {
                    // Levels persist unchanged while the position rides.
                    ann.position = PositionState::Open(pos);
                }
            }
        }

        out.push(ann);
    }

    out
}
