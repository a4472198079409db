//! Live tracking — incremental bar evaluation driving an order capability.
//!
//! The tracker owns its session's `PositionState` and advances it ONLY when
//! an order submission succeeds; on failure the state is untouched and the
//! still-true condition is simply re-evaluated on the next cycle. Malformed
//! bars are logged and skipped here, never fatal (the backtest path aborts
//! instead).

use crate::domain::{Bar, ExitReason, OpenPosition, PositionState, Side};
use crate::indicators::{build_feed, FeedBar, IndicatorConfig};
use crate::risk::RiskConfig;
use crate::signal::evaluate_bar;
use thiserror::Error;

/// Direction of a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, Copy)]
pub struct OrderAck {
    pub side: OrderSide,
    pub quantity: f64,
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// The order-submission capability. The core treats any error as "the
/// position change did not happen" — it never inspects exchange payloads
/// beyond success/failure.
pub trait OrderExecutor {
    fn submit(&mut self, side: OrderSide, quantity: f64) -> Result<OrderAck, OrderError>;
}

/// Records submissions without touching any exchange. Test-mode executor.
#[derive(Debug, Default)]
pub struct PaperExecutor {
    pub submissions: Vec<(OrderSide, f64)>,
}

impl OrderExecutor for PaperExecutor {
    fn submit(&mut self, side: OrderSide, quantity: f64) -> Result<OrderAck, OrderError> {
        self.submissions.push((side, quantity));
        Ok(OrderAck { side, quantity })
    }
}

/// What a tracking cycle did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerEvent {
    Entered { side: Side, price: f64 },
    PartialExit { price: f64 },
    Exited { reason: ExitReason, price: f64 },
}

/// One live (symbol, timeframe) tracking session.
pub struct LiveTracker {
    indicators: IndicatorConfig,
    risk: RiskConfig,
    /// Fixed order quantity per entry, in instrument units.
    quantity: f64,
    state: PositionState,
}

impl LiveTracker {
    pub fn new(indicators: IndicatorConfig, risk: RiskConfig, quantity: f64) -> Self {
        Self {
            indicators,
            risk,
            quantity,
            state: PositionState::Flat,
        }
    }

    pub fn position(&self) -> &PositionState {
        &self.state
    }

    /// Evaluate one cycle over the latest candle window.
    ///
    /// Malformed or out-of-order bars are dropped with a warning before the
    /// feed is built. Returns the event committed this cycle, if any.
    pub fn on_cycle(
        &mut self,
        bars: &[Bar],
        executor: &mut dyn OrderExecutor,
    ) -> Option<TrackerEvent> {
        let mut clean: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            if let Err(err) = bar.validate() {
                tracing::warn!(%err, "skipping malformed bar");
                continue;
            }
            if let Some(last) = clean.last() {
                if bar.timestamp <= last.timestamp {
                    tracing::warn!(
                        timestamp = %bar.timestamp,
                        "skipping out-of-order bar"
                    );
                    continue;
                }
            }
            clean.push(bar.clone());
        }

        let feed = build_feed(&clean, &self.indicators);
        if feed.len() < 2 {
            return None;
        }
        let (prev, cur) = (&feed[feed.len() - 2], &feed[feed.len() - 1]);
        self.on_feed(prev, cur, executor)
    }

    /// Decision step on the two most recent feed bars.
    pub fn on_feed(
        &mut self,
        prev: &FeedBar,
        cur: &FeedBar,
        executor: &mut dyn OrderExecutor,
    ) -> Option<TrackerEvent> {
        let sig = evaluate_bar(prev, cur);
        let close = cur.bar.close;

        match self.state {
            PositionState::Flat => {
                let side = if sig.long_entry {
                    Side::Long
                } else if sig.short_entry {
                    Side::Short
                } else {
                    return None;
                };
                let order_side = match side {
                    Side::Long => OrderSide::Buy,
                    Side::Short => OrderSide::Sell,
                };
                match executor.submit(order_side, self.quantity) {
                    Ok(_) => {
                        let pos = OpenPosition::open(
                            side,
                            close,
                            cur.ind.atr,
                            self.risk.stop_loss_atr,
                            self.risk.take_profit_1_atr,
                            self.risk.take_profit_2_atr,
                        );
                        self.state = PositionState::Open(pos);
                        tracing::info!(
                            side = side.as_str(),
                            price = close,
                            stop_loss = pos.stop_loss,
                            "entered position"
                        );
                        Some(TrackerEvent::Entered { side, price: close })
                    }
                    Err(err) => {
                        // Position unchanged; the entry condition is
                        // re-evaluated on the next cycle.
                        tracing::warn!(%err, "entry order failed");
                        None
                    }
                }
            }
            PositionState::Open(mut pos) => {
                let exit_signal = match pos.side {
                    Side::Long => sig.exit_long,
                    Side::Short => sig.exit_short,
                };
                let sl_hit = pos.stop_loss_hit(close);
                let tp1_hit = !pos.tp1_consumed && pos.tp1_reached(close);
                let tp2_hit = pos.tp2_reached(close);

                let closing_side = match pos.side {
                    Side::Long => OrderSide::Sell,
                    Side::Short => OrderSide::Buy,
                };

                if sl_hit || tp2_hit || exit_signal {
                    let reason = if sl_hit {
                        ExitReason::StopLoss
                    } else if tp2_hit {
                        ExitReason::TakeProfit2
                    } else {
                        ExitReason::StrategyExit
                    };
                    let remaining = if pos.tp1_consumed {
                        self.quantity * 0.5
                    } else {
                        self.quantity
                    };
                    match executor.submit(closing_side, remaining) {
                        Ok(_) => {
                            self.state = PositionState::Flat;
                            tracing::info!(
                                side = pos.side.as_str(),
                                price = close,
                                reason = reason.as_str(),
                                "exited position"
                            );
                            Some(TrackerEvent::Exited {
                                reason,
                                price: close,
                            })
                        }
                        Err(err) => {
                            tracing::warn!(%err, "exit order failed");
                            None
                        }
                    }
                } else if tp1_hit {
                    match executor.submit(closing_side, self.quantity * 0.5) {
                        Ok(_) => {
                            pos.tp1_consumed = true;
                            self.state = PositionState::Open(pos);
                            tracing::info!(
                                side = pos.side.as_str(),
                                price = close,
                                "partial exit (TP1)"
                            );
                            Some(TrackerEvent::PartialExit { price: close })
                        }
                        Err(err) => {
                            tracing::warn!(%err, "partial exit order failed");
                            None
                        }
                    }
                } else {
                    None
                }
            }
        }
    }
}
