//! Backtest orchestration: validate → feed → signals → risk → settlement.

use crate::domain::{validate_sequence, Bar, BarError, EquityPoint, TradeRecord};
use crate::indicators::{build_feed, FeedBar, IndicatorConfig};
use crate::risk::{apply_risk, RiskAnnotation, RiskConfig};
use crate::signal::{generate_signals, SignalAnnotation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::settlement::{settle, SettlementConfig};

/// Full configuration for one backtest session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub indicators: IndicatorConfig,
    pub risk: RiskConfig,
    pub settlement: SettlementConfig,
}

/// Fatal backtest failures. Input malformation aborts the whole run rather
/// than producing partially-correct equity figures.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("rejected input bar: {0}")]
    InvalidInput(#[from] BarError),
}

/// Everything a backtest run produces. The trade list and equity curve are
/// the reporting contract; the annotated sequences are kept for inspection.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub feed: Vec<FeedBar>,
    pub signals: Vec<SignalAnnotation>,
    pub risk: Vec<RiskAnnotation>,
    pub equity: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
    pub initial_capital: f64,
}

impl BacktestResult {
    pub fn final_equity(&self) -> f64 {
        self.equity
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_capital)
    }
}

/// Run the full pipeline over a raw bar sequence.
///
/// The bars are validated up front; any malformed bar is fatal here (the
/// live tracker instead logs and skips). Bars lacking complete indicator
/// history are dropped by the feed before signal evaluation.
pub fn run_backtest(bars: &[Bar], cfg: &BacktestConfig) -> Result<BacktestResult, BacktestError> {
    validate_sequence(bars)?;

    let feed = build_feed(bars, &cfg.indicators);
    tracing::debug!(
        raw_bars = bars.len(),
        feed_bars = feed.len(),
        "indicator feed built"
    );

    let signals = generate_signals(&feed);
    let risk = apply_risk(&feed, &signals, &cfg.risk);
    let settled = settle(&feed, &risk, &cfg.settlement);

    Ok(BacktestResult {
        feed,
        signals,
        risk,
        equity: settled.equity,
        trades: settled.trades,
        initial_capital: cfg.settlement.initial_capital,
    })
}
