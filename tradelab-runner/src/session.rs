//! Session orchestration — one backtest per (symbol, timeframe).
//!
//! Sessions are fully independent: each owns its bars, config, and
//! results, so a batch fans out across threads with no shared mutable
//! state.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradelab_core::domain::{Bar, EquityPoint, TradeRecord};
use tradelab_core::engine::{run_backtest, BacktestConfig, BacktestError};

use crate::metrics::PerformanceMetrics;

/// One backtest request.
#[derive(Debug, Clone)]
pub struct Session {
    pub symbol: String,
    pub timeframe: String,
    pub bars: Vec<Bar>,
    pub config: BacktestConfig,
}

/// Settled results of one session: the reporting contract (trades +
/// equity) plus derived metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub symbol: String,
    pub timeframe: String,
    pub bar_count: usize,
    pub initial_capital: f64,
    pub metrics: PerformanceMetrics,
    pub trades: Vec<TradeRecord>,
    pub equity: Vec<EquityPoint>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("backtest for {symbol} {timeframe} failed: {source}")]
    Backtest {
        symbol: String,
        timeframe: String,
        #[source]
        source: BacktestError,
    },
}

/// Run one session to completion.
pub fn run_session(session: &Session) -> Result<SessionResult, SessionError> {
    tracing::info!(
        symbol = %session.symbol,
        timeframe = %session.timeframe,
        bars = session.bars.len(),
        "running backtest"
    );

    let result =
        run_backtest(&session.bars, &session.config).map_err(|source| SessionError::Backtest {
            symbol: session.symbol.clone(),
            timeframe: session.timeframe.clone(),
            source,
        })?;

    let metrics = PerformanceMetrics::compute(
        &result.equity,
        &result.trades,
        result.initial_capital,
    );

    Ok(SessionResult {
        symbol: session.symbol.clone(),
        timeframe: session.timeframe.clone(),
        bar_count: result.feed.len(),
        initial_capital: result.initial_capital,
        metrics,
        trades: result.trades,
        equity: result.equity,
    })
}

/// Run independent sessions in parallel. Result order matches input order.
pub fn run_sessions(sessions: &[Session]) -> Vec<Result<SessionResult, SessionError>> {
    sessions.par_iter().map(run_session).collect()
}
