//! TradeLab Core — signal-driven position lifecycle and settlement engine.
//!
//! The pipeline runs strictly forward over one ordered bar sequence:
//! - Indicator feed: attaches EMA/VWAP/MACD/RSI/ATR/divergence values and
//!   drops warm-up rows
//! - Signal generator: pure per-bar candidate entry/exit decisions
//! - Risk state machine: the single authoritative position state, with
//!   ATR-scaled stop-loss and two take-profit levels
//! - Settlement engine: trades, realized P&L, and the equity curve
//! - Live tracker: the same rule set driven incrementally against an
//!   abstract order capability

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod live;
pub mod risk;
pub mod signal;
