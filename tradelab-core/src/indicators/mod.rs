//! Indicator feed — pure indicator functions and per-bar attachment.
//!
//! Indicators are computed once over the full bar series, then zipped onto
//! the bars. Rows lacking a complete indicator history (warm-up, or a
//! degenerate RSI window) are dropped here and never reach the signal
//! generator or the risk state machine.

pub mod atr;
pub mod divergence;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod vwap;

pub use atr::{atr, true_range};
pub use divergence::detect_divergence;
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;
pub use vwap::rolling_vwap;

use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// Periods for every indicator the strategy consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub vwap_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub divergence_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            vwap_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            atr_period: 14,
            divergence_period: 5,
        }
    }
}

/// Indicator values attached to one bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Indicators {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub vwap: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub rsi: f64,
    pub atr: f64,
    pub bullish_divergence: bool,
    pub bearish_divergence: bool,
}

impl Indicators {
    /// True when every numeric field is finite — the warm-up filter.
    pub fn is_complete(&self) -> bool {
        [
            self.ema_fast,
            self.ema_slow,
            self.vwap,
            self.macd,
            self.macd_signal,
            self.macd_histogram,
            self.rsi,
            self.atr,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// A bar with its indicator values attached; the unit the pipeline runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedBar {
    pub bar: Bar,
    pub ind: Indicators,
}

/// Compute every indicator series over the raw bars.
///
/// Output is index-parallel to `bars`; warm-up entries carry NaN.
pub fn compute_indicators(bars: &[Bar], cfg: &IndicatorConfig) -> Vec<Indicators> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let ema_fast = ema(&closes, cfg.ema_fast);
    let ema_slow = ema(&closes, cfg.ema_slow);
    let vwap = rolling_vwap(bars, cfg.vwap_period);
    let macd_series = macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
    let rsi_series = rsi(&closes, cfg.rsi_period);
    let atr_series = atr(bars, cfg.atr_period);
    let (bullish, bearish) = detect_divergence(&closes, &rsi_series, cfg.divergence_period);

    (0..bars.len())
        .map(|i| Indicators {
            ema_fast: ema_fast[i],
            ema_slow: ema_slow[i],
            vwap: vwap[i],
            macd: macd_series.line[i],
            macd_signal: macd_series.signal[i],
            macd_histogram: macd_series.histogram[i],
            rsi: rsi_series[i],
            atr: atr_series[i],
            bullish_divergence: bullish[i],
            bearish_divergence: bearish[i],
        })
        .collect()
}

/// Attach indicators to bars and drop every row without a complete
/// indicator history.
pub fn build_feed(bars: &[Bar], cfg: &IndicatorConfig) -> Vec<FeedBar> {
    let indicators = compute_indicators(bars, cfg);
    bars.iter()
        .zip(indicators)
        .filter(|(_, ind)| ind.is_complete())
        .map(|(bar, ind)| FeedBar {
            bar: bar.clone(),
            ind,
        })
        .collect()
}
