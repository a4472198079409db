//! MACD — moving average convergence/divergence.
//!
//! Line = EMA(fast) - EMA(slow); signal = EMA(line, signal period);
//! histogram = line - signal. All three are defined from index 0 because
//! the EMAs are seeded at the first value.

use super::ema::ema;

/// The MACD line/signal/histogram triple.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD over a close series.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    assert!(fast < slow, "MACD fast period must be < slow period");

    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&line, signal_period);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
