//! Relative strength index from rolling mean gains and losses.
//!
//! delta[t] = close[t] - close[t-1]; gains and losses are averaged with a
//! simple rolling mean over `period` deltas, so the first `period` outputs
//! are NaN (delta is undefined at index 0).

/// Compute RSI over a close series.
///
/// Output conventions for degenerate windows: all-loss windows give 0,
/// all-gain windows give 100, and a window with no movement at all is NaN
/// (no relative strength to measure).
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");
    let n = closes.len();
    let mut out = vec![f64::NAN; n];
    if n < period + 1 {
        return out;
    }

    for i in period..n {
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        for j in (i + 1 - period)..=i {
            let delta = closes[j] - closes[j - 1];
            if delta > 0.0 {
                gain_sum += delta;
            } else {
                loss_sum += -delta;
            }
        }
        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;

        out[i] = if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                f64::NAN
            } else {
                100.0
            }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
    }
    out
}
