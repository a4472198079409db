//! Average true range — rolling mean of per-bar true range.
//!
//! TR[0] = high[0] - low[0] (no previous close to compare against).
//! TR[t] = max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the simple rolling mean over `period` true ranges, so the first
//! `period - 1` outputs are NaN.

use crate::domain::Bar;

/// Compute the true range series.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = Vec::with_capacity(n);
    if n == 0 {
        return tr;
    }

    tr.push(bars[0].high - bars[0].low);
    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }
    tr
}

/// Compute ATR over `period` bars.
pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    assert!(period >= 1, "ATR period must be >= 1");
    let tr = true_range(bars);
    let n = tr.len();
    let mut out = vec![f64::NAN; n];

    for i in (period - 1)..n {
        let window = &tr[i + 1 - period..=i];
        out[i] = window.iter().sum::<f64>() / period as f64;
    }
    out
}
