//! Rolling volume-weighted average price.
//!
//! VWAP[t] = sum(typical_price * volume over the window) / sum(volume over
//! the window), typical price = (high + low + close) / 3. The first
//! `period - 1` outputs are NaN (incomplete window).

use crate::domain::Bar;

/// Compute rolling VWAP over `period` bars.
pub fn rolling_vwap(bars: &[Bar], period: usize) -> Vec<f64> {
    assert!(period >= 1, "VWAP period must be >= 1");
    let n = bars.len();
    let mut out = vec![f64::NAN; n];

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
        let pv: f64 = window.iter().map(|b| b.typical_price() * b.volume).sum();
        let vol: f64 = window.iter().map(|b| b.volume).sum();
        out[i] = if vol > 0.0 { pv / vol } else { f64::NAN };
    }
    out
}
