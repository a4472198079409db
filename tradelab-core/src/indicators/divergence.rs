//! RSI/price divergence detection via a windowed local-extrema scan.
//!
//! Bullish divergence at bar i: price prints a local minimum that is lower
//! than an earlier local minimum, while RSI prints a higher low. Bearish is
//! the mirror on local maxima. The earlier extremum is searched in the
//! window [i - 3*period, i - period).
//!
//! The scan is O(n * period^2); it runs once per backtest over the full
//! series, and once per live cycle over a bounded candle window.

fn below_all(v: f64, xs: &[f64]) -> bool {
    !xs.is_empty() && xs.iter().all(|&x| v < x)
}

fn above_all(v: f64, xs: &[f64]) -> bool {
    !xs.is_empty() && xs.iter().all(|&x| v > x)
}

fn is_local_min(prices: &[f64], idx: usize, window: usize) -> bool {
    let left = &prices[idx.saturating_sub(window)..idx];
    let right = &prices[idx + 1..(idx + window + 1).min(prices.len())];
    below_all(prices[idx], left) && below_all(prices[idx], right)
}

fn is_local_max(prices: &[f64], idx: usize, window: usize) -> bool {
    let left = &prices[idx.saturating_sub(window)..idx];
    let right = &prices[idx + 1..(idx + window + 1).min(prices.len())];
    above_all(prices[idx], left) && above_all(prices[idx], right)
}

/// Detect divergences between a close series and its RSI.
///
/// Returns `(bullish, bearish)` flag series of the same length. NaN RSI
/// values (warm-up) can never satisfy the divergence comparison, so flags
/// in the warm-up region stay false.
pub fn detect_divergence(
    prices: &[f64],
    rsi: &[f64],
    period: usize,
) -> (Vec<bool>, Vec<bool>) {
    assert!(period >= 1, "divergence period must be >= 1");
    assert_eq!(prices.len(), rsi.len(), "price/RSI length mismatch");

    let n = prices.len();
    let mut bullish = vec![false; n];
    let mut bearish = vec![false; n];

    for i in period..n.saturating_sub(period) {
        if is_local_min(prices, i, period) {
            let start = i.saturating_sub(3 * period);
            for j in start..(i - period) {
                if is_local_min(prices, j, period)
                    && prices[i] < prices[j]
                    && rsi[i] > rsi[j]
                {
                    bullish[i] = true;
                    break;
                }
            }
        }

        if is_local_max(prices, i, period) {
            let start = i.saturating_sub(3 * period);
            for j in start..(i - period) {
                if is_local_max(prices, j, period)
                    && prices[i] > prices[j]
                    && rsi[i] < rsi[j]
                {
                    bearish[i] = true;
                    break;
                }
            }
        }
    }

    (bullish, bearish)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a price series with two pronounced troughs: one at `first`,
    /// a deeper one at `second`.
    fn double_trough(len: usize, first: usize, second: usize) -> Vec<f64> {
        let mut prices = vec![100.0; len];
        for (i, p) in prices.iter_mut().enumerate() {
            // Mild slope so neighbours of a trough are strictly higher.
            *p += i as f64 * 0.01;
        }
        prices[first] = 90.0;
        prices[second] = 85.0;
        prices
    }

    #[test]
    fn bullish_divergence_on_lower_low_higher_rsi() {
        let prices = double_trough(40, 13, 20);
        // RSI makes a higher low at the second trough.
        let mut rsi = vec![50.0; 40];
        rsi[13] = 25.0;
        rsi[20] = 35.0;

        let (bullish, bearish) = detect_divergence(&prices, &rsi, 3);
        assert!(bullish[20]);
        assert!(!bearish[20]);
    }

    #[test]
    fn no_bullish_divergence_when_rsi_confirms() {
        let prices = double_trough(40, 13, 20);
        // RSI also makes a lower low — trend confirmation, not divergence.
        let mut rsi = vec![50.0; 40];
        rsi[13] = 35.0;
        rsi[20] = 25.0;

        let (bullish, _) = detect_divergence(&prices, &rsi, 3);
        assert!(!bullish[20]);
    }

    #[test]
    fn bearish_divergence_on_higher_high_lower_rsi() {
        let mut prices = vec![100.0; 40];
        for (i, p) in prices.iter_mut().enumerate() {
            *p -= i as f64 * 0.01;
        }
        prices[13] = 110.0;
        prices[20] = 115.0;
        let mut rsi = vec![50.0; 40];
        rsi[13] = 75.0;
        rsi[20] = 65.0;

        let (bullish, bearish) = detect_divergence(&prices, &rsi, 3);
        assert!(bearish[20]);
        assert!(!bullish[20]);
    }

    #[test]
    fn extrema_too_far_apart_do_not_pair() {
        // Second trough outside the 3*period look-back of the first.
        let prices = double_trough(60, 5, 40);
        let mut rsi = vec![50.0; 60];
        rsi[5] = 25.0;
        rsi[40] = 35.0;

        let (bullish, _) = detect_divergence(&prices, &rsi, 3);
        assert!(!bullish[40]);
    }

    #[test]
    fn flat_series_has_no_divergence() {
        let prices = vec![100.0; 30];
        let rsi = vec![f64::NAN; 30];
        let (bullish, bearish) = detect_divergence(&prices, &rsi, 5);
        assert!(bullish.iter().all(|&b| !b));
        assert!(bearish.iter().all(|&b| !b));
    }

    #[test]
    fn short_series_is_all_false() {
        let prices = vec![100.0, 90.0, 100.0];
        let rsi = vec![50.0, 40.0, 50.0];
        let (bullish, bearish) = detect_divergence(&prices, &rsi, 5);
        assert_eq!(bullish.len(), 3);
        assert!(bullish.iter().all(|&b| !b));
        assert!(bearish.iter().all(|&b| !b));
    }
}
