//! Exponential moving average.
//!
//! Span parameterization with alpha = 2 / (span + 1), seeded at the first
//! value. Matches the recursive (non-adjusted) EMA convention, so the
//! output is defined from index 0.

/// Compute the EMA of `values` with the given span.
///
/// Returns a series of the same length. Empty input yields an empty series.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    out.push(prev);
    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_at_first_value() {
        let out = ema(&[100.0, 100.0, 100.0], 9);
        assert_eq!(out, vec![100.0, 100.0, 100.0]);
    }

    #[test]
    fn recursion_matches_hand_computation() {
        // span 3 -> alpha = 0.5
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_eq!(out[0], 10.0);
        assert_eq!(out[1], 15.0); // 0.5*20 + 0.5*10
        assert_eq!(out[2], 22.5); // 0.5*30 + 0.5*15
    }

    #[test]
    fn tracks_a_trend_with_lag() {
        let values: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let out = ema(&values, 9);
        // EMA lags below a rising series but keeps climbing.
        assert!(out[49] < values[49]);
        assert!(out[49] > out[40]);
    }

    #[test]
    fn empty_input() {
        assert!(ema(&[], 9).is_empty());
    }

    #[test]
    #[should_panic(expected = "EMA span must be >= 1")]
    fn rejects_zero_span() {
        ema(&[1.0], 0);
    }
}
