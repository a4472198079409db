//! EquityPoint — per-bar account bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point on the equity curve. Computed once per bar by the settlement
/// engine and never recomputed retroactively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    /// P&L realized on this bar (0 when nothing settled).
    pub pnl: f64,
    pub cumulative_pnl: f64,
    /// `initial_capital + cumulative_pnl`.
    pub equity: f64,
    /// Running maximum of `equity`; non-decreasing.
    pub max_equity: f64,
    /// Retracement from the running maximum, in percent; 0 when
    /// `max_equity <= 0`.
    pub drawdown_pct: f64,
}

impl EquityPoint {
    /// The settlement origin: no P&L, equity at initial capital.
    pub fn initial(timestamp: DateTime<Utc>, initial_capital: f64) -> Self {
        Self {
            timestamp,
            pnl: 0.0,
            cumulative_pnl: 0.0,
            equity: initial_capital,
            max_equity: initial_capital,
            drawdown_pct: 0.0,
        }
    }

    /// Advance the curve by one bar with the P&L realized on that bar.
    pub fn next(&self, timestamp: DateTime<Utc>, pnl: f64, initial_capital: f64) -> Self {
        let cumulative_pnl = self.cumulative_pnl + pnl;
        let equity = initial_capital + cumulative_pnl;
        let max_equity = self.max_equity.max(equity);
        let drawdown_pct = if max_equity > 0.0 {
            (max_equity - equity) / max_equity * 100.0
        } else {
            0.0
        };
        Self {
            timestamp,
            pnl,
            cumulative_pnl,
            equity,
            max_equity,
            drawdown_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 9, minute, 0).unwrap()
    }

    #[test]
    fn initial_point() {
        let p = EquityPoint::initial(ts(0), 10_000.0);
        assert_eq!(p.equity, 10_000.0);
        assert_eq!(p.max_equity, 10_000.0);
        assert_eq!(p.drawdown_pct, 0.0);
    }

    #[test]
    fn next_accumulates_pnl() {
        let p0 = EquityPoint::initial(ts(0), 10_000.0);
        let p1 = p0.next(ts(5), 250.0, 10_000.0);
        assert_eq!(p1.cumulative_pnl, 250.0);
        assert_eq!(p1.equity, 10_250.0);
        assert_eq!(p1.max_equity, 10_250.0);
        assert_eq!(p1.drawdown_pct, 0.0);
    }

    #[test]
    fn drawdown_measured_from_peak() {
        let p0 = EquityPoint::initial(ts(0), 10_000.0);
        let p1 = p0.next(ts(5), 1_000.0, 10_000.0); // peak 11 000
        let p2 = p1.next(ts(10), -2_200.0, 10_000.0); // equity 8 800
        assert_eq!(p2.max_equity, 11_000.0);
        assert!((p2.drawdown_pct - 20.0).abs() < 1e-10);
    }

    #[test]
    fn max_equity_never_decreases() {
        let p0 = EquityPoint::initial(ts(0), 10_000.0);
        let p1 = p0.next(ts(5), -500.0, 10_000.0);
        assert_eq!(p1.max_equity, 10_000.0);
        let p2 = p1.next(ts(10), 100.0, 10_000.0);
        assert_eq!(p2.max_equity, 10_000.0);
    }

    #[test]
    fn drawdown_zero_when_peak_not_positive() {
        let p0 = EquityPoint::initial(ts(0), 0.0);
        let p1 = p0.next(ts(5), -100.0, 0.0);
        assert_eq!(p1.drawdown_pct, 0.0);
    }
}
