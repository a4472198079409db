//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for a single symbol on a single time step.
///
/// Bars are immutable once produced by the feed: downstream components read
/// them and attach derived data, they never rewrite price fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Rejection reasons for malformed input bars.
///
/// Fatal for a backtest run; logged-and-skipped in live tracking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    #[error("bar at {timestamp} has a non-finite OHLCV field")]
    NonFiniteField { timestamp: DateTime<Utc> },

    #[error("bar at {timestamp} has high {high} below low {low}")]
    HighBelowLow {
        timestamp: DateTime<Utc>,
        high: f64,
        low: f64,
    },

    #[error("bar at {timestamp} has open/close outside the high/low range")]
    BodyOutsideRange { timestamp: DateTime<Utc> },

    #[error("bar at {timestamp} has negative volume {volume}")]
    NegativeVolume {
        timestamp: DateTime<Utc>,
        volume: f64,
    },

    #[error("bar at {current} does not advance past the previous bar at {previous}")]
    NonMonotonicTimestamp {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

impl Bar {
    /// Check a single bar against the input-malformation taxonomy:
    /// finite fields, `high >= low`, body inside the high/low range,
    /// non-negative volume.
    pub fn validate(&self) -> Result<(), BarError> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(BarError::NonFiniteField {
                timestamp: self.timestamp,
            });
        }
        if self.high < self.low {
            return Err(BarError::HighBelowLow {
                timestamp: self.timestamp,
                high: self.high,
                low: self.low,
            });
        }
        if self.high < self.open
            || self.high < self.close
            || self.low > self.open
            || self.low > self.close
        {
            return Err(BarError::BodyOutsideRange {
                timestamp: self.timestamp,
            });
        }
        if self.volume < 0.0 {
            return Err(BarError::NegativeVolume {
                timestamp: self.timestamp,
                volume: self.volume,
            });
        }
        Ok(())
    }

    /// Typical price, the VWAP numerator basis: (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Validate an ordered bar sequence: every bar individually sane and
/// timestamps strictly increasing. The sequence is gap-tolerant — only
/// monotonicity is required, not fixed spacing.
pub fn validate_sequence(bars: &[Bar]) -> Result<(), BarError> {
    for (i, bar) in bars.iter().enumerate() {
        bar.validate()?;
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(BarError::NonMonotonicTimestamp {
                previous: bars[i - 1].timestamp,
                current: bar.timestamp,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 9, minute, 0).unwrap()
    }

    fn sample_bar() -> Bar {
        Bar {
            timestamp: ts(0),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000.0,
        }
    }

    #[test]
    fn valid_bar_passes() {
        assert!(sample_bar().validate().is_ok());
    }

    #[test]
    fn rejects_nan_field() {
        let mut bar = sample_bar();
        bar.open = f64::NAN;
        assert!(matches!(
            bar.validate(),
            Err(BarError::NonFiniteField { .. })
        ));
    }

    #[test]
    fn rejects_high_below_low() {
        let mut bar = sample_bar();
        bar.high = 97.0;
        assert!(matches!(bar.validate(), Err(BarError::HighBelowLow { .. })));
    }

    #[test]
    fn rejects_close_above_high() {
        let mut bar = sample_bar();
        bar.close = 106.0;
        assert!(matches!(
            bar.validate(),
            Err(BarError::BodyOutsideRange { .. })
        ));
    }

    #[test]
    fn rejects_negative_volume() {
        let mut bar = sample_bar();
        bar.volume = -1.0;
        assert!(matches!(
            bar.validate(),
            Err(BarError::NegativeVolume { .. })
        ));
    }

    #[test]
    fn sequence_rejects_duplicate_timestamp() {
        let a = sample_bar();
        let b = sample_bar();
        assert!(matches!(
            validate_sequence(&[a, b]),
            Err(BarError::NonMonotonicTimestamp { .. })
        ));
    }

    #[test]
    fn sequence_accepts_gaps() {
        let mut a = sample_bar();
        let mut b = sample_bar();
        a.timestamp = ts(0);
        b.timestamp = ts(17); // irregular spacing is fine
        assert!(validate_sequence(&[a, b]).is_ok());
    }

    #[test]
    fn typical_price() {
        let bar = sample_bar();
        assert!((bar.typical_price() - (105.0 + 98.0 + 103.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar.timestamp, deser.timestamp);
        assert_eq!(bar.close, deser.close);
    }
}
