//! CSV bar ingest.
//!
//! Expects a header row of `timestamp,open,high,low,close,volume`.
//! Timestamps are accepted as RFC 3339, as naive `YYYY-MM-DD HH:MM:SS`
//! (taken as UTC), or as unix seconds. Validation of the loaded sequence
//! is the backtest's job; this layer only parses.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tradelab_core::domain::Bar;

/// Errors from the CSV loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unparseable timestamp '{value}'")]
    BadTimestamp { row: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct RawRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(secs) = value.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    None
}

/// Load OHLCV bars from a CSV file, in file order.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();

    for (i, record) in reader.deserialize::<RawRow>().enumerate() {
        let row = record?;
        let timestamp =
            parse_timestamp(row.timestamp.trim()).ok_or_else(|| LoadError::BadTimestamp {
                row: i + 1,
                value: row.timestamp.clone(),
            })?;
        bars.push(Bar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    tracing::debug!(bars = bars.len(), path = %path.display(), "loaded bars");
    Ok(bars)
}
