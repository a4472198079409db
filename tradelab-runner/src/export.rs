//! Trade tape export (CSV/JSON).

use anyhow::{Context, Result};
use std::path::Path;
use tradelab_core::domain::TradeRecord;

pub fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;

    writer.write_record([
        "entry_time",
        "exit_time",
        "side",
        "entry_price",
        "exit_price",
        "quantity",
        "pnl",
        "exit_reason",
    ])?;

    for trade in trades {
        writer.write_record([
            trade.entry_time.to_rfc3339(),
            trade.exit_time.to_rfc3339(),
            trade.side.as_str().to_string(),
            format!("{:.8}", trade.entry_price),
            format!("{:.8}", trade.exit_price),
            format!("{:.8}", trade.quantity),
            format!("{:.8}", trade.pnl),
            trade.exit_reason.as_str().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_trades_json(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(trades).context("failed to serialize trades")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write trades JSON {}", path.display()))?;
    Ok(())
}
