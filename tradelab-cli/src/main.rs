//! TradeLab CLI — backtest and paper-replay commands.
//!
//! Commands:
//! - `backtest` — run the strategy over a CSV of OHLCV bars and print the
//!   performance report
//! - `replay` — drive the live tracker over the same CSV with the paper
//!   executor, printing each committed event

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tradelab_core::engine::BacktestConfig;
use tradelab_core::live::{LiveTracker, PaperExecutor};
use tradelab_runner::{
    load_bars_csv, render_report, run_session, write_trades_csv, write_trades_json, Session,
};

#[derive(Parser)]
#[command(name = "tradelab", about = "TradeLab CLI — rule-based strategy backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over a CSV of OHLCV bars and print the report.
    Backtest {
        /// Path to the bar CSV (timestamp,open,high,low,close,volume).
        bars: PathBuf,

        /// Symbol label for the report.
        #[arg(long, default_value = "BTCUSDT")]
        symbol: String,

        /// Timeframe label for the report (e.g. 5m, 15m).
        #[arg(long, default_value = "5m")]
        timeframe: String,

        /// Optional TOML config overriding indicator/risk/settlement
        /// parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the trade tape to this CSV path.
        #[arg(long)]
        export_trades: Option<PathBuf>,

        /// Write the trade tape to this JSON path.
        #[arg(long)]
        export_json: Option<PathBuf>,
    },
    /// Replay a CSV through the live tracker with the paper executor.
    Replay {
        /// Path to the bar CSV.
        bars: PathBuf,

        /// Order quantity per entry, in instrument units.
        #[arg(long, default_value_t = 0.001)]
        quantity: f64,

        /// Optional TOML config overriding indicator/risk parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Candle window handed to the tracker each cycle.
        #[arg(long, default_value_t = 100)]
        window: usize,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<BacktestConfig> {
    match path {
        None => Ok(BacktestConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))
        }
    }
}

fn cmd_backtest(
    bars_path: &PathBuf,
    symbol: String,
    timeframe: String,
    config: Option<PathBuf>,
    export_trades: Option<PathBuf>,
    export_json: Option<PathBuf>,
) -> Result<()> {
    let bars = load_bars_csv(bars_path)
        .with_context(|| format!("failed to load bars from {}", bars_path.display()))?;
    let config = load_config(config.as_ref())?;

    let result = run_session(&Session {
        symbol,
        timeframe,
        bars,
        config,
    })?;

    print!("{}", render_report(&result));

    if let Some(path) = export_trades {
        write_trades_csv(&path, &result.trades)?;
        println!("Wrote trade tape to {}", path.display());
    }
    if let Some(path) = export_json {
        write_trades_json(&path, &result.trades)?;
        println!("Wrote trade tape to {}", path.display());
    }

    Ok(())
}

fn cmd_replay(
    bars_path: &PathBuf,
    quantity: f64,
    config: Option<PathBuf>,
    window: usize,
) -> Result<()> {
    let bars = load_bars_csv(bars_path)
        .with_context(|| format!("failed to load bars from {}", bars_path.display()))?;
    let config = load_config(config.as_ref())?;

    let mut tracker = LiveTracker::new(config.indicators, config.risk, quantity);
    let mut executor = PaperExecutor::default();
    let mut events = 0_usize;

    // Feed the tracker growing windows, as a polling loop would.
    for end in 1..=bars.len() {
        let start = end.saturating_sub(window);
        if let Some(event) = tracker.on_cycle(&bars[start..end], &mut executor) {
            events += 1;
            println!("{} {:?}", bars[end - 1].timestamp, event);
        }
    }

    println!(
        "Replay complete: {} events, {} paper orders, final position {:?}",
        events,
        executor.submissions.len(),
        tracker.position()
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Backtest {
            bars,
            symbol,
            timeframe,
            config,
            export_trades,
            export_json,
        } => cmd_backtest(&bars, symbol, timeframe, config, export_trades, export_json),
        Commands::Replay {
            bars,
            quantity,
            config,
            window,
        } => cmd_replay(&bars, quantity, config, window),
    }
}
