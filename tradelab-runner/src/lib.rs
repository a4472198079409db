//! TradeLab Runner — session orchestration, metrics, reporting, CSV I/O.

pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod report;
pub mod session;

pub use data_loader::{load_bars_csv, LoadError};
pub use export::{write_trades_csv, write_trades_json};
pub use metrics::PerformanceMetrics;
pub use report::render_report;
pub use session::{run_session, run_sessions, Session, SessionError, SessionResult};
