//! Risk management — ATR-scaled levels, the position state machine, sizing.

pub mod machine;
pub mod sizing;

pub use machine::{apply_risk, RiskAnnotation};
pub use sizing::kelly_position_size;

use serde::{Deserialize, Serialize};

/// ATR multipliers for the stop-loss and the two take-profit levels.
///
/// `take_profit_1_atr < take_profit_2_atr` is expected but not enforced;
/// the defaults satisfy it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub stop_loss_atr: f64,
    pub take_profit_1_atr: f64,
    pub take_profit_2_atr: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stop_loss_atr: 1.5,
            take_profit_1_atr: 2.0,
            take_profit_2_atr: 3.5,
        }
    }
}
