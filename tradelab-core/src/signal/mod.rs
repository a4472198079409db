//! Signal generation — candidate entry/exit decisions per bar.
//!
//! The generator is a pure function of the bar window: it evaluates every
//! rule set on every bar and emits candidates for both directions plus exit
//! conditions. It holds no position tracker — gating candidates against the
//! open position happens exactly once, in the risk state machine.

pub mod rules;

use crate::indicators::FeedBar;
use serde::{Deserialize, Serialize};

/// The closed set of rule identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    LongCond1,
    LongCond2,
    LongCond3,
    ShortCond1,
    ShortCond2,
    ShortCond3,
    ExitLongEma,
    ExitShortEma,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::LongCond1 => "LONG_COND1",
            Trigger::LongCond2 => "LONG_COND2",
            Trigger::LongCond3 => "LONG_COND3",
            Trigger::ShortCond1 => "SHORT_COND1",
            Trigger::ShortCond2 => "SHORT_COND2",
            Trigger::ShortCond3 => "SHORT_COND3",
            Trigger::ExitLongEma => "EXIT_LONG_EMA",
            Trigger::ExitShortEma => "EXIT_SHORT_EMA",
        }
    }
}

/// Candidate decisions for one bar.
///
/// At most one of `long_entry`/`short_entry` is true (fixed rule priority,
/// first match wins). The exit flags are independent: they describe the
/// crossover event, and the risk state machine decides whether it applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalAnnotation {
    pub long_entry: bool,
    pub short_entry: bool,
    pub exit_long: bool,
    pub exit_short: bool,
    pub trigger: Option<Trigger>,
}

impl SignalAnnotation {
    /// No candidate fired on this bar.
    pub fn is_quiet(&self) -> bool {
        !self.long_entry && !self.short_entry && !self.exit_long && !self.exit_short
    }
}

/// Evaluate the entry rules in fixed priority: long 1, 2, 3, then short
/// 1, 2, 3. The first satisfied rule wins.
fn entry_candidate(prev: &FeedBar, cur: &FeedBar) -> Option<Trigger> {
    if rules::long_cond_1(prev, cur) {
        Some(Trigger::LongCond1)
    } else if rules::long_cond_2(prev, cur) {
        Some(Trigger::LongCond2)
    } else if rules::long_cond_3(prev, cur) {
        Some(Trigger::LongCond3)
    } else if rules::short_cond_1(prev, cur) {
        Some(Trigger::ShortCond1)
    } else if rules::short_cond_2(prev, cur) {
        Some(Trigger::ShortCond2)
    } else if rules::short_cond_3(prev, cur) {
        Some(Trigger::ShortCond3)
    } else {
        None
    }
}

/// Annotate one bar given its predecessor.
pub fn evaluate_bar(prev: &FeedBar, cur: &FeedBar) -> SignalAnnotation {
    let mut ann = SignalAnnotation::default();

    match entry_candidate(prev, cur) {
        Some(t @ (Trigger::LongCond1 | Trigger::LongCond2 | Trigger::LongCond3)) => {
            ann.long_entry = true;
            ann.trigger = Some(t);
        }
        Some(t) => {
            ann.short_entry = true;
            ann.trigger = Some(t);
        }
        None => {}
    }

    ann.exit_long = rules::ema_bearish_crossover(prev, cur);
    ann.exit_short = rules::ema_bullish_crossover(prev, cur);

    // Entry labels take precedence; an exit label is recorded only on a
    // bar with no entry candidate.
    if ann.trigger.is_none() {
        if ann.exit_long {
            ann.trigger = Some(Trigger::ExitLongEma);
        } else if ann.exit_short {
            ann.trigger = Some(Trigger::ExitShortEma);
        }
    }

    if let Some(trigger) = ann.trigger {
        tracing::debug!(
            timestamp = %cur.bar.timestamp,
            close = cur.bar.close,
            trigger = trigger.as_str(),
            "signal candidate"
        );
    }

    ann
}

/// Annotate the whole feed. Index 0 never signals — there is no prior bar
/// to compare against.
pub fn generate_signals(feed: &[FeedBar]) -> Vec<SignalAnnotation> {
    let mut out = Vec::with_capacity(feed.len());
    for (i, cur) in feed.iter().enumerate() {
        if i == 0 {
            out.push(SignalAnnotation::default());
        } else {
            out.push(evaluate_bar(&feed[i - 1], cur));
        }
    }
    out
}
