//! Entry/exit rule predicates.
//!
//! Every rule is a pure function of two consecutive feed bars. A crossover
//! requires both sides of the flip: the previous bar on or below (resp. on
//! or above) the reference, the current bar strictly through it.

use crate::indicators::FeedBar;

/// Fast EMA crosses above slow EMA (was <=, now >).
pub fn ema_bullish_crossover(prev: &FeedBar, cur: &FeedBar) -> bool {
    prev.ind.ema_fast <= prev.ind.ema_slow && cur.ind.ema_fast > cur.ind.ema_slow
}

/// Fast EMA crosses below slow EMA (was >=, now <).
pub fn ema_bearish_crossover(prev: &FeedBar, cur: &FeedBar) -> bool {
    prev.ind.ema_fast >= prev.ind.ema_slow && cur.ind.ema_fast < cur.ind.ema_slow
}

/// MACD line crosses above its signal line.
pub fn macd_bullish_crossover(prev: &FeedBar, cur: &FeedBar) -> bool {
    prev.ind.macd <= prev.ind.macd_signal && cur.ind.macd > cur.ind.macd_signal
}

/// MACD line crosses below its signal line.
pub fn macd_bearish_crossover(prev: &FeedBar, cur: &FeedBar) -> bool {
    prev.ind.macd >= prev.ind.macd_signal && cur.ind.macd < cur.ind.macd_signal
}

/// Long rule 1: close above VWAP, EMA bullish crossover, MACD bullish
/// crossover.
pub fn long_cond_1(prev: &FeedBar, cur: &FeedBar) -> bool {
    cur.bar.close > cur.ind.vwap
        && ema_bullish_crossover(prev, cur)
        && macd_bullish_crossover(prev, cur)
}

/// Long rule 2: bullish RSI divergence with a MACD bullish crossover.
pub fn long_cond_2(prev: &FeedBar, cur: &FeedBar) -> bool {
    cur.ind.bullish_divergence && macd_bullish_crossover(prev, cur)
}

/// Long rule 3: EMA and MACD bullish crossovers without the VWAP check.
pub fn long_cond_3(prev: &FeedBar, cur: &FeedBar) -> bool {
    ema_bullish_crossover(prev, cur) && macd_bullish_crossover(prev, cur)
}

/// Short rule 1: close below VWAP, EMA bearish crossover, MACD bearish
/// crossover, and a negative MACD histogram.
pub fn short_cond_1(prev: &FeedBar, cur: &FeedBar) -> bool {
    cur.bar.close < cur.ind.vwap
        && ema_bearish_crossover(prev, cur)
        && macd_bearish_crossover(prev, cur)
        && cur.ind.macd_histogram < 0.0
}

/// Short rule 2: bearish RSI divergence with a MACD bearish crossover.
pub fn short_cond_2(prev: &FeedBar, cur: &FeedBar) -> bool {
    cur.ind.bearish_divergence && macd_bearish_crossover(prev, cur)
}

/// Short rule 3: EMA and MACD bearish crossovers without the VWAP check.
pub fn short_cond_3(prev: &FeedBar, cur: &FeedBar) -> bool {
    ema_bearish_crossover(prev, cur) && macd_bearish_crossover(prev, cur)
}
