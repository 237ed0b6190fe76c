//! MA-RSI strategy parameters.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct MaRsiStrategy {
    pub ma_window: usize,
    pub rsi_window: usize,
    pub rsi_buy_threshold: f64,
    pub rsi_sell_threshold: f64,
}

impl Default for MaRsiStrategy {
    fn default() -> Self {
        MaRsiStrategy {
            ma_window: 50,
            rsi_window: 14,
            rsi_buy_threshold: 30.0,
            rsi_sell_threshold: 70.0,
        }
    }
}

impl MaRsiStrategy {
    /// Bars needed before both indicators have a value.
    pub fn warmup(&self) -> usize {
        self.ma_window.max(self.rsi_window).saturating_sub(1)
    }
}

impl fmt::Display for MaRsiStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SMA({}) RSI({}) buy<{} sell>{}",
            self.ma_window, self.rsi_window, self.rsi_buy_threshold, self.rsi_sell_threshold
        )
    }
}
