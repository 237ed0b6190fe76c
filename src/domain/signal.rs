//! MA-RSI signal generation.
//!
//! Each date is classified on its own price, MA and RSI. The current position
//! is never consulted: a Buy can fire while already invested, and it is the
//! simulator's cash/holdings guard that turns it into a no-op.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price::PriceSeries;
use crate::domain::strategy::MaRsiStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub price: f64,
    pub ma: Option<f64>,
    pub rsi: Option<f64>,
    pub signal: Signal,
}

/// Classifies one date. Undefined MA or RSI always yields Hold; a NaN RSI
/// fails every comparison and also yields Hold.
pub fn classify(
    price: f64,
    ma: Option<f64>,
    rsi: Option<f64>,
    strategy: &MaRsiStrategy,
) -> Signal {
    let (Some(ma), Some(rsi)) = (ma, rsi) else {
        return Signal::Hold;
    };

    if price > ma && rsi < strategy.rsi_buy_threshold {
        Signal::Buy
    } else if price < ma && rsi > strategy.rsi_sell_threshold {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

pub fn generate_signals(series: &PriceSeries, strategy: &MaRsiStrategy) -> Vec<SignalRow> {
    let ma = calculate_sma(series, strategy.ma_window);
    let rsi = calculate_rsi(series, strategy.rsi_window);

    series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let ma = ma.value_at(i);
            let rsi = rsi.value_at(i);
            SignalRow {
                date: bar.date,
                price: bar.adj_close,
                ma,
                rsi,
                signal: classify(bar.adj_close, ma, rsi, strategy),
            }
        })
        .collect()
}
