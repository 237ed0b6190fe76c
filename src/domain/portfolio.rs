//! Cash/holdings state and value snapshots.

use chrono::NaiveDate;

use super::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// All-in/all-out position: after any transition one side is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioState {
    pub cash: f64,
    pub holdings: f64,
}

impl PortfolioState {
    pub fn new(initial_capital: f64) -> Self {
        PortfolioState {
            cash: initial_capital,
            holdings: 0.0,
        }
    }

    /// Fills at `price` with no delay. Buy needs cash, Sell needs holdings;
    /// anything else leaves the state untouched.
    pub fn apply(&mut self, signal: Signal, price: f64) {
        match signal {
            Signal::Buy if self.cash > 0.0 => {
                self.holdings = self.cash / price;
                self.cash = 0.0;
            }
            Signal::Sell if self.holdings > 0.0 => {
                self.cash = self.holdings * price;
                self.holdings = 0.0;
            }
            _ => {}
        }
    }

    pub fn total_value(&self, price: f64) -> f64 {
        self.cash + self.holdings * price
    }
}
