//! Single-pass MA-RSI backtest.
//!
//! The trace is a strict fold over signal rows in date order: apply the
//! signal at that date's price, then snapshot `cash + holdings * price`.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::portfolio::{EquityPoint, PortfolioState};
use super::price::PriceSeries;
use super::signal::{Signal, SignalRow, generate_signals};
use super::strategy::MaRsiStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct TracePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub signal: Signal,
    pub cash: f64,
    pub holdings: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestTrace {
    pub initial_capital: f64,
    pub points: Vec<TracePoint>,
}

impl BacktestTrace {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_value).collect()
    }

    pub fn equity_curve(&self) -> Vec<EquityPoint> {
        self.points
            .iter()
            .map(|p| EquityPoint {
                date: p.date,
                equity: p.total_value,
            })
            .collect()
    }

    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.total_value)
    }

    /// Dates where the state actually changed (a filled Buy or Sell).
    pub fn transitions(&self) -> usize {
        let mut previous = (self.initial_capital, 0.0);
        let mut count = 0;
        for point in &self.points {
            let current = (point.cash, point.holdings);
            if current != previous {
                count += 1;
            }
            previous = current;
        }
        count
    }
}

pub fn run_backtest(rows: &[SignalRow], initial_capital: f64) -> BacktestTrace {
    let mut state = PortfolioState::new(initial_capital);

    let points = rows
        .iter()
        .map(|row| {
            state.apply(row.signal, row.price);
            TracePoint {
                date: row.date,
                price: row.price,
                signal: row.signal,
                cash: state.cash,
                holdings: state.holdings,
                total_value: state.total_value(row.price),
            }
        })
        .collect();

    BacktestTrace {
        initial_capital,
        points,
    }
}

/// Signals and trace for each ticker, computed independently.
pub fn run_universe(
    universe: &BTreeMap<String, PriceSeries>,
    strategy: &MaRsiStrategy,
    initial_capital: f64,
) -> BTreeMap<String, BacktestTrace> {
    universe
        .iter()
        .map(|(ticker, series)| {
            let rows = generate_signals(series, strategy);
            (ticker.clone(), run_backtest(&rows, initial_capital))
        })
        .collect()
}
