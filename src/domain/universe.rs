//! Ticker lists and universe loading.
//!
//! Unlike a screening run, a missing or empty ticker is not skipped: any
//! fetch failure aborts the whole analysis.

use crate::domain::error::TraderError;
use crate::domain::price::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Splits a comma-separated list into upper-cased tickers. Index symbols such
/// as `^GSPC` pass through.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// Fetches every ticker, failing fast. Each series must hold at least
/// `minimum_bars` prices.
pub fn load_universe(
    data_port: &dyn DataPort,
    tickers: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
    minimum_bars: usize,
) -> Result<BTreeMap<String, PriceSeries>, TraderError> {
    let mut universe = BTreeMap::new();

    for ticker in tickers {
        let series = load_series(data_port, ticker, start_date, end_date, minimum_bars)?;
        universe.insert(ticker.clone(), series);
    }

    Ok(universe)
}

pub fn load_series(
    data_port: &dyn DataPort,
    ticker: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    minimum_bars: usize,
) -> Result<PriceSeries, TraderError> {
    let series = data_port.fetch_prices(ticker, start_date, end_date)?;

    if series.is_empty() {
        return Err(TraderError::NoData {
            ticker: ticker.to_string(),
        });
    }
    if series.len() < minimum_bars {
        return Err(TraderError::InsufficientData {
            ticker: ticker.to_string(),
            bars: series.len(),
            minimum: minimum_bars,
        });
    }

    info!(ticker, bars = series.len(), "loaded price series");
    Ok(series)
}
