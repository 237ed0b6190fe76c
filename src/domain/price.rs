//! Adjusted-close price series.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub adj_close: f64,
}

/// Date-ordered prices for one ticker. Dates are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Sorts `bars` by date and drops later duplicates of the same date.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adj_close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
