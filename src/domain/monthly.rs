//! Month-end resampling for the accumulation strategies.

use chrono::{Datelike, NaiveDate};

use super::indicator::momentum::calculate_monthly_return;
use super::price::{PriceBar, PriceSeries};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBar {
    pub date: NaiveDate,
    pub adj_close: f64,
    pub monthly_return: f64,
}

/// Last bar of every calendar month.
pub fn month_ends(series: &PriceSeries) -> PriceSeries {
    let mut bars: Vec<PriceBar> = Vec::new();
    for bar in &series.bars {
        match bars.last_mut() {
            Some(last)
                if last.date.year() == bar.date.year() && last.date.month() == bar.date.month() =>
            {
                *last = *bar;
            }
            _ => bars.push(*bar),
        }
    }
    PriceSeries::new(series.ticker.clone(), bars)
}

/// Month-end prices with the return over the previous month end. The first
/// month has no prior month and is dropped.
pub fn resample_monthly(series: &PriceSeries) -> Vec<MonthlyBar> {
    let month_ends = month_ends(series);
    let returns = calculate_monthly_return(&month_ends);

    month_ends
        .bars
        .iter()
        .zip(&returns.values)
        .filter_map(|(bar, point)| {
            point.value.map(|monthly_return| MonthlyBar {
                date: bar.date,
                adj_close: bar.adj_close,
                monthly_return,
            })
        })
        .collect()
}
