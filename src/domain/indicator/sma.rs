//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(P[i-n+1..=i]). The first (n-1) points have no value.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, trailing_mean};
use crate::domain::price::PriceSeries;

pub fn calculate_sma(series: &PriceSeries, window: usize) -> IndicatorSeries {
    let prices = series.prices();
    let values = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            value: (window > 0 && i + 1 >= window).then(|| trailing_mean(&prices, i, window)),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(window),
        values,
    }
}
