//! Period return and trailing momentum.
//!
//! RETURN[i] = (P[i] - P[i-1]) / P[i-1], undefined at i = 0.
//! MOMENTUM(n)[i] = sum(RETURN[i-n+1..i]), i.e. the last n returns ending at i
//! with the current period's own return left out. Undefined for the first
//! (n-1) points, or when any return in the window is undefined.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::price::PriceSeries;

pub fn calculate_monthly_return(series: &PriceSeries) -> IndicatorSeries {
    let values = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            value: (i > 0).then(|| {
                let prev = series.bars[i - 1].adj_close;
                (bar.adj_close - prev) / prev
            }),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::MonthlyReturn,
        values,
    }
}

pub fn calculate_momentum(returns: &IndicatorSeries, lookback: usize) -> IndicatorSeries {
    let values = returns
        .values
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let value = if lookback == 0 || i + 1 < lookback {
                None
            } else {
                returns.values[i + 1 - lookback..i]
                    .iter()
                    .map(|p| p.value)
                    .sum::<Option<f64>>()
            };
            IndicatorPoint {
                date: point.date,
                value,
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Momentum(lookback),
        values,
    }
}
