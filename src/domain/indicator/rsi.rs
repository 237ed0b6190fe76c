//! RSI (Relative Strength Index) over simple trailing averages.
//!
//! delta[i] = P[i] - P[i-1], with delta[0] counted as neither gain nor loss.
//! avg_gain / avg_loss are plain means of the last n gains / losses.
//! RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS)
//!
//! No zero check on avg_loss: a window without losses gives RS = +inf and
//! RSI = 100, a window without any movement gives RS = NaN and RSI = NaN.
//! Warmup: first (n-1) points have no value.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, trailing_mean};
use crate::domain::price::PriceSeries;

pub fn relative_strength(avg_gain: f64, avg_loss: f64) -> f64 {
    avg_gain / avg_loss
}

pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    100.0 - 100.0 / (1.0 + relative_strength(avg_gain, avg_loss))
}

/// Per-bar (gain, loss) magnitudes. The first bar has no predecessor and contributes zero.
pub fn gains_and_losses(prices: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(prices.len());
    let mut losses = Vec::with_capacity(prices.len());
    for i in 0..prices.len() {
        let change = if i == 0 { 0.0 } else { prices[i] - prices[i - 1] };
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }
    (gains, losses)
}

pub fn calculate_rsi(series: &PriceSeries, window: usize) -> IndicatorSeries {
    let (gains, losses) = gains_and_losses(&series.prices());

    let values = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = (window > 0 && i + 1 >= window).then(|| {
                rsi_from_averages(
                    trailing_mean(&gains, i, window),
                    trailing_mean(&losses, i, window),
                )
            });
            IndicatorPoint {
                date: bar.date,
                value,
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(window),
        values,
    }
}
