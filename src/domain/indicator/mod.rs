//! Technical indicator implementations.
//!
//! - `IndicatorPoint`: a single dated value, `None` while the window is warming up
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a time series of indicator points
//!
//! A `Some` value may still hold NaN or infinity: division by zero inside an
//! indicator is propagated as IEEE arithmetic dictates, never masked.

pub mod momentum;
pub mod rsi;
pub mod sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    MonthlyReturn,
    Momentum(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(|p| p.value)
    }

    /// Number of leading points without a value.
    pub fn warmup_len(&self) -> usize {
        self.values.iter().take_while(|p| p.value.is_none()).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(window) => write!(f, "SMA({})", window),
            IndicatorType::Rsi(window) => write!(f, "RSI({})", window),
            IndicatorType::MonthlyReturn => write!(f, "MONTHLY_RETURN"),
            IndicatorType::Momentum(window) => write!(f, "MOMENTUM({})", window),
        }
    }
}

/// Mean of a trailing window. Shared by SMA and the RSI gain/loss averages.
pub(crate) fn trailing_mean(values: &[f64], end: usize, window: usize) -> f64 {
    values[end + 1 - window..=end].iter().sum::<f64>() / window as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(50).to_string(), "SMA(50)");
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
        assert_eq!(IndicatorType::MonthlyReturn.to_string(), "MONTHLY_RETURN");
        assert_eq!(IndicatorType::Momentum(6).to_string(), "MOMENTUM(6)");
    }

    #[test]
    fn warmup_len_counts_leading_none() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(3),
            values: vec![
                IndicatorPoint { date, value: None },
                IndicatorPoint { date, value: None },
                IndicatorPoint {
                    date,
                    value: Some(1.0),
                },
            ],
        };
        assert_eq!(series.warmup_len(), 2);
        assert_eq!(series.value_at(2), Some(1.0));
        assert_eq!(series.value_at(0), None);
        assert_eq!(series.value_at(9), None);
    }

    #[test]
    fn trailing_mean_uses_window_ending_at_index() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((trailing_mean(&values, 3, 2) - 3.5).abs() < f64::EPSILON);
        assert!((trailing_mean(&values, 2, 3) - 2.0).abs() < f64::EPSILON);
    }
}
