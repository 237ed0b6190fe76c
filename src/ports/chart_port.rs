//! Chart rendering port trait.
//!
//! Charts are a side effect: implementations receive the computed series
//! as-is and must not alter them.

use std::collections::BTreeMap;

use crate::domain::error::TraderError;
use crate::domain::metrics::PerformanceRecord;
use crate::domain::portfolio::EquityPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub style: LineStyle,
    pub points: Vec<EquityPoint>,
}

impl ChartSeries {
    pub fn solid(label: impl Into<String>, points: Vec<EquityPoint>) -> Self {
        ChartSeries {
            label: label.into(),
            style: LineStyle::Solid,
            points,
        }
    }

    pub fn dashed(label: impl Into<String>, points: Vec<EquityPoint>) -> Self {
        ChartSeries {
            label: label.into(),
            style: LineStyle::Dashed,
            points,
        }
    }
}

pub trait ChartPort {
    /// Portfolio value over time, one line per series.
    fn plot_portfolio_values(
        &self,
        name: &str,
        title: &str,
        series: &[ChartSeries],
    ) -> Result<(), TraderError>;

    /// One bar panel per metric, one bar per ticker.
    fn plot_metrics(
        &self,
        name: &str,
        records: &BTreeMap<String, PerformanceRecord>,
    ) -> Result<(), TraderError>;
}
