//! Performance metrics over value and return series.
//!
//! Statistics follow the usual dataframe conventions: standard deviation is
//! the sample estimate (n - 1), and nothing guards against zero variance, so a
//! constant return series yields a NaN or infinite Sharpe ratio.

use std::collections::BTreeMap;

use super::backtest::BacktestTrace;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Simple period-over-period returns. Undefined (0/0) entries are dropped.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .filter(|r| !r.is_nan())
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn sample_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() as f64 - 1.0)).sqrt()
}

/// `(last / first) ^ (periods_per_year / n) - 1`, with n the number of values.
pub fn annualized_return(values: &[f64], periods_per_year: f64) -> f64 {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => {
            (last / first).powf(periods_per_year / values.len() as f64) - 1.0
        }
        _ => f64::NAN,
    }
}

pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    mean(returns) / sample_std(returns) * periods_per_year.sqrt()
}

pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    sample_std(returns) * periods_per_year.sqrt()
}

/// Drawdown at each point: `value / running_max - 1`.
pub fn drawdown_series(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            peak = peak.max(v);
            v / peak - 1.0
        })
        .collect()
}

/// Deepest drawdown, as a non-positive fraction.
pub fn max_drawdown(values: &[f64]) -> f64 {
    drawdown_series(values).into_iter().fold(0.0, f64::min)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceRecord {
    pub annualized_return: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

impl PerformanceRecord {
    pub fn from_values(values: &[f64], periods_per_year: f64) -> Self {
        let returns = pct_change(values);
        PerformanceRecord {
            annualized_return: annualized_return(values, periods_per_year),
            sharpe_ratio: sharpe_ratio(&returns, periods_per_year),
            max_drawdown: max_drawdown(values),
        }
    }

    /// Daily trace, 252 periods per year.
    pub fn compute(trace: &BacktestTrace) -> Self {
        Self::from_values(&trace.values(), TRADING_DAYS_PER_YEAR)
    }

    pub fn compute_universe(
        traces: &BTreeMap<String, BacktestTrace>,
    ) -> BTreeMap<String, PerformanceRecord> {
        traces
            .iter()
            .map(|(ticker, trace)| (ticker.clone(), Self::compute(trace)))
            .collect()
    }
}

/// Monthly risk summary: drawdown of the strategy's portfolio value,
/// volatility and Sharpe of the underlying's monthly returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    pub max_drawdown: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
}

impl RiskMetrics {
    pub fn compute(monthly_returns: &[f64], portfolio_values: &[f64]) -> Self {
        RiskMetrics {
            max_drawdown: max_drawdown(portfolio_values),
            volatility: annualized_volatility(monthly_returns, MONTHS_PER_YEAR),
            sharpe_ratio: sharpe_ratio(monthly_returns, MONTHS_PER_YEAR),
        }
    }
}
