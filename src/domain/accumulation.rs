//! Buy-only accumulation strategies on monthly data.
//!
//! Both strategies buy `investment / price` shares in a period and never sell.
//! Plain DCA buys every period; the momentum variant buys only when the sum of
//! the preceding monthly returns is positive. Idle cash is not tracked, and
//! total investment is always `monthly_investment * periods` so both strategies
//! are measured against the same principal.

use chrono::NaiveDate;

use super::indicator::momentum::calculate_momentum;
use super::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use super::metrics::MONTHS_PER_YEAR;
use super::monthly::MonthlyBar;
use super::portfolio::EquityPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationPeriod {
    pub date: NaiveDate,
    pub price: f64,
    pub invested: f64,
    pub shares_bought: f64,
    pub cumulative_shares: f64,
    pub portfolio_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationResult {
    pub periods: Vec<AccumulationPeriod>,
    pub total_investment: f64,
    pub total_return: f64,
    pub annualized_return: f64,
}

impl AccumulationResult {
    fn from_periods(periods: Vec<AccumulationPeriod>, monthly_investment: f64) -> Self {
        let total_investment = monthly_investment * periods.len() as f64;
        let final_value = periods.last().map(|p| p.portfolio_value).unwrap_or(0.0);
        let years = periods.len() as f64 / MONTHS_PER_YEAR;
        AccumulationResult {
            total_investment,
            total_return: final_value - total_investment,
            annualized_return: (final_value / total_investment).powf(1.0 / years) - 1.0,
            periods,
        }
    }

    pub fn final_value(&self) -> Option<f64> {
        self.periods.last().map(|p| p.portfolio_value)
    }

    pub fn portfolio_values(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.portfolio_value).collect()
    }

    pub fn equity_curve(&self) -> Vec<EquityPoint> {
        self.periods
            .iter()
            .map(|p| EquityPoint {
                date: p.date,
                equity: p.portfolio_value,
            })
            .collect()
    }

    /// Capital actually put to work (differs from `total_investment` when periods were skipped).
    pub fn capital_deployed(&self) -> f64 {
        self.periods.iter().map(|p| p.invested).sum()
    }
}

fn accumulate(bars: &[MonthlyBar], amounts: impl Iterator<Item = f64>) -> Vec<AccumulationPeriod> {
    let mut cumulative_shares = 0.0;
    bars.iter()
        .zip(amounts)
        .map(|(bar, invested)| {
            let shares_bought = invested / bar.adj_close;
            cumulative_shares += shares_bought;
            AccumulationPeriod {
                date: bar.date,
                price: bar.adj_close,
                invested,
                shares_bought,
                cumulative_shares,
                portfolio_value: cumulative_shares * bar.adj_close,
            }
        })
        .collect()
}

pub fn run_dca(bars: &[MonthlyBar], monthly_investment: f64) -> AccumulationResult {
    let periods = accumulate(bars, std::iter::repeat(monthly_investment));
    AccumulationResult::from_periods(periods, monthly_investment)
}

pub fn momentum_series(bars: &[MonthlyBar], lookback: usize) -> IndicatorSeries {
    let returns = IndicatorSeries {
        indicator_type: IndicatorType::MonthlyReturn,
        values: bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                value: Some(b.monthly_return),
            })
            .collect(),
    };
    calculate_momentum(&returns, lookback)
}

pub fn run_momentum(
    bars: &[MonthlyBar],
    lookback: usize,
    monthly_investment: f64,
) -> AccumulationResult {
    let momentum = momentum_series(bars, lookback);
    let amounts = momentum.values.iter().map(|p| match p.value {
        Some(m) if m > 0.0 => monthly_investment,
        _ => 0.0,
    });
    let periods = accumulate(bars, amounts);
    AccumulationResult::from_periods(periods, monthly_investment)
}
