//! Plain-text result formatting for stdout.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::accumulation::AccumulationResult;
use crate::domain::backtest::BacktestTrace;
use crate::domain::metrics::{PerformanceRecord, RiskMetrics};
use crate::domain::monthly::MonthlyBar;

fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// `Ticker | Annualized Return | Sharpe Ratio | Max Drawdown`, one row per
/// ticker in key order.
pub fn format_metrics_table(records: &BTreeMap<String, PerformanceRecord>) -> String {
    if records.is_empty() {
        return "No performance metrics.\n".to_string();
    }

    let ticker_width = records
        .keys()
        .map(|t| t.len())
        .max()
        .unwrap_or(0)
        .max("Ticker".len());

    let mut out = format!(
        "{:<tw$} | {:>17} | {:>12} | {:>12}\n",
        "Ticker",
        "Annualized Return",
        "Sharpe Ratio",
        "Max Drawdown",
        tw = ticker_width
    );
    out.push_str(&format!(
        "{}-+-{}-+-{}-+-{}\n",
        "-".repeat(ticker_width),
        "-".repeat(17),
        "-".repeat(12),
        "-".repeat(12)
    ));

    for (ticker, record) in records {
        out.push_str(&format!(
            "{:<tw$} | {:>17} | {:>12.2} | {:>12}\n",
            ticker,
            format_pct(record.annualized_return),
            record.sharpe_ratio,
            format_pct(record.max_drawdown),
            tw = ticker_width
        ));
    }

    out
}

/// e.g. `DCA Strategy - Annualized Return: 12.34%, Total Return: $1234.56`
pub fn format_strategy_line(label: &str, result: &AccumulationResult) -> String {
    format!(
        "{} - Annualized Return: {}, Total Return: ${:.2}",
        label,
        format_pct(result.annualized_return),
        result.total_return
    )
}

/// How much of the nominal principal a strategy actually invested.
pub fn format_deployment_line(label: &str, result: &AccumulationResult) -> String {
    format!(
        "{} - Capital Deployed: ${:.2} of ${:.2}",
        label,
        result.capital_deployed(),
        result.total_investment
    )
}

pub fn format_risk_line(risk: &RiskMetrics) -> String {
    format!(
        "Risk Metrics - Max Drawdown: {}, Volatility: {}, Sharpe Ratio: {:.2}",
        format_pct(risk.max_drawdown),
        format_pct(risk.volatility),
        risk.sharpe_ratio
    )
}

pub fn format_coverage(first: NaiveDate, last: NaiveDate) -> String {
    format!("Data covers from {} to {}", first, last)
}

pub fn format_backtest_summary(ticker: &str, trace: &BacktestTrace) -> String {
    match trace.final_value() {
        Some(value) => format!(
            "{}: final value ${:.2} from ${:.2}, {} transitions",
            ticker,
            value,
            trace.initial_capital,
            trace.transitions()
        ),
        None => format!("{}: no bars", ticker),
    }
}

/// Month-end table rows, used for the head/tail preview.
pub fn format_monthly_rows(bars: &[MonthlyBar]) -> String {
    let mut out = format!("{:<10} {:>12} {:>14}\n", "Date", "Adj Close", "Monthly Return");
    for bar in bars {
        out.push_str(&format!(
            "{:<10} {:>12.2} {:>14.4}\n",
            bar.date.format("%Y-%m-%d").to_string(),
            bar.adj_close,
            bar.monthly_return
        ));
    }
    out
}
