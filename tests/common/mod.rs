#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use trendtrader::domain::config::{AnalysisConfig, DataSource};
use trendtrader::domain::error::TraderError;
use trendtrader::domain::metrics::PerformanceRecord;
pub use trendtrader::domain::price::{PriceBar, PriceSeries};
use trendtrader::domain::strategy::MaRsiStrategy;
use trendtrader::ports::chart_port::{ChartPort, ChartSeries};
use trendtrader::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TraderError::DataFetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        let bars = self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date < end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        Ok(PriceSeries::new(ticker, bars))
    }
}

#[derive(Debug, Clone)]
pub enum RecordedChart {
    PortfolioValues {
        name: String,
        title: String,
        series: Vec<ChartSeries>,
    },
    Metrics {
        name: String,
        records: BTreeMap<String, PerformanceRecord>,
    },
}

/// Keeps every chart request instead of rendering it.
#[derive(Default)]
pub struct RecordingChartPort {
    pub charts: RefCell<Vec<RecordedChart>>,
}

impl RecordingChartPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.charts
            .borrow()
            .iter()
            .map(|c| match c {
                RecordedChart::PortfolioValues { name, .. } => name.clone(),
                RecordedChart::Metrics { name, .. } => name.clone(),
            })
            .collect()
    }
}

impl ChartPort for RecordingChartPort {
    fn plot_portfolio_values(
        &self,
        name: &str,
        title: &str,
        series: &[ChartSeries],
    ) -> Result<(), TraderError> {
        self.charts.borrow_mut().push(RecordedChart::PortfolioValues {
            name: name.to_string(),
            title: title.to_string(),
            series: series.to_vec(),
        });
        Ok(())
    }

    fn plot_metrics(
        &self,
        name: &str,
        records: &BTreeMap<String, PerformanceRecord>,
    ) -> Result<(), TraderError> {
        self.charts.borrow_mut().push(RecordedChart::Metrics {
            name: name.to_string(),
            records: records.clone(),
        });
        Ok(())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// One bar per calendar day starting at `start`.
pub fn daily_bars(start: &str, prices: &[f64]) -> Vec<PriceBar> {
    let start = date(start);
    prices
        .iter()
        .enumerate()
        .map(|(i, &adj_close)| PriceBar {
            date: start + Duration::days(i as i64),
            adj_close,
        })
        .collect()
}

/// Trending sine wave, deep enough to cross both RSI thresholds.
pub fn wave_prices(n: usize, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 + 25.0 * (t / 9.0 + phase).sin() + 0.05 * t
        })
        .collect()
}

pub fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        data_source: DataSource::Csv {
            directory: PathBuf::from("data"),
        },
        tickers: vec!["AAA".into(), "BBB".into()],
        benchmark: Some("IDX".into()),
        start_date: date("2020-01-01"),
        end_date: date("2021-01-01"),
        initial_capital: 10_000.0,
        strategy: MaRsiStrategy {
            ma_window: 10,
            rsi_window: 5,
            rsi_buy_threshold: 30.0,
            rsi_sell_threshold: 70.0,
        },
        dca_ticker: "QQQ".into(),
        monthly_investment: 500.0,
        momentum_lookback: 3,
        output_dir: PathBuf::from("charts"),
        charts: true,
    }
}

pub fn universe_port() -> MockDataPort {
    MockDataPort::new()
        .with_bars("AAA", daily_bars("2020-01-01", &wave_prices(200, 0.0)))
        .with_bars("BBB", daily_bars("2020-01-01", &wave_prices(200, 1.5)))
        .with_bars("IDX", daily_bars("2020-01-01", &wave_prices(200, 3.0)))
}
