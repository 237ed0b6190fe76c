//! Analysis configuration.
//!
//! Everything the two pipelines need, resolved once from a [`ConfigPort`]
//! and passed explicitly into each stage.

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::domain::error::TraderError;
use crate::domain::strategy::MaRsiStrategy;
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TICKERS: &str = "AAPL,AMZN,NFLX,META,GOOG";
pub const DEFAULT_BENCHMARK: &str = "^GSPC";
pub const DEFAULT_DCA_TICKER: &str = "QQQ";

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Csv { directory: PathBuf },
    Yahoo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub data_source: DataSource,
    pub tickers: Vec<String>,
    pub benchmark: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub strategy: MaRsiStrategy,
    pub dca_ticker: String,
    pub monthly_investment: f64,
    pub momentum_lookback: usize,
    pub output_dir: PathBuf,
    pub charts: bool,
}

impl AnalysisConfig {
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, TraderError> {
        let defaults = MaRsiStrategy::default();

        let tickers_str = config
            .get_string("analysis", "tickers")
            .unwrap_or_else(|| DEFAULT_TICKERS.to_string());
        let tickers = parse_tickers(&tickers_str)
            .map_err(|e| TraderError::invalid("analysis", "tickers", e.to_string()))?;

        let benchmark = match config.get_string("analysis", "benchmark") {
            Some(b) if b.trim().is_empty() || b.trim().eq_ignore_ascii_case("none") => None,
            Some(b) => Some(b.trim().to_uppercase()),
            None => Some(DEFAULT_BENCHMARK.to_string()),
        };

        Ok(AnalysisConfig {
            data_source: data_source(config)?,
            tickers,
            benchmark,
            start_date: required_date(config, "start_date")?,
            end_date: required_date(config, "end_date")?,
            initial_capital: config.get_double("analysis", "initial_capital", 10_000.0),
            strategy: MaRsiStrategy {
                ma_window: window(config, "ma_rsi", "ma_window", defaults.ma_window)?,
                rsi_window: window(config, "ma_rsi", "rsi_window", defaults.rsi_window)?,
                rsi_buy_threshold: config.get_double(
                    "ma_rsi",
                    "rsi_buy_threshold",
                    defaults.rsi_buy_threshold,
                ),
                rsi_sell_threshold: config.get_double(
                    "ma_rsi",
                    "rsi_sell_threshold",
                    defaults.rsi_sell_threshold,
                ),
            },
            dca_ticker: config
                .get_string("dca", "ticker")
                .map(|t| t.trim().to_uppercase())
                .unwrap_or_else(|| DEFAULT_DCA_TICKER.to_string()),
            monthly_investment: config.get_double("dca", "monthly_investment", 500.0),
            momentum_lookback: window(config, "dca", "momentum_lookback", 6)?,
            output_dir: config
                .get_string("report", "output_dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("charts")),
            charts: config.get_bool("report", "charts", true),
        })
    }

    /// Tickers to fetch for the MA-RSI run, benchmark last.
    pub fn all_tickers(&self) -> Vec<String> {
        let mut all = self.tickers.clone();
        if let Some(benchmark) = &self.benchmark {
            if !all.contains(benchmark) {
                all.push(benchmark.clone());
            }
        }
        all
    }
}

fn data_source(config: &dyn ConfigPort) -> Result<DataSource, TraderError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string());
    match source.trim().to_lowercase().as_str() {
        "csv" => Ok(DataSource::Csv {
            directory: config
                .get_string("data", "directory")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
        }),
        "yahoo" => Ok(DataSource::Yahoo),
        other => Err(TraderError::invalid(
            "data",
            "source",
            format!("unknown source '{}' (expected csv or yahoo)", other),
        )),
    }
}

fn required_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, TraderError> {
    let value = config
        .get_string("analysis", key)
        .ok_or_else(|| TraderError::ConfigMissing {
            section: "analysis".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        TraderError::invalid("analysis", key, "invalid date format (expected YYYY-MM-DD)")
    })
}

fn window(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, TraderError> {
    let value = config.get_int(section, key, default as i64);
    usize::try_from(value)
        .ok()
        .filter(|&w| w > 0)
        .ok_or_else(|| TraderError::invalid(section, key, "must be a positive integer"))
}
