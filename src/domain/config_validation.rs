//! Configuration validation.
//!
//! Runs on the resolved [`AnalysisConfig`] before any data is fetched.

use crate::domain::config::AnalysisConfig;
use crate::domain::error::TraderError;

pub fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), TraderError> {
    validate_dates(config)?;
    validate_initial_capital(config)?;
    validate_thresholds(config)?;
    validate_monthly_investment(config)?;
    Ok(())
}

fn validate_dates(config: &AnalysisConfig) -> Result<(), TraderError> {
    if config.start_date >= config.end_date {
        return Err(TraderError::invalid(
            "analysis",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

fn validate_initial_capital(config: &AnalysisConfig) -> Result<(), TraderError> {
    if !(config.initial_capital > 0.0) {
        return Err(TraderError::invalid(
            "analysis",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }
    Ok(())
}

fn validate_thresholds(config: &AnalysisConfig) -> Result<(), TraderError> {
    for (key, value) in [
        ("rsi_buy_threshold", config.strategy.rsi_buy_threshold),
        ("rsi_sell_threshold", config.strategy.rsi_sell_threshold),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(TraderError::invalid(
                "ma_rsi",
                key,
                "threshold must be between 0 and 100",
            ));
        }
    }
    Ok(())
}

fn validate_monthly_investment(config: &AnalysisConfig) -> Result<(), TraderError> {
    if !(config.monthly_investment > 0.0) {
        return Err(TraderError::invalid(
            "dca",
            "monthly_investment",
            "monthly_investment must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::DataSource;
    use crate::domain::strategy::MaRsiStrategy;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn valid_config() -> AnalysisConfig {
        AnalysisConfig {
            data_source: DataSource::Csv {
                directory: PathBuf::from("data"),
            },
            tickers: vec!["AAPL".into()],
            benchmark: Some("^GSPC".into()),
            start_date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            initial_capital: 10_000.0,
            strategy: MaRsiStrategy::default(),
            dca_ticker: "QQQ".into(),
            monthly_investment: 500.0,
            momentum_lookback: 6,
            output_dir: PathBuf::from("charts"),
            charts: true,
        }
    }

    fn invalid_key(config: &AnalysisConfig) -> String {
        match validate_analysis_config(config) {
            Err(TraderError::ConfigInvalid { key, .. }) => key,
            other => panic!("expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_analysis_config(&valid_config()).is_ok());
    }

    #[test]
    fn start_after_end_rejected() {
        let config = AnalysisConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ..valid_config()
        };
        assert_eq!(invalid_key(&config), "start_date");
    }

    #[test]
    fn equal_dates_rejected() {
        let mut config = valid_config();
        config.end_date = config.start_date;
        assert_eq!(invalid_key(&config), "start_date");
    }

    #[test]
    fn non_positive_capital_rejected() {
        let config = AnalysisConfig {
            initial_capital: 0.0,
            ..valid_config()
        };
        assert_eq!(invalid_key(&config), "initial_capital");

        let config = AnalysisConfig {
            initial_capital: f64::NAN,
            ..valid_config()
        };
        assert_eq!(invalid_key(&config), "initial_capital");
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let mut config = valid_config();
        config.strategy.rsi_sell_threshold = 120.0;
        assert_eq!(invalid_key(&config), "rsi_sell_threshold");

        let mut config = valid_config();
        config.strategy.rsi_buy_threshold = -1.0;
        assert_eq!(invalid_key(&config), "rsi_buy_threshold");
    }

    #[test]
    fn non_positive_investment_rejected() {
        let config = AnalysisConfig {
            monthly_investment: -500.0,
            ..valid_config()
        };
        assert_eq!(invalid_key(&config), "monthly_investment");
    }
}
