//! Domain error types.
//!
//! Numeric edge cases (RSI with zero loss, Sharpe with zero variance) are not
//! errors: they surface as inf/NaN values. Only I/O, config and data-fetch
//! failures end up here, and all of them abort the run.

/// Top-level error type for trendtrader.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to fetch {ticker}: {reason}")]
    DataFetch { ticker: String, reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient data for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("chart rendering failed: {reason}")]
    Chart { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TraderError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        TraderError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fetch(ticker: &str, reason: impl Into<String>) -> Self {
        TraderError::DataFetch {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

impl TraderError {
    /// Process exit status for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            TraderError::Io(_) | TraderError::Chart { .. } => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. } => 2,
            TraderError::DataFetch { .. } => 3,
            TraderError::NoData { .. } | TraderError::InsufficientData { .. } => 5,
        }
    }
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = TraderError::invalid("ma_rsi", "ma_window", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid config value [ma_rsi] ma_window: must be positive"
        );

        let err = TraderError::fetch("AAPL", "connection refused");
        assert_eq!(err.to_string(), "failed to fetch AAPL: connection refused");
    }

    #[test]
    fn insufficient_data_message() {
        let err = TraderError::InsufficientData {
            ticker: "QQQ".into(),
            bars: 3,
            minimum: 6,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for QQQ: have 3 bars, need 6"
        );
    }

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(TraderError::invalid("dca", "ticker", "x").exit_code(), 2);
        assert_eq!(
            TraderError::ConfigMissing {
                section: "analysis".into(),
                key: "start_date".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(TraderError::fetch("AAPL", "timeout").exit_code(), 3);
        assert_eq!(TraderError::NoData { ticker: "AAPL".into() }.exit_code(), 5);
        assert_eq!(
            TraderError::Chart {
                reason: "empty".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TraderError = io.into();
        assert!(matches!(err, TraderError::Io(_)));
    }
}
