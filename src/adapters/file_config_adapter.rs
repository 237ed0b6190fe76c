//! INI file configuration adapter.

use crate::domain::error::TraderError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TraderError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| TraderError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TraderError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TraderError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[data]
source = csv
directory = /var/prices

[analysis]
tickers = AAPL,AMZN
benchmark = ^GSPC
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "directory"),
            Some("/var/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("analysis", "benchmark"),
            Some("^GSPC".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[dca]\nticker = QQQ\n").unwrap();
        assert_eq!(adapter.get_string("dca", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "ticker"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[ma_rsi]\nma_window = 50\n").unwrap();
        assert_eq!(adapter.get_int("ma_rsi", "ma_window", 0), 50);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[ma_rsi]\nrsi_window = abc\n").unwrap();
        assert_eq!(adapter.get_int("ma_rsi", "ma_window", 42), 42);
        assert_eq!(adapter.get_int("ma_rsi", "rsi_window", 14), 14);
    }

    #[test]
    fn get_double_returns_value() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\ninitial_capital = 10000.5\n").unwrap();
        assert_eq!(
            adapter.get_double("analysis", "initial_capital", 0.0),
            10000.5
        );
    }

    #[test]
    fn get_double_returns_default_for_missing_or_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[dca]\nmonthly_investment = lots\n").unwrap();
        assert_eq!(adapter.get_double("dca", "monthly_investment", 500.0), 500.0);
        assert_eq!(adapter.get_double("dca", "missing", 99.9), 99.9);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[report]\na = true\nb = Yes\nc = 1\nd = false\ne = no\nf = OFF\n",
        )
        .unwrap();
        assert!(adapter.get_bool("report", "a", false));
        assert!(adapter.get_bool("report", "b", false));
        assert!(adapter.get_bool("report", "c", false));
        assert!(!adapter.get_bool("report", "d", true));
        assert!(!adapter.get_bool("report", "e", true));
        assert!(!adapter.get_bool("report", "f", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing_or_garbage() {
        let adapter = FileConfigAdapter::from_string("[report]\ncharts = maybe\n").unwrap();
        assert!(adapter.get_bool("report", "charts", true));
        assert!(!adapter.get_bool("report", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\noutput_dir = /tmp/charts\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "output_dir"),
            Some("/tmp/charts".to_string())
        );
    }

    #[test]
    fn from_file_missing_file_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/config.ini").unwrap_err();
        assert!(
            matches!(err, TraderError::ConfigParse { ref file, .. } if file.contains("config.ini"))
        );
    }
}
