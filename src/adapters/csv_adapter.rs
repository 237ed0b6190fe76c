//! CSV file data adapter.
//!
//! One file per ticker, `<TICKER>.csv`, with at least a date column and an
//! adjusted close column. Both the short (`date,adj_close`) and the common
//! download layout (`Date,...,Adj Close,...`) headers are accepted; other
//! columns are ignored.

use crate::domain::error::TraderError;
use crate::domain::price::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "Adj Close", alias = "adj close", alias = "adjclose")]
    adj_close: f64,
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    // Timestamped exports carry the date as the first 10 characters.
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TraderError> {
        let path = self.csv_path(ticker);
        debug!(path = %path.display(), "reading prices");

        let mut rdr = csv::Reader::from_path(&path)
            .map_err(|e| TraderError::fetch(ticker, format!("failed to read {}: {}", path.display(), e)))?;

        let mut bars = Vec::new();
        for (line, result) in rdr.deserialize::<PriceRecord>().enumerate() {
            let record = result
                .map_err(|e| TraderError::fetch(ticker, format!("CSV parse error: {}", e)))?;

            let date = parse_date(&record.date).ok_or_else(|| {
                TraderError::fetch(
                    ticker,
                    format!("invalid date '{}' on row {}", record.date, line + 1),
                )
            })?;

            if date < start_date || date >= end_date {
                continue;
            }

            bars.push(PriceBar {
                date,
                adj_close: record.adj_close,
            });
        }

        Ok(PriceSeries::new(ticker, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        fs::write(
            path.join("AAPL.csv"),
            "date,adj_close\n\
             2024-01-03,185.5\n\
             2024-01-02,184.0\n\
             2024-01-04,183.25\n\
             2024-01-05,181.0\n",
        )
        .unwrap();
        fs::write(
            path.join("^GSPC.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,4745.2,4754.3,4722.7,4742.8,4742.8,3743050000\n\
             2024-01-03 00:00:00,4725.1,4729.3,4699.7,4704.8,4704.8,3950760000\n",
        )
        .unwrap();
        fs::write(path.join("BAD.csv"), "date,adj_close\nyesterday,1.0\n").unwrap();
        fs::write(path.join("NAN.csv"), "date,adj_close\n2024-01-02,abc\n").unwrap();

        (dir, path)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn fetch_prices_sorted_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch_prices("AAPL", date(1), date(31)).unwrap();
        assert_eq!(series.ticker, "AAPL");
        assert_eq!(series.prices(), vec![184.0, 185.5, 183.25, 181.0]);
        assert_eq!(series.first_date(), Some(date(2)));
    }

    #[test]
    fn fetch_prices_end_date_is_exclusive() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch_prices("AAPL", date(3), date(5)).unwrap();
        assert_eq!(series.prices(), vec![185.5, 183.25]);
    }

    #[test]
    fn fetch_prices_reads_download_layout() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch_prices("^GSPC", date(1), date(31)).unwrap();
        assert_eq!(series.prices(), vec![4742.8, 4704.8]);
        assert_eq!(series.last_date(), Some(date(3)));
    }

    #[test]
    fn fetch_prices_missing_file_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_prices("XYZ", date(1), date(31)).unwrap_err();
        assert!(matches!(err, TraderError::DataFetch { ticker, .. } if ticker == "XYZ"));
    }

    #[test]
    fn fetch_prices_invalid_date_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_prices("BAD", date(1), date(31)).unwrap_err();
        assert!(err.to_string().contains("invalid date 'yesterday'"));
    }

    #[test]
    fn fetch_prices_invalid_price_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_prices("NAN", date(1), date(31)).unwrap_err();
        assert!(err.to_string().contains("CSV parse error"));
    }
}
