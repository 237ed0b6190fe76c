//! Yahoo Finance chart API adapter (feature `yahoo`).
//!
//! Daily bars from `/v8/finance/chart/{symbol}`; only the adjusted close series
//! is kept. Rows with a null adjusted close are dropped.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::error::TraderError;
use crate::domain::price::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

pub struct YahooAdapter {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl YahooAdapter {
    pub fn new() -> Result<Self, TraderError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TraderError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| TraderError::fetch("*", format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.base_url.trim_end_matches('/'),
            ticker.replace('^', "%5E")
        )
    }
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Decodes a chart API body into bars dated in UTC.
fn parse_chart(ticker: &str, body: &str) -> Result<Vec<PriceBar>, TraderError> {
    let response: YahooResponse = serde_json::from_str(body)
        .map_err(|e| TraderError::fetch(ticker, format!("failed to parse response: {}", e)))?;

    if let Some(error) = response.chart.error {
        return Err(TraderError::fetch(
            ticker,
            format!("Yahoo API error: {} - {}", error.code, error.description),
        ));
    }

    let data = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| TraderError::fetch(ticker, "no data in response"))?;

    let adjclose = data
        .indicators
        .adjclose
        .into_iter()
        .next()
        .ok_or_else(|| TraderError::fetch(ticker, "no adjusted close series in response"))?
        .adjclose;

    let bars = data
        .timestamp
        .iter()
        .zip(adjclose)
        .filter_map(|(&ts, price)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            price.map(|adj_close| PriceBar { date, adj_close })
        })
        .collect();

    Ok(bars)
}

impl DataPort for YahooAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TraderError> {
        let url = self.chart_url(ticker);
        info!(ticker, %start_date, %end_date, "fetching from Yahoo");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("interval", "1d".to_string()),
                ("events", "div,splits".to_string()),
                ("period1", unix_seconds(start_date).to_string()),
                ("period2", unix_seconds(end_date).to_string()),
            ])
            .send()
            .map_err(|e| TraderError::fetch(ticker, format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TraderError::fetch(ticker, format!("failed to read body: {}", e)))?;
        debug!(ticker, %status, bytes = body.len(), "Yahoo response");

        // Error bodies still carry chart.error, which is the more useful message.
        let bars = match parse_chart(ticker, &body) {
            Err(e) if status.is_success() => return Err(e),
            Err(_) => return Err(TraderError::fetch(ticker, format!("HTTP {}", status))),
            Ok(bars) => bars,
        };

        let bars = bars
            .into_iter()
            .filter(|b| b.date >= start_date && b.date < end_date)
            .collect();
        Ok(PriceSeries::new(ticker, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{"close": [185.6, 184.2, 181.9]}],
                    "adjclose": [{"adjclose": [184.9, null, 181.2]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parse_chart_extracts_adjusted_close() {
        let bars = parse_chart("AAPL", BODY).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].adj_close, 184.9);
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
    }

    #[test]
    fn parse_chart_reports_api_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart("ZZZZ", body).unwrap_err();
        assert!(err.to_string().contains("symbol may be delisted"));
        assert!(matches!(err, TraderError::DataFetch { ticker, .. } if ticker == "ZZZZ"));
    }

    #[test]
    fn parse_chart_without_adjclose_is_error() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704205800],"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart("AAPL", body).is_err());
    }

    #[test]
    fn parse_chart_rejects_garbage() {
        assert!(parse_chart("AAPL", "<html>").is_err());
    }

    #[test]
    fn chart_url_encodes_index_symbols() {
        let adapter = YahooAdapter::with_base_url("http://localhost:1/").unwrap();
        assert_eq!(
            adapter.chart_url("^GSPC"),
            "http://localhost:1/v8/finance/chart/%5EGSPC"
        );
    }

    #[test]
    fn unix_seconds_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(unix_seconds(date), 1_704_153_600);
    }
}
