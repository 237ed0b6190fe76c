//! Market data port trait.

use crate::domain::error::TraderError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Adjusted close prices for `ticker` with `start_date <= date < end_date`,
    /// in ascending date order.
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TraderError>;
}
