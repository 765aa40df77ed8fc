use chrono::NaiveDate;
use serde::Deserialize;

pub mod chart;
pub mod companies;
pub mod company_info;
pub mod health;
pub mod historical;
pub mod indicators;

/// Optional inclusive date bounds, e.g. `?start=2024-01-01&end=2024-06-30`.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
