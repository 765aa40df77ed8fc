use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type Ticker = String;

/// Normalise a user-supplied ticker symbol.
pub fn normalize_ticker(raw: &str) -> Ticker {
    raw.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub ticker: Ticker,
    pub name: String,
}

/// One trading-day OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "adjclose", alias = "adjustedClose", default)]
    pub adjusted_close: Option<f64>,
    pub volume: u64,
}

impl PriceBar {
    /// Check every price field is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("open", Some(self.open)),
            ("high", Some(self.high)),
            ("low", Some(self.low)),
            ("close", Some(self.close)),
            ("adjclose", self.adjusted_close),
        ];

        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!(
                        "{} on {} must be a non-negative number, got {}",
                        name, self.date, v
                    ));
                }
            }
        }
        Ok(())
    }

    /// High, falling back to close when the provider left it at zero.
    pub fn effective_high(&self) -> f64 {
        if self.high > 0.0 { self.high } else { self.close }
    }

    pub fn effective_low(&self) -> f64 {
        if self.low > 0.0 { self.low } else { self.close }
    }
}

/// Trailing-year summary of a ticker's bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyStats {
    pub high_52week: Option<f64>,
    pub low_52week: Option<f64>,
    pub avg_volume: Option<u64>,
}
