use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{IndicatorError, IndicatorSeries, DEFAULT_RSI_PERIOD, RSI, SMA};

/// A requested indicator with its parameter.
///
/// JSON form is tagged (`{"kind": "sma", "window": 20}`); query strings use
/// the compact key form (`sma_20`, `rsi_14`, or a bare `rsi`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IndicatorKind {
    Sma { window: usize },
    Rsi { period: usize },
}

impl IndicatorKind {
    /// Key used in responses, e.g. `sma_20`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn compute(&self, closes: &[f64]) -> Result<IndicatorSeries, IndicatorError> {
        match *self {
            IndicatorKind::Sma { window } => SMA::new(window)?.calculate(closes),
            IndicatorKind::Rsi { period } => RSI::new(period)?.calculate(closes),
        }
    }

    /// Parse a comma-separated list such as `"sma_20, sma_50,rsi_14"`.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, IndicatorError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma { window } => write!(f, "sma_{}", window),
            IndicatorKind::Rsi { period } => write!(f, "rsi_{}", period),
        }
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "rsi" {
            return Ok(IndicatorKind::Rsi {
                period: DEFAULT_RSI_PERIOD,
            });
        }

        let (kind, param) = lowered.split_once('_').ok_or_else(|| {
            IndicatorError::InvalidParameter(format!("malformed indicator: {}", s))
        })?;

        if param.is_empty() || !param.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IndicatorError::InvalidParameter(format!(
                "invalid period in indicator: {}",
                s
            )));
        }

        let param: usize = param.parse().map_err(|_| {
            IndicatorError::InvalidParameter(format!("invalid period in indicator: {}", s))
        })?;
        if param == 0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "period must be positive in indicator: {}",
                s
            )));
        }

        match kind {
            "sma" => Ok(IndicatorKind::Sma { window: param }),
            "rsi" => Ok(IndicatorKind::Rsi { period: param }),
            _ => Err(IndicatorError::InvalidParameter(format!(
                "unknown indicator type: {}",
                kind
            ))),
        }
    }
}
