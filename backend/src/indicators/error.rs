use thiserror::Error;

/// Raised when an indicator is asked to compute over invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// Non-positive window/period, a malformed indicator key, or a
    /// non-finite value in the price series.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
