// Technical indicators module
// Pure calculation functions over a closing-price series

pub mod error;
pub mod moving_averages;
pub mod rsi;
pub mod kind;

pub use error::IndicatorError;
pub use moving_averages::SMA;
pub use rsi::{RSI, DEFAULT_RSI_PERIOD};
pub use kind::IndicatorKind;

/// Index-aligned output of an indicator; `None` where history is insufficient.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Reject series containing NaN or infinities.
pub(crate) fn ensure_finite(values: &[f64]) -> Result<(), IndicatorError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(IndicatorError::InvalidParameter(format!(
            "non-finite value {} at index {}",
            values[index], index
        ))),
        None => Ok(()),
    }
}
