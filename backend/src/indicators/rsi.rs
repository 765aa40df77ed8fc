use super::{ensure_finite, round_to, IndicatorError, IndicatorSeries};

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Relative Strength Index (RSI)
/// Measures momentum by comparing magnitude of recent gains to recent losses
/// Returns values between 0-100:
/// - Below 30: Oversold (potentially undervalued)
/// - Above 70: Overbought (potentially overvalued)
#[derive(Debug, Clone, Copy)]
pub struct RSI {
    period: usize,
}

impl Default for RSI {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

impl RSI {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be positive".to_string(),
            ));
        }
        Ok(Self { period })
    }

    /// Calculate RSI for a price series using Wilder's smoothing method
    /// Returns a vector of the same length as input
    /// First (period) values are None (warmup period); the value at index
    /// `period` comes from the seed averages, every later index `i` from the
    /// averages smoothed through the change ending at `prices[i]`
    pub fn calculate(&self, prices: &[f64]) -> Result<IndicatorSeries, IndicatorError> {
        ensure_finite(prices)?;

        let mut result = vec![None; prices.len()];

        if prices.len() <= self.period {
            return Ok(result);
        }

        // Price changes, split into gains and losses
        let mut gains = Vec::with_capacity(prices.len() - 1);
        let mut losses = Vec::with_capacity(prices.len() - 1);

        for pair in prices.windows(2) {
            let change = pair[1] - pair[0];
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let period = self.period as f64;

        // Seed with a simple average over the first `period` changes
        let mut avg_gain: f64 = gains[..self.period].iter().sum::<f64>() / period;
        let mut avg_loss: f64 = losses[..self.period].iter().sum::<f64>() / period;

        result[self.period] = Some(rsi_value(avg_gain, avg_loss));

        // avg = ((prev_avg * (period - 1)) + current) / period
        for i in self.period..gains.len() {
            avg_gain = (avg_gain * (period - 1.0) + gains[i]) / period;
            avg_loss = (avg_loss * (period - 1.0) + losses[i]) / period;

            // gains[i] is the change from prices[i] to prices[i + 1]
            result[i + 1] = Some(rsi_value(avg_gain, avg_loss));
        }

        Ok(result)
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    round_to(100.0 - (100.0 / (1.0 + rs)), 2)
}
