use super::{ensure_finite, round_to, IndicatorError, IndicatorSeries};

/// Simple Moving Average (SMA)
/// Calculates the arithmetic mean of the last N prices
#[derive(Debug, Clone, Copy)]
pub struct SMA {
    window: usize,
}

impl SMA {
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        if window == 0 {
            return Err(IndicatorError::InvalidParameter(
                "SMA window must be positive".to_string(),
            ));
        }
        Ok(Self { window })
    }

    /// Calculate SMA for a price series
    /// Returns a vector of the same length as input
    /// First (window - 1) values are None (warmup period)
    /// Each value is rounded to 4 decimal places
    pub fn calculate(&self, prices: &[f64]) -> Result<IndicatorSeries, IndicatorError> {
        ensure_finite(prices)?;

        let mut result = vec![None; prices.len()];

        if prices.len() < self.window {
            return Ok(result);
        }

        for i in (self.window - 1)..prices.len() {
            let window_start = i + 1 - self.window;
            let sum: f64 = prices[window_start..=i].iter().sum();
            result[i] = Some(round_to(sum / self.window as f64, 4));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_basic() {
        let sma = SMA::new(3).unwrap();
        let result = sma.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(result, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_prices() {
        let prices = vec![100.0, 102.0, 101.0, 103.0, 105.0, 104.0, 106.0];
        let result = SMA::new(3).unwrap().calculate(&prices).unwrap();

        assert!(result[0].is_none());
        assert!(result[1].is_none());
        // (100 + 102 + 101) / 3
        assert_eq!(result[2], Some(101.0));
        // (101 + 103 + 105) / 3
        assert_eq!(result[4], Some(103.0));
        // (105 + 104 + 106) / 3
        assert_eq!(result[6], Some(105.0));
    }

    #[test]
    fn test_sma_rounds_to_four_places() {
        let result = SMA::new(3).unwrap().calculate(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(result[2], Some(1.3333));
    }

    #[test]
    fn test_sma_zero_window_rejected() {
        let err = SMA::new(0).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParameter(_)));
    }

    #[test]
    fn test_sma_empty_input() {
        for window in [1, 3, 100] {
            let result = SMA::new(window).unwrap().calculate(&[]).unwrap();
            assert!(result.is_empty());
        }
    }

    #[test]
    fn test_sma_window_exceeds_length() {
        let result = SMA::new(5).unwrap().calculate(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(result, vec![None, None, None]);
    }

    #[test]
    fn test_sma_window_one_is_identity() {
        let prices = [3.5, 7.25, 1.0];
        let result = SMA::new(1).unwrap().calculate(&prices).unwrap();
        assert_eq!(result, vec![Some(3.5), Some(7.25), Some(1.0)]);
    }

    #[test]
    fn test_sma_period_20() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let result = SMA::new(20).unwrap().calculate(&prices).unwrap();

        assert_eq!(result.len(), prices.len());
        assert!(result[..19].iter().all(Option::is_none));
        // (100 + 101 + ... + 119) / 20
        assert_eq!(result[19], Some(109.5));
        assert_eq!(result[20], Some(110.5));
    }

    #[test]
    fn test_sma_non_finite_rejected() {
        let sma = SMA::new(2).unwrap();
        assert!(sma.calculate(&[1.0, f64::NAN, 2.0]).is_err());
        assert!(sma.calculate(&[f64::NEG_INFINITY]).is_err());
    }

    #[test]
    fn test_sma_pure() {
        let prices = vec![5.0, 4.0, 6.0, 8.0, 7.0];
        let snapshot = prices.clone();
        let sma = SMA::new(2).unwrap();

        let first = sma.calculate(&prices).unwrap();
        let second = sma.calculate(&prices).unwrap();

        assert_eq!(first, second);
        assert_eq!(prices, snapshot);
    }
}
