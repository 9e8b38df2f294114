//! Simple Moving Average (SMA) indicator.

use super::{last_defined, rolling, Indicator};
use crate::error::SignalError;
use crate::types::{closes, IndicatorKind, PriceBar};

/// SMA (Simple Moving Average) indicator.
///
/// Average close over the trailing `period` observations. Undefined until
/// `period` observations exist.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn series_of(&self, values: &[f64]) -> Vec<Option<f64>> {
        rolling(values, self.period, |w| w.iter().sum::<f64>() / w.len() as f64)
    }

    /// Latest average of an arbitrary value series (e.g. a price ratio).
    pub fn latest_of(&self, values: &[f64]) -> Result<f64, SignalError> {
        last_defined(&self.series_of(values), self.period)
    }
}

impl Indicator for Sma {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Sma(self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        self.series_of(&closes(bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::{assert_close, bars_from_closes};

    #[test]
    fn test_sma_kind() {
        assert_eq!(Sma::new(200).kind(), IndicatorKind::Sma(200));
        assert_eq!(Sma::new(50).min_periods(), 50);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
        let err = Sma::new(5).latest(&bars).unwrap_err();
        assert!(matches!(
            err,
            SignalError::InsufficientData { required: 5, actual: 3 }
        ));
    }

    #[test]
    fn test_sma_trailing_mean() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 10.0]);
        assert_close(Sma::new(2).latest(&bars).unwrap(), 7.0);
        assert_close(Sma::new(5).latest(&bars).unwrap(), 4.0);
    }

    #[test]
    fn test_sma_series_gaps_before_window() {
        let series = Sma::new(3).series_of(&[3.0, 6.0, 9.0, 12.0]);
        assert_eq!(series[0], None);
        assert_eq!(series[1], None);
        assert_close(series[2].unwrap(), 6.0);
        assert_close(series[3].unwrap(), 9.0);
    }

    #[test]
    fn test_sma_latest_of_ratio_series() {
        let ratio = [0.5, 0.5, 0.6, 0.7];
        assert_close(Sma::new(2).latest_of(&ratio).unwrap(), 0.65);
    }
}
