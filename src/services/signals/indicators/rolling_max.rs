//! Rolling maximum of close.

use super::{rolling, Indicator};
use crate::types::{closes, IndicatorKind, PriceBar};

/// Highest close over the trailing `period` observations.
///
/// Anchors the trailing stop of the trend classifier.
pub struct RollingMax {
    period: usize,
}

impl RollingMax {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for RollingMax {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::RollingMax(self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        rolling(&closes(bars), self.period, |w| {
            w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::bars_from_closes;

    #[test]
    fn test_rolling_max_trailing_window() {
        let bars = bars_from_closes(&[5.0, 9.0, 7.0, 6.0, 4.0]);
        assert_eq!(RollingMax::new(3).latest(&bars).unwrap(), 7.0);
        assert_eq!(RollingMax::new(5).latest(&bars).unwrap(), 9.0);
    }

    #[test]
    fn test_rolling_max_insufficient_data() {
        let bars = bars_from_closes(&[5.0, 9.0]);
        assert!(RollingMax::new(50).latest(&bars).is_err());
    }
}
