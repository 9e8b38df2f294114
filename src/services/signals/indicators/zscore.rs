//! Z-Score indicator.

use super::{rolling, Indicator};
use crate::error::SignalError;
use crate::types::{closes, IndicatorKind, PriceBar};

/// Z-Score indicator.
///
/// (latest - mean) / std over a trailing window that includes the latest
/// value. Uses the sample standard deviation (ddof = 1). A window with zero
/// spread has no defined score.
pub struct ZScore {
    window: usize,
}

impl Default for ZScore {
    fn default() -> Self {
        Self { window: 50 }
    }
}

impl ZScore {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    fn score(window: &[f64]) -> Option<f64> {
        let n = window.len() as f64;
        if window.len() < 2 {
            return None;
        }
        let mean = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std = variance.sqrt();
        let latest = *window.last()?;

        if std.is_finite() && std > 0.0 {
            Some((latest - mean) / std)
        } else {
            None
        }
    }

    /// Latest z-score of a value series.
    ///
    /// Distinguishes a short series (`InsufficientData`) from a flat window
    /// (`NumericUndefined`).
    pub fn latest_of(&self, values: &[f64]) -> Result<f64, SignalError> {
        SignalError::require(self.window.max(1), values.len())?;
        let window = &values[values.len() - self.window.max(1)..];
        Self::score(window).ok_or(SignalError::NumericUndefined("zero standard deviation"))
    }
}

impl Indicator for ZScore {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::ZScore(self.window)
    }

    fn min_periods(&self) -> usize {
        self.window
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        rolling(&closes(bars), self.window, |w| {
            Self::score(w).unwrap_or(f64::NAN)
        })
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect()
    }

    fn latest(&self, bars: &[PriceBar]) -> Result<f64, SignalError> {
        self.latest_of(&closes(bars))
    }
}
