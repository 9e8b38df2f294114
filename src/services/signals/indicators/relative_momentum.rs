//! Relative momentum against a benchmark.

use crate::error::SignalError;
use crate::types::{aligned_closes, IndicatorKind, PriceBar};

/// Element-wise `numerator / denominator` over paired series.
pub fn ratio_series(numerator: &[f64], denominator: &[f64]) -> Vec<f64> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(n, d)| n / d)
        .collect()
}

/// Relative momentum indicator.
///
/// Divides the instrument's close by the benchmark's close on matching dates,
/// then takes the fractional change of that ratio over `period` sessions.
/// Positive values mean the instrument outperformed the benchmark over the
/// window, independent of the benchmark's own drift.
pub struct RelativeMomentum {
    period: usize,
}

impl Default for RelativeMomentum {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl RelativeMomentum {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn kind(&self) -> IndicatorKind {
        IndicatorKind::RelativeMomentum(self.period)
    }

    /// Momentum of an already-computed ratio series.
    pub fn latest_of_ratio(&self, ratio: &[f64]) -> Result<f64, SignalError> {
        SignalError::require(self.period + 1, ratio.len())?;
        let last = ratio[ratio.len() - 1];
        let base = ratio[ratio.len() - 1 - self.period];
        let change = last / base - 1.0;

        if change.is_finite() {
            Ok(change)
        } else {
            Err(SignalError::NumericUndefined("non-finite price ratio"))
        }
    }

    /// Latest relative momentum of `instrument` against `benchmark`.
    pub fn latest(&self, instrument: &[PriceBar], benchmark: &[PriceBar]) -> Result<f64, SignalError> {
        let (inst, bench) = aligned_closes(instrument, benchmark);
        self.latest_of_ratio(&ratio_series(&inst, &bench))
    }
}
