//! Technical indicator implementations.
//!
//! Every indicator is a pure function of a chronological series. Only the
//! value at the latest observation is consumed by the classifiers, but the
//! full derived series is available for inspection and testing.

pub mod atr;
pub mod relative_momentum;
pub mod rolling_max;
pub mod rsi;
pub mod sma;
pub mod zscore;

pub use atr::Atr;
pub use relative_momentum::{ratio_series, RelativeMomentum};
pub use rolling_max::RollingMax;
pub use rsi::Rsi;
pub use sma::Sma;
pub use zscore::ZScore;

use crate::error::SignalError;
use crate::types::{IndicatorKind, IndicatorValue, PriceBar};

/// Trait for single-instrument indicators derived from daily bars.
pub trait Indicator: Send + Sync {
    /// Kind and window of this indicator.
    fn kind(&self) -> IndicatorKind;

    /// Observations needed before the latest value is defined.
    fn min_periods(&self) -> usize;

    /// Derived series aligned with the input; `None` where undefined.
    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>>;

    /// Value at the latest observation.
    fn latest(&self, bars: &[PriceBar]) -> Result<f64, SignalError> {
        last_defined(&self.series(bars), self.min_periods())
    }

    /// Latest value tagged with the indicator kind.
    fn value(&self, bars: &[PriceBar]) -> Result<IndicatorValue, SignalError> {
        Ok(IndicatorValue::new(self.kind(), self.latest(bars)?))
    }
}

/// Last element of a derived series, or `InsufficientData` when it is absent.
pub(crate) fn last_defined(series: &[Option<f64>], required: usize) -> Result<f64, SignalError> {
    match series.last() {
        Some(Some(value)) => Ok(*value),
        _ => Err(SignalError::InsufficientData {
            required,
            actual: series.len(),
        }),
    }
}

/// Rolling window reduction: `None` until `window` observations exist.
pub(crate) fn rolling<F>(values: &[f64], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    (0..values.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                None
            } else {
                Some(reduce(&values[i + 1 - window..=i]))
            }
        })
        .collect()
}
