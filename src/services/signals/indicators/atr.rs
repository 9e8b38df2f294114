//! Average True Range (ATR) indicator.

use super::Indicator;
use crate::types::{IndicatorKind, PriceBar};

/// ATR (Average True Range) indicator.
///
/// Measures market volatility by averaging true ranges:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// The first bar has no previous close, so its TR is High-Low. ATR is the
/// simple rolling mean of TR with a minimum window of one, so every bar has a
/// value (early bars average over what is available).
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Calculate True Range.
    fn true_range(current: &PriceBar, previous: Option<&PriceBar>) -> f64 {
        let hl = current.high - current.low;
        match previous {
            Some(prev) => {
                let hc = (current.high - prev.close).abs();
                let lc = (current.low - prev.close).abs();
                hl.max(hc).max(lc)
            }
            None => hl,
        }
    }

    /// True range at every bar.
    pub fn true_ranges(bars: &[PriceBar]) -> Vec<f64> {
        bars.iter()
            .enumerate()
            .map(|(i, bar)| Self::true_range(bar, i.checked_sub(1).map(|p| &bars[p])))
            .collect()
    }
}

impl Indicator for Atr {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Atr(self.period)
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let ranges = Self::true_ranges(bars);
        (0..ranges.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(self.period);
                let window = &ranges[start..=i];
                Some(window.iter().sum::<f64>() / window.len() as f64)
            })
            .collect()
    }
}
