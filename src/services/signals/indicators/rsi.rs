//! Relative Strength Index (RSI) indicator.

use super::Indicator;
use crate::types::{closes, IndicatorKind, PriceBar};

/// Value reported before warm-up and whenever the average loss is zero.
pub const NEUTRAL: f64 = 50.0;

/// RSI (Relative Strength Index) indicator.
///
/// Gains and losses are smoothed with an adjusted exponentially weighted mean
/// (alpha = 1 / period, i.e. a center of mass of `period - 1`):
/// - Values are emitted once `period` observations exist.
/// - Before that, or when the average loss is exactly zero, the value is 50.
///
/// The neutral fill keeps thin warm-up data from reading as overbought or
/// oversold.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Two-period RSI used for short-term mean reversion.
    pub fn tactical() -> Self {
        Self::new(2)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Full RSI series over a close series. Every position is defined.
    pub fn series_of(&self, closes: &[f64]) -> Vec<f64> {
        let decay = 1.0 - 1.0 / self.period as f64;

        let mut gain_acc = 0.0;
        let mut loss_acc = 0.0;
        let mut weight = 0.0;
        let mut out = Vec::with_capacity(closes.len());

        for (i, &close) in closes.iter().enumerate() {
            // The first observation has no previous close and counts as no change.
            let change = if i == 0 { 0.0 } else { close - closes[i - 1] };
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { -change } else { 0.0 };

            gain_acc = gain + decay * gain_acc;
            loss_acc = loss + decay * loss_acc;
            weight = 1.0 + decay * weight;

            if i + 1 < self.period {
                out.push(NEUTRAL);
                continue;
            }

            let avg_gain = gain_acc / weight;
            let avg_loss = loss_acc / weight;

            if avg_loss == 0.0 {
                out.push(NEUTRAL);
            } else {
                let rs = avg_gain / avg_loss;
                out.push(100.0 - 100.0 / (1.0 + rs));
            }
        }

        out
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi(self.period)
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        self.series_of(&closes(bars)).into_iter().map(Some).collect()
    }
}
