//! Trend following across a fixed list of ETFs.
//!
//! Each instrument is judged on its own:
//! - BUY: SMA50 above SMA200, ATR14 below twice ATR126, RSI14 below 70 and
//!   price above SMA50 (all four).
//! - SELL: price below SMA50, or below the trailing stop
//!   (50-session high minus 10 x ATR14).
//! - HOLD otherwise.
//!
//! An instrument that cannot be evaluated is left out of the result.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::indicators::{Atr, Indicator, RollingMax, Rsi, Sma};
use super::{round_to, RuleChain};
use crate::config::Asset;
use crate::error::SignalError;
use crate::sources::{fetch_nonempty, MarketData};
use crate::types::{
    IndicatorKind, IndicatorValue, Lookback, PriceBar, TrendOrdering, TrendSignal, TrendStatus,
};

pub const LOOKBACK: Lookback = Lookback::Years(1);
pub const STOP_ATR_MULTIPLE: f64 = 10.0;
pub const VOLATILITY_MULTIPLE: f64 = 2.0;
pub const OVERBOUGHT: f64 = 70.0;
const RSI_PERIOD: usize = 14;

/// Latest readings for one instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSnapshot {
    pub price: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub rsi14: f64,
    pub atr14: f64,
    pub atr126: f64,
    pub recent_high: f64,
}

impl TrendSnapshot {
    pub fn from_bars(bars: &[PriceBar]) -> Result<(Self, Vec<IndicatorValue>), SignalError> {
        let price = bars
            .last()
            .map(|b| b.close)
            .ok_or(SignalError::InsufficientData {
                required: 200,
                actual: 0,
            })?;

        let values = [
            Sma::new(50).value(bars)?,
            Sma::new(200).value(bars)?,
            Rsi::new(RSI_PERIOD).value(bars)?,
            Atr::new(14).value(bars)?,
            Atr::new(126).value(bars)?,
            RollingMax::new(50).value(bars)?,
        ];

        let snapshot = Self {
            price,
            sma50: values[0].value,
            sma200: values[1].value,
            rsi14: values[2].value,
            atr14: values[3].value,
            atr126: values[4].value,
            recent_high: values[5].value,
        };

        Ok((snapshot, values.to_vec()))
    }

    /// Trailing stop level.
    pub fn stop(&self) -> f64 {
        self.recent_high - STOP_ATR_MULTIPLE * self.atr14
    }

    /// All buy conditions hold.
    pub fn buy_setup(&self) -> bool {
        self.sma50 > self.sma200
            && self.atr14 < VOLATILITY_MULTIPLE * self.atr126
            && self.rsi14 < OVERBOUGHT
            && self.price > self.sma50
    }
}

type Verdict = (TrendStatus, &'static str);

/// Decision rules in priority order.
pub fn rules() -> RuleChain<TrendSnapshot, Verdict> {
    RuleChain::<TrendSnapshot, Verdict>::new((TrendStatus::Hold, "Trend Neutral"))
        .rule(
            "buy_setup",
            TrendSnapshot::buy_setup,
            (TrendStatus::Buy, "SMA Cross | Vol OK | RSI OK"),
        )
        .rule(
            "below_sma50",
            |s| s.price < s.sma50,
            (TrendStatus::Sell, "Below SMA50"),
        )
        .rule(
            "stop_hit",
            |s| s.price < s.stop(),
            (TrendStatus::Sell, "Stop Hit"),
        )
}

pub fn classify(snapshot: &TrendSnapshot) -> Verdict {
    rules().evaluate(snapshot)
}

pub fn compute(asset: &Asset, bars: &[PriceBar]) -> Result<TrendSignal, SignalError> {
    let (snapshot, indicators) = TrendSnapshot::from_bars(bars)?;
    let (status, reason) = classify(&snapshot);

    debug!(
        symbol = %asset.symbol,
        price = snapshot.price,
        stop = snapshot.stop(),
        rsi14 = snapshot.rsi14,
        status = status.label(),
        "Trend computed"
    );

    Ok(TrendSignal {
        symbol: asset.symbol.clone(),
        name: asset.name.clone(),
        price: round_to(snapshot.price, 2),
        stop: round_to(snapshot.stop(), 2),
        status,
        reason: reason.to_string(),
        rsi14: round_to(snapshot.rsi14, 1),
        indicators,
    })
}

/// Keep successful evaluations, dropping failed instruments.
pub fn collect(results: Vec<(Asset, Result<TrendSignal, SignalError>)>) -> Vec<TrendSignal> {
    results
        .into_iter()
        .filter_map(|(asset, result)| match result {
            Ok(signal) => Some(signal),
            Err(e) => {
                warn!(error = %e, symbol = %asset.symbol, "Trend instrument skipped");
                None
            }
        })
        .collect()
}

/// Unrounded RSI-14 of a signal; `rsi14` itself is rounded for display.
fn oscillator(signal: &TrendSignal) -> f64 {
    signal
        .indicators
        .iter()
        .find(|v| v.kind == IndicatorKind::Rsi(RSI_PERIOD))
        .map(|v| v.value)
        .unwrap_or(signal.rsi14)
}

/// Apply the configured ordering. Declaration order is the input order.
pub fn order(mut signals: Vec<TrendSignal>, ordering: TrendOrdering) -> Vec<TrendSignal> {
    if ordering == TrendOrdering::Oscillator {
        signals.sort_by(|a, b| {
            oscillator(b)
                .partial_cmp(&oscillator(a))
                .unwrap_or(Ordering::Equal)
        });
    }
    signals
}

/// Evaluate every asset independently.
pub async fn evaluate(
    provider: &dyn MarketData,
    assets: &[Asset],
    ordering: TrendOrdering,
) -> Vec<TrendSignal> {
    let mut results = Vec::with_capacity(assets.len());
    for asset in assets {
        let result = match fetch_nonempty(provider, &asset.symbol, LOOKBACK, false).await {
            Ok(bars) => compute(asset, &bars),
            Err(e) => Err(e.into()),
        };
        results.push((asset.clone(), result));
    }

    order(collect(results), ordering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::bars_from_closes;
    use crate::sources::StaticMarketData;

    fn bullish() -> TrendSnapshot {
        TrendSnapshot {
            price: 110.0,
            sma50: 105.0,
            sma200: 100.0,
            rsi14: 50.0,
            atr14: 1.0,
            atr126: 1.0,
            recent_high: 112.0,
        }
    }

    fn signal(symbol: &str, rsi14: f64) -> TrendSignal {
        TrendSignal {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            price: 1.0,
            stop: 0.0,
            status: TrendStatus::Hold,
            reason: "Trend Neutral".to_string(),
            rsi14: round_to(rsi14, 1),
            indicators: vec![IndicatorValue::new(IndicatorKind::Rsi(14), rsi14)],
        }
    }

    // =========================================================================
    // Rule Tests
    // =========================================================================

    #[test]
    fn test_buy_when_all_conditions_hold() {
        assert_eq!(classify(&bullish()), (TrendStatus::Buy, "SMA Cross | Vol OK | RSI OK"));
    }

    #[test]
    fn test_sell_below_sma50_not_stop() {
        let s = TrendSnapshot {
            price: 104.0,
            ..bullish()
        };
        assert!(s.price >= s.stop());
        assert_eq!(classify(&s), (TrendStatus::Sell, "Below SMA50"));
    }

    #[test]
    fn test_sell_stop_hit() {
        // Above SMA50 but far below the recent high; overbought blocks BUY.
        let s = TrendSnapshot {
            price: 106.0,
            rsi14: 75.0,
            recent_high: 130.0,
            ..bullish()
        };
        assert!(s.price < s.stop());
        assert_eq!(classify(&s), (TrendStatus::Sell, "Stop Hit"));
    }

    #[test]
    fn test_below_sma50_reported_before_stop() {
        let s = TrendSnapshot {
            price: 90.0,
            recent_high: 130.0,
            ..bullish()
        };
        assert_eq!(classify(&s).1, "Below SMA50");
    }

    #[test]
    fn test_hold_when_overbought_above_stop() {
        let s = TrendSnapshot {
            rsi14: 72.0,
            ..bullish()
        };
        assert_eq!(classify(&s), (TrendStatus::Hold, "Trend Neutral"));
    }

    #[test]
    fn test_volatility_gate_blocks_buy() {
        let s = TrendSnapshot {
            atr14: 2.0,
            atr126: 1.0,
            recent_high: 110.0,
            ..bullish()
        };
        assert!(!s.buy_setup());
        assert_eq!(classify(&s).0, TrendStatus::Hold);
    }

    #[test]
    fn test_death_cross_blocks_buy() {
        let s = TrendSnapshot {
            sma200: 106.0,
            ..bullish()
        };
        assert_eq!(classify(&s).0, TrendStatus::Hold);
    }

    #[test]
    fn test_stop_level() {
        assert_eq!(bullish().stop(), 102.0);
    }

    // =========================================================================
    // compute Tests
    // =========================================================================

    #[test]
    fn test_compute_steady_uptrend_is_buy() {
        let closes: Vec<f64> = (0..260).map(|i| 100.0 + i as f64 * 0.5).collect();
        let signal = compute(&Asset::new("VGT", "Tech"), &bars_from_closes(&closes)).unwrap();

        assert_eq!(signal.status, TrendStatus::Buy);
        assert_eq!(signal.price, 229.5);
        // No losses in the window: RSI reads neutral.
        assert_eq!(signal.rsi14, 50.0);
        // recent high 229.5 - 10 * 0.5
        assert_eq!(signal.stop, 224.5);
        let kinds: Vec<IndicatorKind> = signal.indicators.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IndicatorKind::Sma(50),
                IndicatorKind::Sma(200),
                IndicatorKind::Rsi(14),
                IndicatorKind::Atr(14),
                IndicatorKind::Atr(126),
                IndicatorKind::RollingMax(50),
            ]
        );
    }

    #[test]
    fn test_compute_short_history_fails() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + i as f64).collect();
        assert!(compute(&Asset::new("IBIT", "Bitcoin"), &bars_from_closes(&closes)).is_err());
    }

    // =========================================================================
    // Batch Tests
    // =========================================================================

    #[test]
    fn test_collect_drops_failures() {
        let results = vec![
            (Asset::new("VGT", "Tech"), Ok(signal("VGT", 40.0))),
            (
                Asset::new("IBIT", "Bitcoin"),
                Err(SignalError::InsufficientData { required: 200, actual: 0 }),
            ),
            (Asset::new("TLT", "Treasuries"), Ok(signal("TLT", 60.0))),
        ];
        let kept = collect(results);
        let symbols: Vec<&str> = kept.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["VGT", "TLT"]);
    }

    #[test]
    fn test_order_by_oscillator() {
        let signals = vec![signal("A", 40.0), signal("B", 65.0), signal("C", 55.0)];
        let ordered = order(signals.clone(), TrendOrdering::Oscillator);
        let symbols: Vec<&str> = ordered.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "C", "A"]);

        let declared = order(signals, TrendOrdering::Declaration);
        let symbols: Vec<&str> = declared.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_order_by_oscillator_uses_unrounded_rsi() {
        let signals = vec![signal("A", 81.2868), signal("B", 81.3007)];
        assert_eq!(signals[0].rsi14, signals[1].rsi14);

        let ordered = order(signals, TrendOrdering::Oscillator);
        let symbols: Vec<&str> = ordered.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_evaluate_skips_missing_instrument() {
        let closes: Vec<f64> = (0..260).map(|i| 50.0 + i as f64 * 0.25).collect();
        let provider = StaticMarketData::new()
            .with_series("VGT", bars_from_closes(&closes))
            .with_series("GLD", bars_from_closes(&closes));
        let assets = vec![
            Asset::new("VGT", "Tech"),
            Asset::new("IBIT", "Bitcoin"),
            Asset::new("GLD", "Gold"),
        ];

        let signals = evaluate(&provider, &assets, TrendOrdering::Declaration).await;
        let symbols: Vec<&str> = signals.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["VGT", "GLD"]);
        assert_eq!(provider.requests(), vec!["VGT", "IBIT", "GLD"]);
    }
}
