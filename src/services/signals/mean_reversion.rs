//! Tactical mean reversion on a single index ETF.
//!
//! Two-period RSI against the 200-session trend. Rules are checked in order:
//! 1. RSI >= 70: EXIT (overbought overrides everything else)
//! 2. price below its 200-session average: RISK_OFF
//! 3. RSI <= 10: STRONG_BUY
//! 4. otherwise HOLD

use tracing::{debug, warn};

use super::indicators::{Indicator, Rsi, Sma};
use super::{round_to, RuleChain};
use crate::config::Asset;
use crate::error::SignalError;
use crate::sources::{fetch_nonempty, MarketData};
use crate::types::{Lookback, MeanReversionAction, MeanReversionSignal, PriceBar};

pub const LOOKBACK: Lookback = Lookback::Days(400);
pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 10.0;
const TREND_WINDOW: usize = 200;

/// Latest readings the rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanReversionSnapshot {
    pub price: f64,
    pub rsi2: f64,
    pub sma200: f64,
}

impl MeanReversionSnapshot {
    pub fn from_bars(bars: &[PriceBar]) -> Result<Self, SignalError> {
        let price = bars
            .last()
            .map(|b| b.close)
            .ok_or(SignalError::InsufficientData {
                required: TREND_WINDOW,
                actual: 0,
            })?;

        Ok(Self {
            price,
            rsi2: Rsi::tactical().latest(bars)?,
            sma200: Sma::new(TREND_WINDOW).latest(bars)?,
        })
    }
}

type Verdict = (MeanReversionAction, &'static str);

/// Decision rules in priority order.
pub fn rules() -> RuleChain<MeanReversionSnapshot, Verdict> {
    RuleChain::<MeanReversionSnapshot, Verdict>::new((MeanReversionAction::Hold, "No edge"))
        .rule(
            "overbought",
            |s| s.rsi2 >= OVERBOUGHT,
            (MeanReversionAction::Exit, "Overbought: take profits"),
        )
        .rule(
            "below_trend",
            |s| s.price < s.sma200,
            (MeanReversionAction::RiskOff, "Below SMA200: no new entries"),
        )
        .rule(
            "oversold",
            |s| s.rsi2 <= OVERSOLD,
            (MeanReversionAction::StrongBuy, "Oversold dip above SMA200"),
        )
}

pub fn classify(snapshot: &MeanReversionSnapshot) -> MeanReversionAction {
    rules().evaluate(snapshot).0
}

pub fn compute(asset: &Asset, bars: &[PriceBar]) -> Result<MeanReversionSignal, SignalError> {
    let snapshot = MeanReversionSnapshot::from_bars(bars)?;
    let (signal, rationale) = rules().evaluate(&snapshot);

    debug!(
        symbol = %asset.symbol,
        price = snapshot.price,
        rsi2 = snapshot.rsi2,
        sma200 = snapshot.sma200,
        signal = signal.label(),
        "Mean reversion computed"
    );

    Ok(MeanReversionSignal {
        symbol: asset.symbol.clone(),
        name: asset.name.clone(),
        price: round_to(snapshot.price, 2),
        rsi2: round_to(snapshot.rsi2, 1),
        sma200: round_to(snapshot.sma200, 2),
        signal,
        rationale: rationale.to_string(),
        failure: None,
    })
}

/// Fetch adjusted bars and classify. Failures become the ERROR sentinel.
pub async fn evaluate(provider: &dyn MarketData, asset: &Asset) -> MeanReversionSignal {
    let result = match fetch_nonempty(provider, &asset.symbol, LOOKBACK, true).await {
        Ok(bars) => compute(asset, &bars),
        Err(e) => Err(e.into()),
    };

    result.unwrap_or_else(|e| {
        warn!(error = %e, symbol = %asset.symbol, "Mean reversion unavailable");
        MeanReversionSignal::error(&asset.symbol, &asset.name, e.kind())
    })
}
