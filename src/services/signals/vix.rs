//! Volatility-index extremes.
//!
//! Standardizes the latest VIX close against its trailing 50 sessions. Spikes
//! in fear are treated as buying opportunities, complacency as a cue to trim.

use tracing::{debug, warn};

use super::indicators::ZScore;
use super::{round_to, RuleChain};
use crate::error::SignalError;
use crate::sources::{fetch_nonempty, MarketData};
use crate::types::{closes, Lookback, PriceBar, VixAction, VixSignal};

pub const LOOKBACK: Lookback = Lookback::Days(100);
const Z_WINDOW: usize = 50;

type Verdict = (VixAction, &'static str);

/// Threshold rules on the z-score, checked in order.
pub fn rules() -> RuleChain<f64, Verdict> {
    RuleChain::<f64, Verdict>::new((VixAction::Neutral, "VIX within normal range"))
        .rule(
            "extreme_fear",
            |z| *z > 2.0,
            (VixAction::AggressiveBuy, "VIX more than 2 std above its mean"),
        )
        .rule(
            "elevated_fear",
            |z| *z > 1.0,
            (VixAction::ScaleIn, "VIX more than 1 std above its mean"),
        )
        .rule(
            "complacency",
            |z| *z < -1.5,
            (VixAction::TrimProfits, "VIX more than 1.5 std below its mean"),
        )
}

pub fn classify(z: f64) -> VixAction {
    rules().evaluate(&z).0
}

pub fn compute(symbol: &str, bars: &[PriceBar]) -> Result<VixSignal, SignalError> {
    let values = closes(bars);
    let z = ZScore::new(Z_WINDOW).latest_of(&values)?;
    let vix = values.last().copied().unwrap_or_default();
    let (signal, rationale) = rules().evaluate(&z);

    debug!(symbol, vix, z, signal = signal.label(), "VIX extremes computed");

    Ok(VixSignal {
        symbol: symbol.to_string(),
        vix: round_to(vix, 2),
        z_score: round_to(z, 2),
        signal,
        rationale: rationale.to_string(),
        failure: None,
    })
}

/// Fetch and classify. Failures, including a flat window, become ERROR.
pub async fn evaluate(provider: &dyn MarketData, symbol: &str) -> VixSignal {
    let result = match fetch_nonempty(provider, symbol, LOOKBACK, false).await {
        Ok(bars) => compute(symbol, &bars),
        Err(e) => Err(e.into()),
    };

    result.unwrap_or_else(|e| {
        warn!(error = %e, symbol, "VIX signal unavailable");
        VixSignal::error(symbol, e.kind())
    })
}
