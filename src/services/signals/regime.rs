//! Risk regime: majority vote of three market gates.
//!
//! - Trend: broad market above its 200-session average.
//! - Fear: volatility index below 20.
//! - Breadth: equal-weight / cap-weight ratio above its 50-session average.
//!
//! Two passing gates make the regime RISK-ON.

use tracing::{debug, warn};

use super::indicators::{ratio_series, Indicator, Sma};
use crate::config::Universe;
use crate::error::SignalError;
use crate::sources::{fetch_nonempty, MarketData};
use crate::types::{aligned_closes, Gate, Lookback, PriceBar, RegimeStatus, RiskRegime};

pub const LOOKBACK: Lookback = Lookback::Days(300);
pub const FEAR_THRESHOLD: f64 = 20.0;
const TREND_WINDOW: usize = 200;
const BREADTH_WINDOW: usize = 50;
const GATES_REQUIRED: usize = 2;

/// Close series the regime gates are computed from.
pub struct RegimeInputs<'a> {
    pub market: &'a [PriceBar],
    pub volatility: &'a [PriceBar],
    pub breadth: &'a [PriceBar],
}

fn last_close(bars: &[PriceBar]) -> Result<f64, SignalError> {
    bars.last()
        .map(|b| b.close)
        .ok_or(SignalError::InsufficientData {
            required: 1,
            actual: 0,
        })
}

/// Evaluate the three gates in display order.
pub fn gates(inputs: &RegimeInputs<'_>) -> Result<Vec<Gate>, SignalError> {
    let market_last = last_close(inputs.market)?;
    let market_avg = Sma::new(TREND_WINDOW).latest(inputs.market)?;

    let vix_last = last_close(inputs.volatility)?;

    let (breadth, market) = aligned_closes(inputs.breadth, inputs.market);
    let ratio = ratio_series(&breadth, &market);
    let ratio_last = ratio.last().copied().ok_or(SignalError::InsufficientData {
        required: BREADTH_WINDOW,
        actual: 0,
    })?;
    let ratio_avg = Sma::new(BREADTH_WINDOW).latest_of(&ratio)?;
    if !ratio_last.is_finite() || !ratio_avg.is_finite() {
        return Err(SignalError::NumericUndefined("breadth ratio"));
    }

    debug!(
        market_last,
        market_avg, vix_last, ratio_last, ratio_avg, "Regime inputs"
    );

    Ok(vec![
        Gate {
            label: "Trend".to_string(),
            pass: market_last > market_avg,
        },
        Gate {
            label: "Fear".to_string(),
            pass: vix_last < FEAR_THRESHOLD,
        },
        Gate {
            label: "Breadth".to_string(),
            pass: ratio_last > ratio_avg,
        },
    ])
}

/// RISK-ON when at least two gates pass.
pub fn classify(gates: &[Gate]) -> RegimeStatus {
    if gates.iter().filter(|g| g.pass).count() >= GATES_REQUIRED {
        RegimeStatus::RiskOn
    } else {
        RegimeStatus::RiskOff
    }
}

pub fn compute(inputs: &RegimeInputs<'_>) -> Result<RiskRegime, SignalError> {
    let details = gates(inputs)?;
    Ok(RiskRegime {
        status: classify(&details),
        details,
        failure: None,
    })
}

async fn fetch_and_compute(
    provider: &dyn MarketData,
    universe: &Universe,
) -> Result<RiskRegime, SignalError> {
    let market = fetch_nonempty(provider, &universe.market, LOOKBACK, false).await?;
    let volatility = fetch_nonempty(provider, &universe.volatility, LOOKBACK, false).await?;
    let breadth = fetch_nonempty(provider, &universe.breadth, LOOKBACK, false).await?;

    compute(&RegimeInputs {
        market: &market,
        volatility: &volatility,
        breadth: &breadth,
    })
}

/// Fetch and classify. Failures become an UNKNOWN regime with no gates.
pub async fn evaluate(provider: &dyn MarketData, universe: &Universe) -> RiskRegime {
    match fetch_and_compute(provider, universe).await {
        Ok(regime) => {
            debug!(status = regime.status.label(), "Risk regime computed");
            regime
        }
        Err(e) => {
            warn!(error = %e, provider = provider.name(), "Risk regime unavailable");
            RiskRegime::unknown(e.kind())
        }
    }
}
