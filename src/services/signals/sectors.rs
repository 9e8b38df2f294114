//! Sector rotation: rank sector proxies by momentum relative to a benchmark.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::indicators::RelativeMomentum;
use crate::config::Asset;
use crate::error::SignalError;
use crate::sources::{fetch_nonempty, MarketData};
use crate::types::{FailureKind, Lookback, PriceBar, SectorRank, SectorRotation};

pub const LOOKBACK: Lookback = Lookback::Months(6);
const MOMENTUM_WINDOW: usize = 20;
const TOP_N: usize = 3;

/// Signed percentage with two decimals, e.g. "+1.23%".
pub fn format_gain(momentum: f64) -> String {
    format!("{:+.2}%", momentum * 100.0)
}

/// Rank `(asset, momentum)` pairs, strongest first.
pub fn rank(scores: Vec<(Asset, f64)>) -> SectorRotation {
    let mut scores = scores;
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let all_ranked: Vec<SectorRank> = scores
        .into_iter()
        .map(|(asset, momentum)| SectorRank {
            symbol: asset.symbol,
            name: asset.name,
            gain: format_gain(momentum),
            momentum,
            is_positive: momentum > 0.0,
        })
        .collect();

    SectorRotation {
        top_3: all_ranked.iter().take(TOP_N).cloned().collect(),
        all_ranked,
        failure: None,
    }
}

/// Relative momentum of every sector whose series is usable.
///
/// A sector that failed to load or has too little history is left out of the
/// ranking; the others are unaffected.
pub fn compute(
    sectors: Vec<(Asset, Result<Vec<PriceBar>, SignalError>)>,
    benchmark: &[PriceBar],
) -> SectorRotation {
    let indicator = RelativeMomentum::new(MOMENTUM_WINDOW);

    let scores: Vec<(Asset, f64)> = sectors
        .into_iter()
        .filter_map(|(asset, bars)| {
            match bars.and_then(|b| indicator.latest(&b, benchmark)) {
                Ok(momentum) => Some((asset, momentum)),
                Err(e) => {
                    warn!(error = %e, symbol = %asset.symbol, "Sector skipped");
                    None
                }
            }
        })
        .collect();

    debug!(
        indicator = %indicator.kind(),
        ranked = scores.len(),
        "Sector momentum computed"
    );

    if scores.is_empty() {
        return SectorRotation::empty(FailureKind::DataUnavailable);
    }

    rank(scores)
}

/// Fetch the benchmark and every sector, then rank.
pub async fn evaluate(
    provider: &dyn MarketData,
    sectors: &[Asset],
    benchmark: &str,
) -> SectorRotation {
    let benchmark_bars = match fetch_nonempty(provider, benchmark, LOOKBACK, false).await {
        Ok(bars) => bars,
        Err(e) => {
            warn!(error = %e, benchmark, "Sector benchmark unavailable");
            return SectorRotation::empty(FailureKind::DataUnavailable);
        }
    };

    let mut series = Vec::with_capacity(sectors.len());
    for asset in sectors {
        let bars = fetch_nonempty(provider, &asset.symbol, LOOKBACK, false)
            .await
            .map_err(SignalError::from);
        series.push((asset.clone(), bars));
    }

    compute(series, &benchmark_bars)
}
