//! Dashboard aggregation.
//!
//! Runs the five signal modules against one market-data provider. Modules are
//! independent: each degrades to its own sentinel and never fails the whole.

use std::sync::Arc;

use tracing::info;

use super::signals::{mean_reversion, regime, sectors, trend, vix};
use crate::config::Universe;
use crate::sources::MarketData;
use crate::types::{
    DashboardResponse, MeanReversionSignal, RiskRegime, SectorRotation, TrendOrdering,
    TrendSignal, VixSignal,
};

/// Computes dashboard sections on demand.
pub struct DashboardService {
    provider: Arc<dyn MarketData>,
    universe: Universe,
    trend_order: TrendOrdering,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn MarketData>, universe: Universe, trend_order: TrendOrdering) -> Self {
        Self {
            provider,
            universe,
            trend_order,
        }
    }

    /// Name of the market-data provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Default trend ordering.
    pub fn trend_order(&self) -> TrendOrdering {
        self.trend_order
    }

    pub async fn regime(&self) -> RiskRegime {
        regime::evaluate(self.provider.as_ref(), &self.universe).await
    }

    pub async fn mean_reversion(&self) -> MeanReversionSignal {
        mean_reversion::evaluate(self.provider.as_ref(), &self.universe.mean_reversion).await
    }

    pub async fn vix(&self) -> VixSignal {
        vix::evaluate(self.provider.as_ref(), &self.universe.volatility).await
    }

    pub async fn sectors(&self) -> SectorRotation {
        sectors::evaluate(
            self.provider.as_ref(),
            &self.universe.sectors,
            &self.universe.sector_benchmark,
        )
        .await
    }

    pub async fn trends(&self, ordering: TrendOrdering) -> Vec<TrendSignal> {
        trend::evaluate(self.provider.as_ref(), &self.universe.trend_assets, ordering).await
    }

    /// Build every section concurrently.
    pub async fn build(&self) -> DashboardResponse {
        let started = std::time::Instant::now();

        let (regime, mean_reversion, vix, sectors, trends) = tokio::join!(
            self.regime(),
            self.mean_reversion(),
            self.vix(),
            self.sectors(),
            self.trends(self.trend_order),
        );

        info!(
            provider = self.provider.name(),
            regime = regime.status.label(),
            trends = trends.len(),
            ranked_sectors = sectors.all_ranked.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dashboard built"
        );

        DashboardResponse {
            regime,
            mean_reversion,
            vix,
            sectors,
            trends,
            generated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
