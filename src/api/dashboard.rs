//! Dashboard API endpoints.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::types::{
    DashboardResponse, MeanReversionSignal, RiskRegime, SectorRotation, TrendOrdering,
    TrendSignal, VixSignal,
};
use crate::AppState;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// Market-data provider the signals were computed from.
    pub provider: String,
    /// Unix timestamp (milliseconds) of the response.
    pub generated_at: i64,
}

impl<T> ApiResponse<T> {
    fn new(data: T, provider: &str) -> Self {
        Self {
            data,
            meta: ApiMeta {
                provider: provider.to_string(),
                generated_at: chrono::Utc::now().timestamp_millis(),
            },
        }
    }
}

/// Query parameters for the trends endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    /// Ordering: "declaration" or "oscillator"
    pub order: Option<String>,
}

impl TrendsQuery {
    fn ordering(&self, default: TrendOrdering) -> Result<TrendOrdering> {
        match self.order.as_deref() {
            None => Ok(default),
            Some(s) => TrendOrdering::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown trend order: {}", s))),
        }
    }
}

/// Create the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/regime", get(get_regime))
        .route("/mean-reversion", get(get_mean_reversion))
        .route("/vix", get(get_vix))
        .route("/sectors", get(get_sectors))
        .route("/trends", get(get_trends))
}

/// Get every dashboard section.
async fn get_dashboard(State(state): State<AppState>) -> Json<ApiResponse<DashboardResponse>> {
    Json(ApiResponse::new(
        state.dashboard.build().await,
        state.dashboard.provider_name(),
    ))
}

async fn get_regime(State(state): State<AppState>) -> Json<ApiResponse<RiskRegime>> {
    Json(ApiResponse::new(
        state.dashboard.regime().await,
        state.dashboard.provider_name(),
    ))
}

async fn get_mean_reversion(
    State(state): State<AppState>,
) -> Json<ApiResponse<MeanReversionSignal>> {
    Json(ApiResponse::new(
        state.dashboard.mean_reversion().await,
        state.dashboard.provider_name(),
    ))
}

async fn get_vix(State(state): State<AppState>) -> Json<ApiResponse<VixSignal>> {
    Json(ApiResponse::new(
        state.dashboard.vix().await,
        state.dashboard.provider_name(),
    ))
}

async fn get_sectors(State(state): State<AppState>) -> Json<ApiResponse<SectorRotation>> {
    Json(ApiResponse::new(
        state.dashboard.sectors().await,
        state.dashboard.provider_name(),
    ))
}

/// Get trend signals, optionally re-ordered.
async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<ApiResponse<Vec<TrendSignal>>>> {
    let ordering = query.ordering(state.dashboard.trend_order())?;
    Ok(Json(ApiResponse::new(
        state.dashboard.trends(ordering).await,
        state.dashboard.provider_name(),
    )))
}
