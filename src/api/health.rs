use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    trend_assets: usize,
    sector_assets: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let universe = &state.config.universe;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        trend_assets: universe.trend_assets.len(),
        sector_assets: universe.sectors.len(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
