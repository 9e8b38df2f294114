//! Integration tests for the dashboard HTTP API, served from in-memory data.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tower::ServiceExt;

use tactician::config::{Asset, Config, Universe};
use tactician::services::DashboardService;
use tactician::sources::StaticMarketData;
use tactician::{app, AppState, PriceBar, TrendOrdering};

fn bars(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::flat(start + Duration::days(i as i64), c))
        .collect()
}

fn linear(count: usize, start: f64, step: f64) -> Vec<PriceBar> {
    let closes: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    bars(&closes)
}

fn trend_assets() -> Vec<Asset> {
    vec![
        Asset::new("VGT", "Tech"),
        Asset::new("VDE", "Energy"),
        Asset::new("VIS", "Industrials"),
        Asset::new("XME", "Metals"),
        Asset::new("GLD", "Gold"),
        Asset::new("IBIT", "Bitcoin"),
        Asset::new("TLT", "30 yr Treasuries"),
    ]
}

fn test_app(provider: StaticMarketData) -> axum::Router {
    let universe = Universe {
        trend_assets: trend_assets(),
        ..Universe::default()
    };
    let config = Arc::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        yahoo_base_url: "http://localhost".to_string(),
        http_timeout_secs: 1,
        trend_order: TrendOrdering::Declaration,
        universe: universe.clone(),
    });
    let dashboard = Arc::new(DashboardService::new(
        Arc::new(provider),
        universe,
        TrendOrdering::Declaration,
    ));

    app(AppState { config, dashboard })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Every symbol the default universe touches, with healthy data.
fn full_market() -> StaticMarketData {
    let mut provider = StaticMarketData::new()
        .with_series("SPY", linear(300, 400.0, 0.5))
        .with_series("RSP", linear(300, 150.0, 0.3))
        .with_series("^VIX", bars(&(0..100).map(|i| 14.0 + (i % 5) as f64).collect::<Vec<_>>()))
        .with_series("QQQ", linear(300, 300.0, 0.5));

    for (i, sector) in Universe::default().sectors.iter().enumerate() {
        provider = provider.with_series(&sector.symbol, linear(130, 50.0, 0.05 * i as f64));
    }
    for asset in trend_assets() {
        provider = provider.with_series(&asset.symbol, linear(260, 100.0, 0.5));
    }
    provider
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(test_app(StaticMarketData::new()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["trendAssets"], 7);
}

// =============================================================================
// Full dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_without_data_is_all_sentinels() {
    let (status, body) = get(test_app(StaticMarketData::new()), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(body["meta"]["provider"], "static");
    assert_eq!(data["regime"]["status"], "UNKNOWN");
    assert_eq!(data["regime"]["details"], serde_json::json!([]));
    assert_eq!(data["meanReversion"]["signal"], "ERROR");
    assert_eq!(data["meanReversion"]["price"], 0.0);
    assert_eq!(data["vix"]["signal"], "ERROR");
    assert_eq!(data["vix"]["zScore"], 0.0);
    assert_eq!(data["sectors"]["top3"], serde_json::json!([]));
    assert_eq!(data["sectors"]["allRanked"], serde_json::json!([]));
    assert_eq!(data["trends"], serde_json::json!([]));
    assert!(data["generatedAt"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_dashboard_with_full_market() {
    let (status, body) = get(test_app(full_market()), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["regime"]["details"].as_array().unwrap().len(), 3);
    assert_ne!(data["regime"]["status"], "UNKNOWN");
    assert_ne!(data["meanReversion"]["signal"], "ERROR");
    assert_ne!(data["vix"]["signal"], "ERROR");
    assert_eq!(data["sectors"]["top3"].as_array().unwrap().len(), 3);
    assert_eq!(data["sectors"]["allRanked"].as_array().unwrap().len(), 11);
    assert_eq!(data["trends"].as_array().unwrap().len(), 7);
    assert_eq!(data["trends"][0]["status"], "BUY");
}

// =============================================================================
// Sectors
// =============================================================================

#[tokio::test]
async fn test_sectors_ranked_descending() {
    let (status, body) = get(test_app(full_market()), "/api/dashboard/sectors").await;
    assert_eq!(status, StatusCode::OK);

    let ranked = body["data"]["allRanked"].as_array().unwrap();
    let momentum: Vec<f64> = ranked
        .iter()
        .map(|r| r["momentum"].as_f64().unwrap())
        .collect();
    assert!(momentum.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(body["data"]["top3"], serde_json::json!(ranked[..3].to_vec()));

    for rank in ranked {
        let gain = rank["gain"].as_str().unwrap();
        assert!(gain.ends_with('%'));
        assert!(gain.starts_with('+') || gain.starts_with('-'));
        assert_eq!(
            rank["isPositive"].as_bool().unwrap(),
            rank["momentum"].as_f64().unwrap() > 0.0
        );
    }
}

#[tokio::test]
async fn test_sectors_without_benchmark() {
    let provider = StaticMarketData::new().with_series("XLK", linear(130, 50.0, 0.5));
    let (status, body) = get(test_app(provider), "/api/dashboard/sectors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["allRanked"], serde_json::json!([]));
    assert_eq!(body["data"]["failure"], "data_unavailable");
}

// =============================================================================
// Trends
// =============================================================================

#[tokio::test]
async fn test_trends_drop_instrument_with_empty_series() {
    let provider = full_market().with_series("IBIT", Vec::new());
    let (status, body) = get(test_app(provider), "/api/dashboard/trends").await;
    assert_eq!(status, StatusCode::OK);

    let symbols: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["VGT", "VDE", "VIS", "XME", "GLD", "TLT"]);
}

#[tokio::test]
async fn test_trends_oscillator_order() {
    let (status, body) =
        get(test_app(full_market()), "/api/dashboard/trends?order=oscillator").await;
    assert_eq!(status, StatusCode::OK);

    let rsi: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["rsi14"].as_f64().unwrap())
        .collect();
    assert_eq!(rsi.len(), 7);
    assert!(rsi.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_trends_unknown_order_is_bad_request() {
    let (status, body) =
        get(test_app(StaticMarketData::new()), "/api/dashboard/trends?order=random").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

// =============================================================================
// Single sections
// =============================================================================

#[tokio::test]
async fn test_single_section_endpoints() {
    for (uri, key) in [
        ("/api/dashboard/regime", "status"),
        ("/api/dashboard/mean-reversion", "signal"),
        ("/api/dashboard/vix", "signal"),
    ] {
        let (status, body) = get(test_app(full_market()), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body["data"][key].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_mean_reversion_failure_sentinel() {
    let provider = full_market().failing("QQQ");
    let (_, body) = get(test_app(provider), "/api/dashboard/mean-reversion").await;
    assert_eq!(body["data"]["signal"], "ERROR");
    assert_eq!(body["data"]["failure"], "data_unavailable");
    assert_eq!(body["data"]["symbol"], "QQQ");
}
