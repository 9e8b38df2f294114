use std::sync::Arc;
use std::time::Duration;

use tactician::config::Config;
use tactician::services::DashboardService;
use tactician::sources::YahooFinanceClient;
use tactician::{app, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tactician=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env());
    info!("Starting Tactician server on {}:{}", config.host, config.port);

    let yahoo = YahooFinanceClient::new(
        &config.yahoo_base_url,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    info!(
        base_url = %config.yahoo_base_url,
        trend_order = ?config.trend_order,
        "Market data provider ready"
    );

    let dashboard = Arc::new(DashboardService::new(
        Arc::new(yahoo),
        config.universe.clone(),
        config.trend_order,
    ));

    let state = AppState {
        config: config.clone(),
        dashboard,
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Tactician server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
