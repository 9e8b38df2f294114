//! Yahoo Finance API client for historical daily bars.
//!
//! Uses the unofficial v8 chart endpoint (no API key).

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{BarsFuture, MarketData};
use crate::error::SourceError;
use crate::types::{Lookback, PriceBar};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    #[serde(default)]
    adjclose: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    adjclose: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Turn a chart payload into chronological bars.
///
/// Points without a positive close are skipped. With `adjusted`, every price
/// is scaled by `adjclose / close` for that session.
fn parse_chart(data: YahooChartResponse, adjusted: bool) -> Result<Vec<PriceBar>, SourceError> {
    if let Some(error) = data.chart.error {
        return Err(SourceError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let result = data
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or(SourceError::EmptyResponse("no results"))?;

    // A symbol with no sessions in range comes back without timestamps.
    let timestamps = result.timestamp.unwrap_or_default();

    let adjclose = result
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .and_then(|a| a.adjclose)
        .unwrap_or_default();

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or(SourceError::EmptyResponse("no quote data"))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let close = match closes.get(i).copied().flatten() {
            Some(c) if c > 0.0 => c,
            _ => continue,
        };
        let open = opens.get(i).copied().flatten().unwrap_or(close);
        let high = highs.get(i).copied().flatten().unwrap_or(close);
        let low = lows.get(i).copied().flatten().unwrap_or(close);

        let factor = if adjusted {
            adjclose
                .get(i)
                .copied()
                .flatten()
                .map(|adj| adj / close)
                .unwrap_or(1.0)
        } else {
            1.0
        };

        let Some(date) = DateTime::<Utc>::from_timestamp(timestamp, 0).map(|d| d.date_naive())
        else {
            continue;
        };

        bars.push(PriceBar {
            date,
            open: open * factor,
            high: high * factor,
            low: low * factor,
            close: close * factor,
        });
    }

    Ok(bars)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, lookback: Lookback, now: DateTime<Utc>) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&includePrePost=false&events=div%2Csplit",
            self.base_url,
            normalize_yahoo_symbol(symbol),
            lookback.start_from(now).timestamp(),
            now.timestamp(),
        )
    }

    /// Fetch daily bars for a symbol.
    pub async fn get_daily_bars(
        &self,
        symbol: &str,
        lookback: Lookback,
        adjusted: bool,
    ) -> Result<Vec<PriceBar>, SourceError> {
        let url = self.chart_url(symbol, lookback, Utc::now());

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: YahooChartResponse = response.json().await?;
        let bars = parse_chart(data, adjusted)?;

        debug!(
            symbol = symbol,
            range = %lookback.label(),
            bars = bars.len(),
            "Yahoo Finance bars received"
        );

        Ok(bars)
    }
}

impl MarketData for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn daily_bars<'a>(
        &'a self,
        symbol: &'a str,
        lookback: Lookback,
        adjusted: bool,
    ) -> BarsFuture<'a> {
        Box::pin(self.get_daily_bars(symbol, lookback, adjusted))
    }
}
