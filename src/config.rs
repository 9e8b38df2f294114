use std::env;

use crate::sources::yahoo::DEFAULT_BASE_URL;
use crate::types::TrendOrdering;

/// A tradable instrument and its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub symbol: String,
    pub name: String,
}

impl Asset {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }
}

/// Parse `SYM:Name,SYM2:Name2` into assets. Malformed entries are skipped.
pub fn parse_assets(s: &str) -> Vec<Asset> {
    s.split(',')
        .filter_map(|entry| {
            let (symbol, name) = entry.split_once(':')?;
            let (symbol, name) = (symbol.trim(), name.trim());
            if symbol.is_empty() || name.is_empty() {
                None
            } else {
                Some(Asset::new(&symbol.to_uppercase(), name))
            }
        })
        .collect()
}

/// Instruments each module evaluates.
#[derive(Debug, Clone)]
pub struct Universe {
    /// Broad-market proxy for the regime trend gate.
    pub market: String,
    /// Volatility index for the regime fear gate and the extremes module.
    pub volatility: String,
    /// Equal-weight proxy for the regime breadth gate.
    pub breadth: String,
    /// Instrument traded by the mean-reversion module.
    pub mean_reversion: Asset,
    /// Sector proxies ranked by relative momentum.
    pub sectors: Vec<Asset>,
    /// Benchmark the sectors are measured against.
    pub sector_benchmark: String,
    /// Instruments evaluated by the trend-following module, in display order.
    pub trend_assets: Vec<Asset>,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            market: "SPY".to_string(),
            volatility: "^VIX".to_string(),
            breadth: "RSP".to_string(),
            mean_reversion: Asset::new("QQQ", "Nasdaq 100"),
            sectors: vec![
                Asset::new("XLC", "Comm Services"),
                Asset::new("XLY", "Consumer Discr"),
                Asset::new("XLP", "Consumer Staples"),
                Asset::new("XLE", "Energy"),
                Asset::new("XLF", "Financials"),
                Asset::new("XLV", "Health Care"),
                Asset::new("XLI", "Industrials"),
                Asset::new("XLB", "Materials"),
                Asset::new("XLRE", "Real Estate"),
                Asset::new("XLK", "Technology"),
                Asset::new("XLU", "Utilities"),
            ],
            sector_benchmark: "SPY".to_string(),
            trend_assets: vec![
                Asset::new("VGT", "Tech"),
                Asset::new("VDE", "Energy"),
                Asset::new("VIS", "Industrials"),
                Asset::new("XME", "Metals"),
                Asset::new("GLD", "Gold"),
                Asset::new("IBIT", "Bitcoin"),
                Asset::new("TLT", "30 yr Treasuries"),
            ],
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Base URL of the Yahoo Finance chart API.
    pub yahoo_base_url: String,
    /// Timeout for market-data requests (seconds).
    pub http_timeout_secs: u64,
    /// Default ordering of the trend list.
    pub trend_order: TrendOrdering,
    /// Instruments evaluated by each module.
    pub universe: Universe,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut universe = Universe::default();

        // Format: "VGT:Tech,GLD:Gold"
        if let Some(assets) = env::var("TREND_ASSETS")
            .ok()
            .map(|s| parse_assets(&s))
            .filter(|a| !a.is_empty())
        {
            universe.trend_assets = assets;
        }
        if let Some(assets) = env::var("SECTOR_ASSETS")
            .ok()
            .map(|s| parse_assets(&s))
            .filter(|a| !a.is_empty())
        {
            universe.sectors = assets;
        }
        if let Ok(symbol) = env::var("SECTOR_BENCHMARK") {
            universe.sector_benchmark = symbol.to_uppercase();
        }
        if let Some(asset) = env::var("MEAN_REVERSION_SYMBOL")
            .ok()
            .and_then(|s| parse_assets(&s).into_iter().next())
        {
            universe.mean_reversion = asset;
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            yahoo_base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            trend_order: env::var("TREND_ORDER")
                .ok()
                .and_then(|v| TrendOrdering::from_str(&v))
                .unwrap_or_default(),
            universe,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
