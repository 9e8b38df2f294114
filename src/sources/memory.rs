//! In-memory market data.
//!
//! Serves fixed bar series per symbol. Used for offline runs and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{BarsFuture, MarketData};
use crate::error::SourceError;
use crate::types::{Lookback, PriceBar};

/// Provider backed by a fixed map of symbol to bars.
///
/// Unknown symbols fail with `MissingSymbol`; symbols registered with
/// [`StaticMarketData::failing`] fail with a provider error.
#[derive(Default)]
pub struct StaticMarketData {
    series: HashMap<String, Vec<PriceBar>>,
    failing: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series for `symbol` (case-insensitive).
    pub fn with_series(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.series.insert(symbol.to_uppercase(), bars);
        self
    }

    /// Make every request for `symbol` fail.
    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_uppercase());
        self
    }

    /// Symbols requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, symbol: &str) -> Result<Vec<PriceBar>, SourceError> {
        let key = symbol.to_uppercase();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(key.clone());
        }

        if self.failing.contains(&key) {
            return Err(SourceError::Api {
                code: "Unavailable".to_string(),
                description: format!("{} is configured to fail", key),
            });
        }

        self.series
            .get(&key)
            .cloned()
            .ok_or(SourceError::MissingSymbol(key))
    }
}

impl MarketData for StaticMarketData {
    fn name(&self) -> &str {
        "static"
    }

    fn daily_bars<'a>(
        &'a self,
        symbol: &'a str,
        _lookback: Lookback,
        _adjusted: bool,
    ) -> BarsFuture<'a> {
        let result = self.lookup(symbol);
        Box::pin(async move { result })
    }
}
