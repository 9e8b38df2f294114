pub mod memory;
pub mod yahoo;

pub use memory::StaticMarketData;
pub use yahoo::YahooFinanceClient;

use crate::error::SourceError;
use crate::types::{Lookback, PriceBar};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by market-data providers.
pub type BarsFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<PriceBar>, SourceError>> + Send + 'a>>;

/// Provider of historical daily bars.
///
/// Implementations may fail, return an empty series, or return fewer bars
/// than the lookback implies. Callers must tolerate all three.
pub trait MarketData: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Chronological daily bars for `symbol` over `lookback`.
    ///
    /// With `adjusted`, prices are back-adjusted for splits and dividends.
    fn daily_bars<'a>(&'a self, symbol: &'a str, lookback: Lookback, adjusted: bool)
        -> BarsFuture<'a>;
}

/// Fetch bars and treat an empty series as missing data.
pub async fn fetch_nonempty(
    provider: &dyn MarketData,
    symbol: &str,
    lookback: Lookback,
    adjusted: bool,
) -> Result<Vec<PriceBar>, SourceError> {
    let bars = provider.daily_bars(symbol, lookback, adjusted).await?;
    if bars.is_empty() {
        return Err(SourceError::MissingSymbol(symbol.to_string()));
    }
    Ok(bars)
}
