pub mod twelvedata;

pub use twelvedata::TwelveDataClient;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{CandleSeries, Symbol, Timeframe};

/// Intraday candle provider.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Up to `count` most recent candles, oldest first.
    async fn fetch_candles(
        &self,
        symbol: Symbol,
        tf: Timeframe,
        count: usize,
    ) -> Result<CandleSeries, ProviderError>;
}
