//! Market data provider interface.

use async_trait::async_trait;

use crate::error::ScanError;
use crate::models::Candle;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Most recent `limit` bars for `symbol`, oldest first. The last bar is
    /// the interval still in progress; callers drop it before use.
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ScanError>;
}
