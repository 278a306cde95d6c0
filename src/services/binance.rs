//! Binance USDⓈ-M futures klines over REST

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::ScanError;
use crate::models::Candle;
use crate::services::market_data::MarketDataProvider;

pub const KLINES_PATH: &str = "/fapi/v1/klines";

pub struct BinanceFuturesClient {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceFuturesClient {
    /// Client whose every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl MarketDataProvider for BinanceFuturesClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ScanError> {
        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("interval", interval), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| ScanError::data_unavailable(symbol, format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScanError::data_unavailable(symbol, format!("bad status: {e}")))?;

        let rows: Vec<Vec<Value>> = response
            .json()
            .await
            .map_err(|e| ScanError::data_unavailable(symbol, format!("malformed payload: {e}")))?;

        debug!(symbol = %symbol, rows = rows.len(), "Binance: fetched {} klines", rows.len());

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                parse_kline(row)
                    .map_err(|reason| ScanError::data_unavailable(symbol, format!("row {i}: {reason}")))
            })
            .collect()
    }
}

/// `[open_time_ms, "open", "high", "low", "close", "volume", close_time, ...]`
pub fn parse_kline(row: &[Value]) -> Result<Candle, String> {
    if row.len() < 6 {
        return Err(format!("expected at least 6 fields, got {}", row.len()));
    }

    let open_ms = row[0]
        .as_i64()
        .ok_or_else(|| format!("open time is not an integer: {}", row[0]))?;
    let open_time = DateTime::from_timestamp_millis(open_ms)
        .ok_or_else(|| format!("open time out of range: {open_ms}"))?;

    Ok(Candle::new(
        number(&row[1], "open")?,
        number(&row[2], "high")?,
        number(&row[3], "low")?,
        number(&row[4], "close")?,
        number(&row[5], "volume")?,
        open_time,
    ))
}

/// Binance sends decimals as strings; plain JSON numbers are accepted too.
fn number(value: &Value, field: &str) -> Result<f64, String> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{field} is not a number: {value}"))
}
