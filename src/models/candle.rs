//! Price bars and the per-cycle series handed to the indicator engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub open_time: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            open_time,
        }
    }

    /// Checks `high >= max(open, close) >= min(open, close) >= low` with
    /// finite, non-negative prices and volume.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(format!(
                "non-finite or negative value in bar at {}",
                self.open_time
            ));
        }
        if self.high < self.open.max(self.close) || self.low > self.open.min(self.close) {
            return Err(format!(
                "bar at {} violates high/low bounds (o={} h={} l={} c={})",
                self.open_time, self.open, self.high, self.low, self.close
            ));
        }
        Ok(())
    }
}

/// Closed bars for one symbol, oldest first.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from a raw provider response.
    ///
    /// The provider's last bar is the interval still in progress and is always
    /// dropped. What remains is capped to `lookback` bars and validated;
    /// malformed or out-of-order bars reject the whole response.
    pub fn from_fetched(
        symbol: &str,
        mut candles: Vec<Candle>,
        lookback: usize,
    ) -> Result<Self, ScanError> {
        candles.pop();
        if candles.len() > lookback {
            candles.drain(..candles.len() - lookback);
        }

        for candle in &candles {
            candle
                .validate()
                .map_err(|reason| ScanError::data_unavailable(symbol, reason))?;
        }
        if let Some(pair) = candles
            .windows(2)
            .find(|pair| pair[1].open_time <= pair[0].open_time)
        {
            return Err(ScanError::data_unavailable(
                symbol,
                format!(
                    "bars not ascending: {} followed by {}",
                    pair[0].open_time, pair[1].open_time
                ),
            ));
        }

        Ok(Self {
            symbol: symbol.to_string(),
            candles,
        })
    }

    /// Wrap bars that are already closed and ordered.
    pub fn from_closed(symbol: &str, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.to_string(),
            candles,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }
}
