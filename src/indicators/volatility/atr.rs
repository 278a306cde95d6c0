//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::Candle;

/// True range per bar. The first bar has no previous close and no value.
pub fn true_range(candles: &[Candle]) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    for i in 1..candles.len() {
        out[i] = Some(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }
    out
}

/// Rolling mean of true range over `period` bars.
///
/// Plain mean rather than Wilder smoothing, so the first value appears at
/// index `period`.
pub fn atr(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(&true_range(candles), period)
}
