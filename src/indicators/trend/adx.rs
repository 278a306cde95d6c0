//! ADX-style directional strength
//!
//! Steps:
//! 1. +DM / -DM from consecutive highs and lows (0 on the first bar)
//! 2. +DI = 100 * rolling_sum(+DM) / ATR, -DI likewise
//! 3. DX = 100 * |+DI - -DI| / (+DI + -DI), 0 when the sum is 0
//! 4. ADX = rolling mean of DX
//!
//! Every slot that cannot be computed is reported as 0, so the output is
//! always finite and non-negative.

use crate::common::math;
use crate::indicators::volatility::atr;
use crate::models::Candle;

/// +DM and -DM per bar. Only the dominant, positive move counts.
pub fn directional_movement(candles: &[Candle]) -> (Vec<f64>, Vec<f64>) {
    let mut plus_dm = vec![0.0; candles.len()];
    let mut minus_dm = vec![0.0; candles.len()];

    for i in 1..candles.len() {
        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;

        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    (plus_dm, minus_dm)
}

/// DX per bar, `None` until ATR is defined.
pub fn dx(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let (plus_dm, minus_dm) = directional_movement(candles);
    let plus_sum = math::rolling_sum(&math::defined(&plus_dm), period);
    let minus_sum = math::rolling_sum(&math::defined(&minus_dm), period);
    let atr_v = atr(candles, period);

    (0..candles.len())
        .map(|i| {
            let atr_i = atr_v[i]?;
            let (plus, minus) = (plus_sum[i]?, minus_sum[i]?);
            // Flat ATR means no movement at all: both DIs collapse to 0.
            let plus_di = math::safe_div(100.0 * plus, atr_i).unwrap_or(0.0);
            let minus_di = math::safe_div(100.0 * minus, atr_i).unwrap_or(0.0);
            Some(
                math::safe_div(100.0 * (plus_di - minus_di).abs(), plus_di + minus_di)
                    .unwrap_or(0.0),
            )
        })
        .collect()
}

/// Smoothed directional strength per bar, 0 where history is insufficient.
pub fn adx(candles: &[Candle], period: usize) -> Vec<f64> {
    math::rolling_mean(&dx(candles, period), period)
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()).unwrap_or(0.0).max(0.0))
        .collect()
}

/// ADX at the latest bar, 0 for an empty series.
pub fn latest_adx(candles: &[Candle], period: usize) -> f64 {
    adx(candles, period).last().copied().unwrap_or(0.0)
}
