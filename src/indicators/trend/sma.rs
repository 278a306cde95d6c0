//! SMA (Simple Moving Average) indicator

use crate::common::math;

/// Trailing mean of `period` values ending at each index.
///
/// Indices before `period - 1` have no value.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(&math::defined(values), period)
}

