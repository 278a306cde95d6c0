//! Latest/prior view over a series, the only input the detector needs.

use crate::config::IndicatorParams;
use crate::indicators::trend::{latest_adx, sma};
use crate::indicators::volatility::bollinger;
use crate::models::CandleSeries;

/// Fast/medium/slow SMA values at one index.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmaTriple {
    pub fast: Option<f64>,
    pub medium: Option<f64>,
    pub slow: Option<f64>,
}

impl SmaTriple {
    pub fn new(fast: f64, medium: f64, slow: f64) -> Self {
        Self {
            fast: Some(fast),
            medium: Some(medium),
            slow: Some(slow),
        }
    }

    /// `fast > medium > slow`. An absent average never satisfies it.
    pub fn bullish_aligned(&self) -> bool {
        matches!(
            (self.fast, self.medium, self.slow),
            (Some(f), Some(m), Some(s)) if f > m && m > s
        )
    }

    /// `fast < medium < slow`.
    pub fn bearish_aligned(&self) -> bool {
        matches!(
            (self.fast, self.medium, self.slow),
            (Some(f), Some(m), Some(s)) if f < m && m < s
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub latest: SmaTriple,
    pub prior: SmaTriple,
    pub bollinger_width: Option<f64>,
    pub adx: f64,
    pub close: f64,
    pub bars: usize,
}

impl IndicatorSnapshot {
    /// Compute every indicator from scratch. `None` for an empty series.
    pub fn compute(series: &CandleSeries, params: &IndicatorParams) -> Option<Self> {
        let close = series.last()?.close;
        let closes = series.closes();

        let fast = sma(&closes, params.fast_period);
        let medium = sma(&closes, params.medium_period);
        let slow = sma(&closes, params.slow_period);
        let triple_at = |i: usize| SmaTriple {
            fast: fast[i],
            medium: medium[i],
            slow: slow[i],
        };

        let last = closes.len() - 1;
        let prior = if last >= 1 {
            triple_at(last - 1)
        } else {
            SmaTriple::default()
        };

        let bands = bollinger(&closes, params.bollinger_period, params.bollinger_std);

        Some(Self {
            latest: triple_at(last),
            prior,
            bollinger_width: bands.latest_width(),
            adx: latest_adx(series.candles(), params.adx_period),
            close,
            bars: series.len(),
        })
    }
}
