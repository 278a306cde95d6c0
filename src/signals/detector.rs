//! Triple SMA crossover gated by volatility and trend-strength filters.

use chrono::{DateTime, Utc};

use crate::config::SignalThresholds;
use crate::indicators::{IndicatorSnapshot, SmaTriple};
use crate::models::{Signal, SignalDirection};

/// Bars needed before a crossover decision is attempted.
pub const MIN_CROSSOVER_BARS: usize = 3;

/// Direction whose strict ordering became true between `prior` and `latest`.
pub fn crossover(prior: &SmaTriple, latest: &SmaTriple) -> Option<SignalDirection> {
    if latest.bullish_aligned() && !prior.bullish_aligned() {
        Some(SignalDirection::Long)
    } else if latest.bearish_aligned() && !prior.bearish_aligned() {
        Some(SignalDirection::Short)
    } else {
        None
    }
}

/// Outcome of every admission filter on one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterVerdict {
    pub width_ok: bool,
    pub strength_ok: bool,
    pub crossover: Option<SignalDirection>,
}

impl FilterVerdict {
    pub fn direction(&self) -> Option<SignalDirection> {
        if self.width_ok && self.strength_ok {
            self.crossover
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignalDetector {
    thresholds: SignalThresholds,
}

impl SignalDetector {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Crossover edge on the snapshot, `None` when history is too short.
    pub fn crossover(&self, snapshot: &IndicatorSnapshot) -> Option<SignalDirection> {
        if snapshot.bars < MIN_CROSSOVER_BARS {
            return None;
        }
        crossover(&snapshot.prior, &snapshot.latest)
    }

    /// Evaluate all three filters against the same snapshot.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> FilterVerdict {
        FilterVerdict {
            width_ok: snapshot
                .bollinger_width
                .is_some_and(|w| w >= self.thresholds.bollinger_width_min),
            strength_ok: snapshot.adx >= self.thresholds.adx_min,
            crossover: self.crossover(snapshot),
        }
    }

    pub fn detect(
        &self,
        symbol: &str,
        snapshot: &IndicatorSnapshot,
        detected_at: DateTime<Utc>,
    ) -> Option<Signal> {
        let direction = self.evaluate(snapshot).direction()?;
        Some(Signal {
            symbol: symbol.to_string(),
            direction,
            price: snapshot.close,
            adx: snapshot.adx,
            detected_at,
        })
    }
}

impl Default for SignalDetector {
    fn default() -> Self {
        Self::new(SignalThresholds::default())
    }
}
