//! Bollinger Bands indicator
//!
//! Middle = SMA(period)
//! Upper/Lower = Middle ± num_std × sample standard deviation
//! Width = (Upper − Lower) / Middle

use crate::common::math;

#[derive(Debug, Clone, Default)]
pub struct BollingerSeries {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    /// Band width as a fraction of the midline; absent where the midline is
    /// absent or zero.
    pub width: Vec<Option<f64>>,
}

impl BollingerSeries {
    pub fn latest_width(&self) -> Option<f64> {
        self.width.last().copied().flatten()
    }
}

pub fn bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let values = math::defined(closes);
    let middle = math::rolling_mean(&values, period);
    let std = math::rolling_std(&values, period);

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());
    let mut width = Vec::with_capacity(closes.len());

    for (mid, sd) in middle.iter().zip(std.iter()) {
        match (mid, sd) {
            (Some(m), Some(s)) => {
                let (u, l) = (m + num_std * s, m - num_std * s);
                upper.push(Some(u));
                lower.push(Some(l));
                width.push(math::safe_div(u - l, *m));
            }
            _ => {
                upper.push(None);
                lower.push(None);
                width.push(None);
            }
        }
    }

    BollingerSeries {
        middle,
        upper,
        lower,
        width,
    }
}
