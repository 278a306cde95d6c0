//! Rolling-window primitives over `f64` slices.
//!
//! Every function returns one slot per input index. A slot is `None` when its
//! window is not full yet or contains an undefined input; results are never
//! NaN or infinite as long as the inputs are finite.

/// Apply `f` to each full trailing window of `period` defined values.
fn rolling<F>(values: &[Option<f64>], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut window = Vec::with_capacity(period);
    for end in (period - 1)..values.len() {
        window.clear();
        window.extend(values[end + 1 - period..=end].iter().flatten());
        if window.len() == period {
            out[end] = Some(f(&window));
        }
    }
    out
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Trailing arithmetic mean.
pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, mean)
}

/// Trailing sum.
pub fn rolling_sum(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |w| w.iter().sum())
}

/// Trailing sample standard deviation (n - 1 denominator). A single-bar
/// window has no spread and yields `None`.
pub fn rolling_std(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period < 2 {
        return vec![None; values.len()];
    }
    rolling(values, period, |w| {
        let m = mean(w);
        let var = w.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        var.max(0.0).sqrt()
    })
}

/// True range of one bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// `numerator / denominator`, or `None` when the quotient would not be finite.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let q = numerator / denominator;
    q.is_finite().then_some(q)
}

/// Lift a plain slice into the optional representation used by the rolling helpers.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}
