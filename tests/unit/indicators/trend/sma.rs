//! Unit tests for SMA indicator

use trendscan::indicators::trend::sma;

fn closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_sma_matches_trailing_mean_at_every_index() {
    let values = closes(40);
    for period in [1, 3, 8, 20] {
        let out = sma(&values, period);
        assert_eq!(out.len(), values.len());
        for (i, slot) in out.iter().enumerate() {
            if i + 1 < period {
                assert!(slot.is_none(), "period {period} index {i} should be absent");
            } else {
                let window = &values[i + 1 - period..=i];
                let expected = window.iter().sum::<f64>() / period as f64;
                assert!((slot.unwrap() - expected).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_sma_insufficient_data() {
    let out = sma(&[1.0, 2.0], 3);
    assert_eq!(out, vec![None, None]);
}
