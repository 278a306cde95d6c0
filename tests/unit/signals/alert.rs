//! Unit tests for alert rendering

use chrono::{FixedOffset, TimeZone, Utc};
use trendscan::models::{Signal, SignalDirection};
use trendscan::signals::{local_timestamp, render_signal, render_started, render_stopped};

fn sao_paulo() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

#[test]
fn test_render_signal_is_deterministic() {
    let signal = Signal {
        symbol: "SOLUSDT".to_string(),
        direction: SignalDirection::Short,
        price: 142.5,
        adx: 18.0,
        detected_at: Utc.with_ymd_and_hms(2026, 1, 2, 15, 4, 5).unwrap(),
    };

    let message = render_signal(&signal, "15m", &sao_paulo());
    assert_eq!(
        message,
        "🚨 <b>SIGNAL 15m</b>\n\
         Pair: <b>SOLUSDT</b>\n\
         Side: <b>SHORT</b>\n\
         Price: 142.50000000\n\
         ADX: 18.00\n\
         Time: 2026-01-02 12:04:05"
    );
}

#[test]
fn test_local_timestamp_crosses_midnight() {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 1, 0, 0).unwrap();
    assert_eq!(local_timestamp(at, &sao_paulo()), "2026-01-01 22:00:00");
}

#[test]
fn test_lifecycle_messages() {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 15, 0, 0).unwrap();
    assert_eq!(render_started(at, &sao_paulo()), "🤖 Scanner started (2026-01-02 12:00:00)");
    assert_eq!(render_stopped(at, &sao_paulo()), "🛑 Scanner stopped (2026-01-02 12:00:00)");
}
