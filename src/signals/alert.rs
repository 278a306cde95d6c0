//! Human-readable messages for the notifier (Telegram HTML subset).

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::Signal;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn local_timestamp(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset).format(TIMESTAMP_FORMAT).to_string()
}

pub fn render_signal(signal: &Signal, interval: &str, offset: &FixedOffset) -> String {
    format!(
        "🚨 <b>SIGNAL {interval}</b>\n\
         Pair: <b>{}</b>\n\
         Side: <b>{}</b>\n\
         Price: {:.8}\n\
         ADX: {:.2}\n\
         Time: {}",
        signal.symbol,
        signal.direction.label(),
        signal.price,
        signal.adx,
        local_timestamp(signal.detected_at, offset),
    )
}

pub fn render_started(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    format!("🤖 Scanner started ({})", local_timestamp(at, offset))
}

pub fn render_stopped(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    format!("🛑 Scanner stopped ({})", local_timestamp(at, offset))
}
