//! Mock collaborators and candle builders for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trendscan::core::{CycleRunner, CycleSettings, LoopSettings};
use trendscan::models::Candle;
use trendscan::services::{MarketDataProvider, Notifier};
use trendscan::signals::SignalDetector;
use trendscan::ScanError;

pub fn bar_time(index: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + ChronoDuration::minutes(15 * index as i64)
}

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(c, c + 0.5, c - 0.5, c, 1000.0, bar_time(i)))
        .collect()
}

/// `closed` rising bars (closes 100, 101, ...) plus the bar still in progress.
pub fn uptrend_response(closed: usize) -> Vec<Candle> {
    let closes: Vec<f64> = (0..=closed).map(|i| 100.0 + i as f64).collect();
    candles_from_closes(&closes)
}

/// `closed` falling bars (closes 200, 199, ...) plus the bar still in progress.
pub fn downtrend_response(closed: usize) -> Vec<Candle> {
    let closes: Vec<f64> = (0..=closed).map(|i| 200.0 - i as f64).collect();
    candles_from_closes(&closes)
}

/// Provider serving canned responses per symbol.
#[derive(Default)]
pub struct MockProvider {
    responses: HashMap<String, Vec<Candle>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    panic_once: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    fetches: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.responses.insert(symbol.to_string(), candles);
        self
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    /// The first fetch of `symbol` panics, later fetches behave normally.
    pub fn panicking_once(self, symbol: &str) -> Self {
        self.panic_once
            .lock()
            .unwrap()
            .insert(symbol.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        _interval: &str,
        _limit: usize,
    ) -> Result<Vec<Candle>, ScanError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let should_panic = self.panic_once.lock().unwrap().remove(symbol);
        if should_panic {
            panic!("provider exploded for {symbol}");
        }
        if self.failing.contains(symbol) {
            return Err(ScanError::data_unavailable(symbol, "connection reset"));
        }
        Ok(self.responses.get(symbol).cloned().unwrap_or_default())
    }
}

/// Notifier recording every message it is asked to deliver.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the attempt, then reports a delivery failure.
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn signal_messages(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|m| m.contains("<b>SIGNAL"))
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), ScanError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(ScanError::NotifyUnavailable("telegram responded 502".to_string()));
        }
        Ok(())
    }
}

/// Notifier that accepts a message and then never answers.
#[derive(Default)]
pub struct HangingNotifier {
    attempts: Mutex<Vec<String>>,
}

impl HangingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for HangingNotifier {
    async fn notify(&self, message: &str) -> Result<(), ScanError> {
        self.attempts.lock().unwrap().push(message.to_string());
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

pub fn cycle_settings(symbols: &[&str]) -> CycleSettings {
    CycleSettings {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        fetch_timeout: Duration::from_secs(2),
        ..CycleSettings::default()
    }
}

pub fn runner(
    provider: Arc<MockProvider>,
    notifier: Arc<RecordingNotifier>,
    symbols: &[&str],
) -> CycleRunner {
    CycleRunner::new(
        provider,
        notifier,
        SignalDetector::default(),
        cycle_settings(symbols),
    )
}

pub fn loop_settings(warmup_ms: u64, poll_ms: u64) -> LoopSettings {
    LoopSettings {
        warmup: Duration::from_millis(warmup_ms),
        poll_interval: Duration::from_millis(poll_ms),
        notify_timeout: Duration::from_secs(2),
        alert_offset: CycleSettings::default().alert_offset,
    }
}

/// Poll `condition` every few milliseconds for up to two seconds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}
