//! Prometheus counters for the scanner loop.
//!
//! Nothing is served over HTTP; the registry is exported to the log when the
//! loop stops and is available to embedders through [`Metrics::export`].

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycle_panics_total: IntCounter,
    pub signals_emitted_total: IntCounterVec,
    pub symbol_failures_total: IntCounterVec,
    pub notify_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("scanner_cycles_total", "Completed scan cycles")?;
        let cycle_panics_total = IntCounter::new(
            "scanner_cycle_panics_total",
            "Scan cycles aborted by a panic",
        )?;
        let signals_emitted_total = IntCounterVec::new(
            Opts::new("scanner_signals_emitted_total", "Signals handed to the notifier"),
            &["symbol", "direction"],
        )?;
        let symbol_failures_total = IntCounterVec::new(
            Opts::new(
                "scanner_symbol_failures_total",
                "Per-symbol evaluations that failed",
            ),
            &["kind"],
        )?;
        let notify_failures_total = IntCounter::new(
            "scanner_notify_failures_total",
            "Notifications that could not be delivered",
        )?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycle_panics_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(symbol_failures_total.clone()))?;
        registry.register(Box::new(notify_failures_total.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycle_panics_total,
            signals_emitted_total,
            symbol_failures_total,
            notify_failures_total,
        })
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
