//! Fixed-cadence driver around [`CycleRunner`].
//!
//! RUNNING: run a cycle, sleep the poll interval, repeat.
//! STOPPING: entered once a stop is requested; sends the stop notification
//! and returns. A stop never interrupts a fetch or a computation, it only
//! shortens the sleep and prevents the next cycle from starting.

use chrono::{FixedOffset, Utc};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{error, info};

use crate::config::Config;
use crate::core::cycle::{panic_message, CycleRunner};
use crate::metrics::Metrics;
use crate::services::{notify_within, Notifier};
use crate::signals::{render_started, render_stopped};

#[derive(Default)]
struct ShutdownState {
    requested: AtomicBool,
    wake: Notify,
}

/// Cloneable view of the loop's stop flag. The flag is written once.
#[derive(Clone, Default)]
pub struct ShutdownHandle {
    inner: Arc<ShutdownState>,
}

impl ShutdownHandle {
    pub fn request_stop(&self) {
        if !self.inner.requested.swap(true, Ordering::SeqCst) {
            self.inner.wake.notify_one();
        }
    }

    pub fn is_stop_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` or until a stop is requested, whichever is first.
    /// Returns whether a stop has been requested.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_stop_requested() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = self.inner.wake.notified() => {}
        }
        self.is_stop_requested()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
}

#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub warmup: Duration,
    pub poll_interval: Duration,
    /// Upper bound on each start/stop notification.
    pub notify_timeout: Duration,
    pub alert_offset: FixedOffset,
}

impl LoopSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            warmup: config.warmup,
            poll_interval: config.poll_interval,
            notify_timeout: config.http_timeout,
            alert_offset: config.alert_offset,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub cycles_completed: u64,
    pub cycles_panicked: u64,
}

pub struct ScannerLoop {
    runner: CycleRunner,
    notifier: Arc<dyn Notifier>,
    settings: LoopSettings,
    shutdown: ShutdownHandle,
    metrics: Option<Arc<Metrics>>,
    state: LoopState,
}

impl ScannerLoop {
    pub fn new(runner: CycleRunner, notifier: Arc<dyn Notifier>, settings: LoopSettings) -> Self {
        let shutdown = ShutdownHandle::default();
        Self {
            runner: runner.with_shutdown(shutdown.clone()),
            notifier,
            settings,
            shutdown,
            metrics: None,
            state: LoopState::Running,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub async fn run(mut self) -> LoopSummary {
        let mut summary = LoopSummary::default();
        let symbols = self.runner.settings().symbols.len();

        info!(
            symbols = symbols,
            warmup_secs = self.settings.warmup.as_secs_f64(),
            poll_secs = self.settings.poll_interval.as_secs_f64(),
            "Scanner: starting"
        );
        self.announce(render_started(Utc::now(), &self.settings.alert_offset))
            .await;

        if self.shutdown.sleep(self.settings.warmup).await {
            self.transition(LoopState::Stopping);
        }

        while self.state == LoopState::Running {
            match AssertUnwindSafe(self.runner.run_cycle()).catch_unwind().await {
                Ok(report) => {
                    summary.cycles_completed += 1;
                    info!(
                        cycle = summary.cycles_completed,
                        signals = report.signals().len(),
                        quiet = report.quiet(),
                        skipped = report.skipped(),
                        failed = report.failed(),
                        interrupted = report.interrupted,
                        "Scanner: cycle finished"
                    );
                    if let Some(metrics) = &self.metrics {
                        metrics.cycles_total.inc();
                    }
                }
                Err(panic) => {
                    summary.cycles_panicked += 1;
                    error!(panic = %panic_message(panic.as_ref()), "Scanner: cycle aborted, loop continues");
                    if let Some(metrics) = &self.metrics {
                        metrics.cycle_panics_total.inc();
                    }
                }
            }

            if self.shutdown.sleep(self.settings.poll_interval).await {
                self.transition(LoopState::Stopping);
            }
        }

        self.announce(render_stopped(Utc::now(), &self.settings.alert_offset))
            .await;
        if let Some(export) = self.metrics.as_ref().and_then(|m| m.export().ok()) {
            info!(metrics = %export, "Scanner: final metrics");
        }
        info!(
            cycles = summary.cycles_completed,
            panics = summary.cycles_panicked,
            "Scanner: stopped"
        );
        summary
    }

    fn transition(&mut self, next: LoopState) {
        if self.state != next {
            info!(from = ?self.state, to = ?next, "Scanner: state change");
            self.state = next;
        }
    }

    /// Operator notifications are best effort.
    async fn announce(&self, message: String) {
        if let Err(e) =
            notify_within(self.notifier.as_ref(), &message, self.settings.notify_timeout).await
        {
            error!(kind = e.kind(), error = %e, "Scanner: failed to send operator notification");
            if let Some(metrics) = &self.metrics {
                metrics.notify_failures_total.inc();
            }
        }
    }
}
