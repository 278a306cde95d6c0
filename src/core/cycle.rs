//! One scan pass over the configured symbols.
//!
//! Symbols are evaluated strictly in order. Whatever goes wrong for one symbol,
//! a panic included, is logged and recorded in the [`CycleReport`]; it never
//! reaches the next symbol or the caller.

use chrono::{FixedOffset, Offset, Utc};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{Config, IndicatorParams};
use crate::core::scanner::ShutdownHandle;
use crate::error::ScanError;
use crate::indicators::IndicatorSnapshot;
use crate::metrics::Metrics;
use crate::models::{CandleSeries, Signal};
use crate::services::{notify_within, MarketDataProvider, Notifier};
use crate::signals::{render_signal, SignalDetector, MIN_CROSSOVER_BARS};

#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub symbols: Vec<String>,
    pub interval: String,
    pub lookback: usize,
    pub fetch_timeout: Duration,
    pub notify_timeout: Duration,
    pub alert_offset: FixedOffset,
}

impl CycleSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            symbols: config.symbols.clone(),
            interval: config.interval.clone(),
            lookback: config.lookback,
            fetch_timeout: config.http_timeout,
            notify_timeout: config.http_timeout,
            alert_offset: config.alert_offset,
        }
    }
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            interval: "15m".to_string(),
            lookback: 200,
            fetch_timeout: Duration::from_secs(10),
            notify_timeout: Duration::from_secs(10),
            alert_offset: FixedOffset::west_opt(3 * 3600).unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// What happened to one symbol during a cycle.
#[derive(Debug)]
pub enum SymbolOutcome {
    Emitted(Signal),
    Quiet,
    /// Not enough closed bars to decide anything.
    Skipped(String),
    Failed(ScanError),
}

#[derive(Debug, Default)]
pub struct CycleReport {
    pub outcomes: Vec<(String, SymbolOutcome)>,
    /// Set when a stop request cut the pass short between symbols.
    pub interrupted: bool,
}

impl CycleReport {
    pub fn signals(&self) -> Vec<&Signal> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                SymbolOutcome::Emitted(signal) => Some(signal),
                _ => None,
            })
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Skipped(_)))
    }

    pub fn quiet(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Quiet))
    }

    pub fn outcome(&self, symbol: &str) -> Option<&SymbolOutcome> {
        self.outcomes
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&SymbolOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

pub struct CycleRunner {
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn Notifier>,
    detector: SignalDetector,
    params: IndicatorParams,
    settings: CycleSettings,
    metrics: Option<Arc<Metrics>>,
    shutdown: Option<ShutdownHandle>,
}

impl CycleRunner {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
        detector: SignalDetector,
        settings: CycleSettings,
    ) -> Self {
        Self {
            provider,
            notifier,
            detector,
            params: IndicatorParams::default(),
            settings,
            metrics: None,
            shutdown: None,
        }
    }

    pub fn with_params(mut self, params: IndicatorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Check this handle between symbols so a stop request does not wait for
    /// the whole pass.
    pub fn with_shutdown(mut self, shutdown: ShutdownHandle) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for symbol in &self.settings.symbols {
            if self.stop_requested() {
                info!(symbol = %symbol, "Cycle: stop requested, leaving remaining symbols");
                report.interrupted = true;
                break;
            }

            let outcome = match AssertUnwindSafe(self.evaluate_symbol(symbol))
                .catch_unwind()
                .await
            {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => self.record_failure(symbol, e),
                Err(panic) => self.record_failure(
                    symbol,
                    ScanError::EvaluationPanicked {
                        symbol: symbol.clone(),
                        message: panic_message(panic.as_ref()),
                    },
                ),
            };

            if let SymbolOutcome::Emitted(signal) = &outcome {
                self.emit(signal).await;
            }
            report.outcomes.push((symbol.clone(), outcome));
        }

        report
    }

    /// Fetch, compute and detect for a single symbol.
    pub async fn evaluate_symbol(&self, symbol: &str) -> Result<SymbolOutcome, ScanError> {
        let fetch = self.provider.fetch_candles(
            symbol,
            &self.settings.interval,
            self.settings.lookback,
        );
        let candles = tokio::time::timeout(self.settings.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                ScanError::data_unavailable(
                    symbol,
                    format!("no response within {:?}", self.settings.fetch_timeout),
                )
            })??;

        let series = CandleSeries::from_fetched(symbol, candles, self.settings.lookback)?;
        if series.len() < MIN_CROSSOVER_BARS {
            debug!(symbol = %symbol, bars = series.len(), "Cycle: not enough closed bars");
            return Ok(SymbolOutcome::Skipped(format!(
                "{} closed bars, need {}",
                series.len(),
                MIN_CROSSOVER_BARS
            )));
        }

        let Some(snapshot) = IndicatorSnapshot::compute(&series, &self.params) else {
            return Ok(SymbolOutcome::Skipped("empty series".to_string()));
        };

        let verdict = self.detector.evaluate(&snapshot);
        debug!(
            symbol = %symbol,
            bars = snapshot.bars,
            width = ?snapshot.bollinger_width,
            adx = snapshot.adx,
            width_ok = verdict.width_ok,
            strength_ok = verdict.strength_ok,
            crossover = ?verdict.crossover,
            "Cycle: evaluated {}",
            symbol
        );

        Ok(match self.detector.detect(symbol, &snapshot, Utc::now()) {
            Some(signal) => SymbolOutcome::Emitted(signal),
            None => SymbolOutcome::Quiet,
        })
    }

    async fn emit(&self, signal: &Signal) {
        let message = render_signal(signal, &self.settings.interval, &self.settings.alert_offset);

        if let Err(e) =
            notify_within(self.notifier.as_ref(), &message, self.settings.notify_timeout).await
        {
            error!(symbol = %signal.symbol, kind = e.kind(), error = %e, "Cycle: failed to deliver alert for {}", signal.symbol);
            if let Some(metrics) = &self.metrics {
                metrics.notify_failures_total.inc();
            }
        }

        info!(
            symbol = %signal.symbol,
            direction = %signal.direction,
            price = signal.price,
            adx = signal.adx,
            "Cycle: signal emitted for {}",
            signal.symbol
        );
        if let Some(metrics) = &self.metrics {
            metrics
                .signals_emitted_total
                .with_label_values(&[signal.symbol.as_str(), signal.direction.label()])
                .inc();
        }
    }

    fn record_failure(&self, symbol: &str, e: ScanError) -> SymbolOutcome {
        warn!(symbol = %symbol, kind = e.kind(), error = %e, "Cycle: evaluation failed for {}", symbol);
        if let Some(metrics) = &self.metrics {
            metrics
                .symbol_failures_total
                .with_label_values(&[e.kind()])
                .inc();
        }
        SymbolOutcome::Failed(e)
    }

    fn stop_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(|handle| handle.is_stop_requested())
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
