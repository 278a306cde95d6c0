//! trendscan scanner
//!
//! Polls futures klines for the configured symbols and sends Telegram alerts
//! when a filtered triple-SMA crossover fires. Stops on SIGINT/SIGTERM.

use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info, warn};
use trendscan::config::Config;
use trendscan::core::{CycleRunner, CycleSettings, LoopSettings, ScannerLoop, ShutdownHandle};
use trendscan::logging;
use trendscan::metrics::Metrics;
use trendscan::services::{BinanceFuturesClient, MarketDataProvider, Notifier, TelegramNotifier};
use trendscan::signals::SignalDetector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Configuration error, exiting");
            std::process::exit(1);
        }
    };

    info!(
        environment = %trendscan::config::get_environment(),
        symbols = ?config.symbols,
        interval = %config.interval,
        lookback = config.lookback,
        poll_secs = config.poll_interval.as_secs(),
        bollinger_width_min = config.thresholds.bollinger_width_min,
        adx_min = config.thresholds.adx_min,
        "Starting trendscan scanner"
    );
    info!(
        adx_accel_threshold = config.thresholds.adx_accel_threshold,
        "ADX acceleration threshold is reserved and not used by detection"
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(BinanceFuturesClient::new(
        config.binance_url.clone(),
        config.http_timeout,
    )?);
    let notifier: Arc<dyn Notifier> =
        Arc::new(TelegramNotifier::new(&config.telegram, config.http_timeout)?);

    let runner = CycleRunner::new(
        provider,
        notifier.clone(),
        SignalDetector::new(config.thresholds),
        CycleSettings::from_config(&config),
    )
    .with_params(config.indicators)
    .with_metrics(metrics.clone());

    let scanner = ScannerLoop::new(runner, notifier, LoopSettings::from_config(&config))
        .with_metrics(metrics);

    tokio::spawn(wait_for_shutdown(scanner.shutdown_handle()));

    let summary = scanner.run().await;
    info!(
        cycles = summary.cycles_completed,
        panics = summary.cycles_panicked,
        "Scanner exited cleanly"
    );
    Ok(())
}

async fn wait_for_shutdown(handle: ShutdownHandle) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("SIGINT received"),
                    _ = sigterm.recv() => info!("SIGTERM received"),
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not install SIGTERM handler, listening for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl-C received");
    }

    info!("Shutdown requested, finishing current work");
    handle.request_stop();
}
