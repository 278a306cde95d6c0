//! Environment-driven configuration.
//!
//! Values come from the process environment (optionally seeded from `.env`
//! by the binary). Parsing goes through [`Config::from_lookup`] so tests can
//! feed a plain map instead of mutating the real environment.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::ScanError;

pub const DEFAULT_SYMBOLS: &[&str] = &[
    "BCHUSDT", "BNBUSDT", "CHZUSDT", "DOGEUSDT", "ENAUSDT", "ETHUSDT", "JASMYUSDT", "SOLUSDT",
    "UNIUSDT", "XMRUSDT", "XRPUSDT",
];

pub const DEFAULT_BINANCE_URL: &str = "https://fapi.binance.com";
pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Deployment environment name, used to pick the log format.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Fixed indicator periods. These are strategy constants, not deployment knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub fast_period: usize,
    pub medium_period: usize,
    pub slow_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std: f64,
    pub adx_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            fast_period: 3,
            medium_period: 8,
            slow_period: 20,
            bollinger_period: 8,
            bollinger_std: 2.0,
            adx_period: 8,
        }
    }
}

/// Admission thresholds consulted by the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    pub bollinger_width_min: f64,
    pub adx_min: f64,
    /// Loaded and reported, never consulted by the detection rule.
    pub adx_accel_threshold: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            bollinger_width_min: 0.015,
            adx_min: 15.0,
            adx_accel_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub binance_url: String,
    pub symbols: Vec<String>,
    pub interval: String,
    pub lookback: usize,
    pub poll_interval: Duration,
    pub warmup: Duration,
    pub http_timeout: Duration,
    pub thresholds: SignalThresholds,
    pub indicators: IndicatorParams,
    pub alert_offset: FixedOffset,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ScanError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from a map, mostly useful in tests.
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self, ScanError> {
        Self::from_lookup(|key| values.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScanError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required(&lookup, "TELEGRAM_TOKEN")?;
        let chat_id = required(&lookup, "TELEGRAM_CHAT_ID")?;

        let symbols = match lookup("SCANNER_SYMBOLS") {
            Some(raw) => parse_symbols(&raw),
            None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        };
        if symbols.is_empty() {
            return Err(ScanError::InvalidConfiguration {
                key: "SCANNER_SYMBOLS".to_string(),
                value: lookup("SCANNER_SYMBOLS").unwrap_or_default(),
            });
        }

        let lookback: usize = parsed(&lookup, "KLINES_LIMIT", 200)?;
        if lookback == 0 {
            return Err(ScanError::InvalidConfiguration {
                key: "KLINES_LIMIT".to_string(),
                value: "0".to_string(),
            });
        }

        let poll_seconds: u64 = parsed(&lookup, "POLL_SECONDS", 120)?;
        let warmup_seconds: u64 = parsed(&lookup, "WARMUP_SECONDS", 15)?;
        let timeout_seconds: u64 = parsed(&lookup, "HTTP_TIMEOUT_SECONDS", 10)?;
        let offset_hours: i32 = parsed(&lookup, "ALERT_UTC_OFFSET_HOURS", -3)?;
        let alert_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ScanError::InvalidConfiguration {
                key: "ALERT_UTC_OFFSET_HOURS".to_string(),
                value: offset_hours.to_string(),
            })?;

        let defaults = SignalThresholds::default();
        let thresholds = SignalThresholds {
            bollinger_width_min: parsed(
                &lookup,
                "BOLLINGER_WIDTH_MIN_PCT",
                defaults.bollinger_width_min,
            )?,
            adx_min: parsed(&lookup, "ADX_MIN", defaults.adx_min)?,
            adx_accel_threshold: parsed(
                &lookup,
                "ADX_ACCEL_THRESHOLD",
                defaults.adx_accel_threshold,
            )?,
        };

        Ok(Self {
            telegram: TelegramConfig {
                token,
                chat_id,
                api_url: lookup("TELEGRAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_URL.to_string()),
            },
            binance_url: lookup("BINANCE_FAPI_URL")
                .unwrap_or_else(|| DEFAULT_BINANCE_URL.to_string()),
            symbols,
            interval: lookup("KLINES_INTERVAL").unwrap_or_else(|| "15m".to_string()),
            lookback,
            poll_interval: Duration::from_secs(poll_seconds),
            warmup: Duration::from_secs(warmup_seconds),
            http_timeout: Duration::from_secs(timeout_seconds),
            thresholds,
            indicators: IndicatorParams::default(),
            alert_offset,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ScanError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScanError::ConfigurationMissing(key.to_string()))
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ScanError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ScanError::InvalidConfiguration {
                key: key.to_string(),
                value: raw,
            }),
    }
}

fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
