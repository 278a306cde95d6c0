//! trendscan: periodic futures scanner raising triple-SMA crossover signals
//! filtered by Bollinger width and ADX strength.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::ScanError;
