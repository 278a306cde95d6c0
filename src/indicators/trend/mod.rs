//! Trend indicators: SMA, ADX

pub mod adx;
pub mod sma;

pub use adx::*;
pub use sma::*;
