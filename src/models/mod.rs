//! Shared data models spanning the engine layers.

pub mod candle;
pub mod signal;

pub use candle::{Candle, CandleSeries};
pub use signal::{Signal, SignalDirection};
