//! Rolling indicators over candle series.

pub mod snapshot;
pub mod trend;
pub mod volatility;

pub use snapshot::{IndicatorSnapshot, SmaTriple};
pub use trend::{adx, sma};
pub use volatility::{atr, bollinger, true_range, BollingerSeries};
