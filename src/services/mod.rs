//! External collaborators: market data in, notifications out.

pub mod binance;
pub mod market_data;
pub mod notifier;
pub mod telegram;

pub use binance::BinanceFuturesClient;
pub use market_data::MarketDataProvider;
pub use notifier::{notify_within, Notifier};
pub use telegram::TelegramNotifier;
