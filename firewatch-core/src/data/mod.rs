//! Market data: provider trait, validity probe, and the Yahoo client.

pub mod provider;
pub mod yahoo;

pub use provider::{DataError, MarketDataProvider, TickerValidator};
pub use yahoo::YahooProvider;
