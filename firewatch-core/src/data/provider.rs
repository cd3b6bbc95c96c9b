//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the market data source so
//! the watchlist and chart logic can be exercised against a stub without
//! network access.

use crate::domain::{Bar, TimeFrame};
use thiserror::Error;

/// Structured error types for market data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider returned HTTP {status} for {symbol}")]
    BadStatus { symbol: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),
}

/// Trait for market data providers.
///
/// A fetch that succeeds but finds no bars returns an empty Vec; "no data"
/// is content absence, not an error.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch OHLCV bars for a symbol over a chart time frame.
    fn fetch(&self, symbol: &str, frame: TimeFrame) -> Result<Vec<Bar>, DataError>;
}

/// External validity predicate consumed by watchlist mutation.
///
/// Injected as a collaborator so the store logic is testable offline.
/// The production implementation probes the market data provider with a
/// 1-day/1-minute query and treats "at least one bar" as valid.
pub trait TickerValidator {
    fn is_valid(&self, symbol: &str) -> bool;
}
