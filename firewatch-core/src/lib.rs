//! Firewatch Core — domain types, indicator engine, market data, and stores.
//!
//! This crate contains everything behind the interactive surface:
//! - Domain types (OHLCV bars, chart time frames)
//! - Indicator engine (SMA, EMA, RSI, Bollinger Bands, ADX/±DI)
//! - Market data provider (Yahoo v8 chart API) and the ticker-validity probe
//! - News provider (newsapi.org)
//! - Watchlist store (per-user JSON file, max 25 symbols)
//! - Credential store (users.json, salted blake3 hashes)
//! - Session object tying an authenticated user to their watchlist

pub mod auth;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod news;
pub mod session;
pub mod watchlist;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync so a future
    /// off-thread fetch worker does not force a retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::TimeFrame>();
        require_sync::<domain::TimeFrame>();

        require_send::<watchlist::Watchlist>();
        require_sync::<watchlist::Watchlist>();
        require_send::<watchlist::WatchlistStore>();
        require_sync::<watchlist::WatchlistStore>();

        require_send::<auth::CredentialStore>();
        require_sync::<auth::CredentialStore>();

        require_send::<session::Session>();
        require_sync::<session::Session>();

        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<news::NewsApiProvider>();
        require_sync::<news::NewsApiProvider>();
    }
}
