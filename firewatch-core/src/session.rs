//! Session: an authenticated user and their in-memory watchlist.
//!
//! The session object is passed explicitly through operations instead of a
//! global "current user". Watchlist mutations persist immediately, so the
//! on-disk file always matches what the user last saw.

use crate::auth::{AuthError, CredentialStore};
use crate::data::TickerValidator;
use crate::watchlist::{AddOutcome, Watchlist, WatchlistError, WatchlistStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),
}

/// An authenticated user and their loaded watchlist.
#[derive(Debug)]
pub struct Session {
    username: String,
    watchlist: Watchlist,
}

impl Session {
    /// Authenticate and load the user's watchlist. A first-time user gets
    /// an empty watchlist (no file yet is not an error).
    pub fn login(
        credentials: &CredentialStore,
        watchlists: &WatchlistStore,
        username: &str,
        password: &str,
    ) -> Result<Self, SessionError> {
        credentials.login(username, password)?;
        let watchlist = watchlists.load(username)?;
        Ok(Self {
            username: username.to_string(),
            watchlist,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Add tickers from a comma-separated input, persisting on success.
    pub fn add_tickers(
        &mut self,
        watchlists: &WatchlistStore,
        input: &str,
        validator: &dyn TickerValidator,
    ) -> Result<AddOutcome, WatchlistError> {
        let outcome = self.watchlist.add(input, validator)?;
        watchlists.save(&self.username, &self.watchlist)?;
        Ok(outcome)
    }

    /// Remove a ticker, persisting if anything changed.
    pub fn remove_ticker(
        &mut self,
        watchlists: &WatchlistStore,
        symbol: &str,
    ) -> Result<bool, WatchlistError> {
        let removed = self.watchlist.remove(symbol);
        if removed {
            watchlists.save(&self.username, &self.watchlist)?;
        }
        Ok(removed)
    }
}
