//! Watchlist: per-user ordered set of ticker symbols, persisted as a JSON
//! array in `{username}_watchlist.json`.
//!
//! Storage keeps insertion order; display always sorts, so storage order
//! never matters to the user. Mutations go through `add`/`remove` only,
//! and the caller persists after every mutation.

use crate::data::TickerValidator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Hard cap on watchlist size.
pub const MAX_SYMBOLS: usize = 25;

/// Maximum tickers accepted in a single add batch.
pub const MAX_ADD_BATCH: usize = 5;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("you can add up to {MAX_ADD_BATCH} tickers at a time (got {count})")]
    TooManyTickers { count: usize },

    #[error("watchlist file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("watchlist file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result of a batch add: what went in, what the validator rejected.
/// Duplicates and overflow beyond the cap are skipped silently.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<String>,
    pub invalid: Vec<String>,
}

/// A user's tracked symbols, unique, insertion-ordered, max 25.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols in insertion (storage) order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Symbols in display order: lexicographic ascending.
    pub fn sorted(&self) -> Vec<String> {
        let mut sorted = self.symbols.clone();
        sorted.sort();
        sorted
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Add tickers from a comma-separated input string.
    ///
    /// Entries are trimmed and upper-cased; empties are dropped. More than
    /// `MAX_ADD_BATCH` parsed entries rejects the whole batch with no
    /// mutation. Each remaining ticker is appended only if it is not
    /// already present, the list is below `MAX_SYMBOLS`, and the injected
    /// validator accepts it; validator rejections are reported in
    /// `AddOutcome::invalid` without blocking the rest of the batch.
    pub fn add(
        &mut self,
        input: &str,
        validator: &dyn TickerValidator,
    ) -> Result<AddOutcome, WatchlistError> {
        let tickers: Vec<String> = input
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();

        if tickers.len() > MAX_ADD_BATCH {
            return Err(WatchlistError::TooManyTickers {
                count: tickers.len(),
            });
        }

        let mut outcome = AddOutcome::default();
        for ticker in tickers {
            if self.contains(&ticker) || self.symbols.len() >= MAX_SYMBOLS {
                continue;
            }
            if validator.is_valid(&ticker) {
                self.symbols.push(ticker.clone());
                outcome.added.push(ticker);
            } else {
                outcome.invalid.push(ticker);
            }
        }
        Ok(outcome)
    }

    /// Remove a symbol. Returns false (no-op) when absent.
    pub fn remove(&mut self, symbol: &str) -> bool {
        if let Some(pos) = self.symbols.iter().position(|s| s == symbol) {
            self.symbols.remove(pos);
            true
        } else {
            false
        }
    }
}

/// File-backed store for per-user watchlists, rooted at a data directory.
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    dir: PathBuf,
}

impl WatchlistStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}_watchlist.json"))
    }

    /// Load a user's watchlist. An absent file is an empty watchlist;
    /// an unreadable or corrupt file is an error (never silently reset).
    pub fn load(&self, username: &str) -> Result<Watchlist, WatchlistError> {
        let path = self.path(username);
        if !path.exists() {
            return Ok(Watchlist::new());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrite the user's file with the full current watchlist.
    pub fn save(&self, username: &str, watchlist: &Watchlist) -> Result<(), WatchlistError> {
        if let Some(parent) = self.path(username).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(watchlist)?;
        std::fs::write(self.path(username), json)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
