use database::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::{FavoriteEntry, RecentActivityEntry};
use shared::{Error, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const FAVORITES_KEY: &str = "favorites";
const RECENT_ACTIVITY_KEY: &str = "recentTransactions";

/// Local favorites / recent-activity persistence for the transfer flow.
///
/// Both lists live as JSON arrays in the key-value store. Each mutation is a
/// read-modify-write held under a per-list lock, so concurrent transfers
/// cannot lose updates; the lock is released on every exit path.
pub struct TransferLedger {
    store: Arc<dyn KeyValueStore>,
    /// Cap on the recent-activity list; 0 keeps it unbounded.
    recent_activity_cap: usize,
    favorites_lock: Mutex<()>,
    recent_lock: Mutex<()>,
}

impl TransferLedger {
    pub fn new(store: Arc<dyn KeyValueStore>, recent_activity_cap: usize) -> Self {
        Self {
            store,
            recent_activity_cap,
            favorites_lock: Mutex::new(()),
            recent_lock: Mutex::new(()),
        }
    }

    async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = self.store.get(key).await.map_err(as_ledger_error)?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| Error::Ledger(format!("corrupt {} list: {}", key, e))),
            None => Ok(Vec::new()),
        }
    }

    async fn write_list<T: Serialize>(&self, key: &str, list: &[T]) -> Result<()> {
        let json = serde_json::to_string(list)
            .map_err(|e| Error::Ledger(format!("serialize {} list: {}", key, e)))?;
        self.store.set(key, &json).await.map_err(as_ledger_error)
    }

    /// Append a favorite. Entries are never deduplicated; repeated transfers
    /// to the same recipient create distinct entries.
    pub async fn add_favorite(&self, entry: FavoriteEntry) -> Result<()> {
        let _guard = self.favorites_lock.lock().await;

        let mut favorites: Vec<FavoriteEntry> = self.read_list(FAVORITES_KEY).await?;
        favorites.push(entry);
        self.write_list(FAVORITES_KEY, &favorites).await?;

        debug!("Favorites list now has {} entries", favorites.len());
        Ok(())
    }

    /// Favorites in insertion order; empty if none were ever stored.
    pub async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        self.read_list(FAVORITES_KEY).await
    }

    /// Prepend a recent-activity entry, trimming the list to the configured
    /// cap.
    pub async fn record_transaction(&self, entry: RecentActivityEntry) -> Result<()> {
        let _guard = self.recent_lock.lock().await;

        let mut recent: Vec<RecentActivityEntry> =
            self.read_list(RECENT_ACTIVITY_KEY).await?;
        recent.insert(0, entry);
        if self.recent_activity_cap > 0 {
            recent.truncate(self.recent_activity_cap);
        }
        self.write_list(RECENT_ACTIVITY_KEY, &recent).await
    }

    /// Recent activity, most-recent-first.
    pub async fn list_recent_activity(&self) -> Result<Vec<RecentActivityEntry>> {
        self.read_list(RECENT_ACTIVITY_KEY).await
    }
}

// The key-value store reports I/O failures as Store errors; within the ledger
// they surface as Ledger errors so callers can report them distinctly.
fn as_ledger_error(err: Error) -> Error {
    match err {
        Error::Store(msg) => Error::Ledger(msg),
        other => other,
    }
}
