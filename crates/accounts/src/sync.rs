use chrono::{DateTime, Utc};
use shared::models::Account;
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::gateway::AccountGateway;
use crate::snapshot::SnapshotStore;

/// Outcome of a dashboard refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountRefresh {
    /// Live gateway data; the snapshot store has been updated.
    Fresh(Vec<Account>),
    /// The live fetch failed; data served from the last snapshot.
    Stale {
        accounts: Vec<Account>,
        captured_at: DateTime<Utc>,
    },
    /// The live fetch failed and no snapshot was ever captured.
    Unavailable { reason: String },
}

/// Orchestrates "read remote, cache on success, fall back on failure" for the
/// home screen. Holds no state of its own beyond the per-customer locks.
pub struct AccountSyncCoordinator {
    gateway: Arc<dyn AccountGateway>,
    snapshots: SnapshotStore,
    // One lock per customer so overlapping refreshes (rapid repeated taps)
    // cannot race on the snapshot write.
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AccountSyncCoordinator {
    pub fn new(gateway: Arc<dyn AccountGateway>, snapshots: SnapshotStore) -> Self {
        Self {
            gateway,
            snapshots,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    async fn customer_lock(&self, customer_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.in_flight.lock().await;
        locks
            .entry(customer_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Refresh the account list for a customer.
    ///
    /// Idempotent: repeated calls with an unchanged gateway converge to the
    /// same observable result, with the snapshot overwritten wholesale.
    pub async fn refresh(&self, customer_id: &str) -> Result<AccountRefresh> {
        let lock = self.customer_lock(customer_id).await;
        let _guard = lock.lock().await;

        match self.gateway.fetch_accounts(customer_id).await {
            Ok(accounts) => {
                if let Err(e) = self.snapshots.put(customer_id, &accounts).await {
                    // Losing the cache is not fatal to showing fresh data.
                    warn!(
                        "Failed to store account snapshot for {}: {}",
                        customer_id, e
                    );
                }
                Ok(AccountRefresh::Fresh(accounts))
            }
            Err(Error::Validation(msg)) => Err(Error::Validation(msg)),
            Err(fetch_err) => {
                info!(
                    "Account fetch failed for {}, falling back to snapshot: {}",
                    customer_id, fetch_err
                );

                match self.snapshots.get(customer_id).await {
                    Ok(Some(snapshot)) => Ok(AccountRefresh::Stale {
                        accounts: snapshot.accounts,
                        captured_at: snapshot.captured_at,
                    }),
                    Ok(None) => Ok(AccountRefresh::Unavailable {
                        reason: fetch_err.to_string(),
                    }),
                    Err(store_err) => {
                        warn!("Snapshot read failed for {}: {}", customer_id, store_err);
                        Ok(AccountRefresh::Unavailable {
                            reason: fetch_err.to_string(),
                        })
                    }
                }
            }
        }
    }
}
