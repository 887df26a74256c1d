use chrono::{DateTime, Utc};
use database::DocumentStore;
use serde::{Deserialize, Serialize};
use shared::models::{Account, AccountSnapshot};
use shared::{Error, Result};
use std::sync::Arc;
use tracing::debug;

const SNAPSHOT_COLLECTION: &str = "accounts";

// Persisted document shape: { "accounts": [...], "updatedAt": <rfc3339> },
// keyed by customer id under the "accounts" collection.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    accounts: Vec<Account>,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

/// Last-known account list per customer, used as the offline fallback when
/// the live gateway call fails. Last-writer-wins, no TTL.
pub struct SnapshotStore {
    store: Arc<dyn DocumentStore>,
}

impl SnapshotStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Replace the stored snapshot for this customer with the given list and
    /// the current timestamp.
    pub async fn put(&self, customer_id: &str, accounts: &[Account]) -> Result<()> {
        let document = SnapshotDocument {
            accounts: accounts.to_vec(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&document)
            .map_err(|e| Error::Internal(format!("serialize snapshot: {}", e)))?;

        self.store
            .put_document(SNAPSHOT_COLLECTION, customer_id, value)
            .await?;

        debug!("Stored account snapshot for customer {}", customer_id);
        Ok(())
    }

    /// Most recent snapshot for this customer, or None if one was never
    /// captured.
    pub async fn get(&self, customer_id: &str) -> Result<Option<AccountSnapshot>> {
        let value = self
            .store
            .get_document(SNAPSHOT_COLLECTION, customer_id)
            .await?;

        let Some(value) = value else {
            return Ok(None);
        };

        let document: SnapshotDocument = serde_json::from_value(value)
            .map_err(|e| Error::Store(format!("corrupt snapshot for {}: {}", customer_id, e)))?;

        Ok(Some(AccountSnapshot {
            customer_id: customer_id.to_string(),
            accounts: document.accounts,
            captured_at: document.updated_at,
        }))
    }
}
