use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Account models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub iban: String,
    pub account_type: String,
    pub currency: String,
    pub balance: String, // Using String to preserve precision
    pub customer_id: String,
}

/// Full replacement copy of a customer's account list plus capture time.
///
/// At most one snapshot exists per customer id; a write replaces the prior
/// snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub customer_id: String,
    pub accounts: Vec<Account>,
    pub captured_at: DateTime<Utc>,
}

// Ledger models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FavoriteOrigin {
    Manual,
    Transfer,
}

/// A saved transfer recipient. Append-only; repeated transfers to the same
/// recipient create distinct entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: Uuid,
    pub name: String,
    pub iban: String,
    pub bank: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub origin: FavoriteOrigin,
}

impl FavoriteEntry {
    pub fn new(
        name: String,
        iban: String,
        bank: String,
        amount: String,
        origin: FavoriteOrigin,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            iban,
            bank,
            amount,
            origin,
        }
    }
}

/// One line of the home screen's recent-activity list. The amount is a signed
/// string; a leading '-' marks an outgoing transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivityEntry {
    pub id: Uuid,
    pub name: String,
    pub amount: String,
}

impl RecentActivityEntry {
    pub fn new(name: String, amount: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
        }
    }
}
