use accounts::{AccountGateway, AccountSyncCoordinator, SnapshotStore};
use api::handlers::{self, AddFavoriteRequest, ConfirmTransferRequest};
use api::{ApiError, AppState};
use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::Json;
use database::{KeyValueStore, MemoryDocumentStore, MemoryKeyValueStore};
use ledger::TransferLedger;
use shared::models::{Account, FavoriteOrigin};
use shared::Error;
use std::sync::Arc;

/// Gateway stub returning a fixed response on every call.
struct FixedGateway {
    response: Result<Vec<Account>, String>,
}

#[async_trait]
impl AccountGateway for FixedGateway {
    async fn fetch_accounts(&self, _customer_id: &str) -> shared::Result<Vec<Account>> {
        self.response.clone().map_err(Error::Gateway)
    }
}

struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> shared::Result<Option<String>> {
        Err(Error::Store("device storage unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> shared::Result<()> {
        Err(Error::Store("device storage unavailable".to_string()))
    }
}

fn app_state(gateway_response: Result<Vec<Account>, String>) -> Arc<AppState> {
    let gateway = Arc::new(FixedGateway {
        response: gateway_response,
    });
    let snapshots = SnapshotStore::new(Arc::new(MemoryDocumentStore::new()));
    let coordinator = Arc::new(AccountSyncCoordinator::new(gateway, snapshots));
    let ledger = Arc::new(TransferLedger::new(Arc::new(MemoryKeyValueStore::new()), 50));

    Arc::new(AppState {
        coordinator,
        ledger,
    })
}

fn transfer_request(name: &str, amount: &str) -> ConfirmTransferRequest {
    ConfirmTransferRequest {
        recipient_name: name.to_string(),
        recipient_iban: "JO71CBJO0000000000001234".to_string(),
        recipient_bank: "Arab Bank".to_string(),
        amount: amount.to_string(),
    }
}

#[tokio::test]
async fn test_confirmed_transfer_updates_both_ledger_lists() {
    let state = app_state(Err("unused".to_string()));

    let response = handlers::confirm_transfer(
        State(state.clone()),
        Json(transfer_request("Sara Ahmad", "25.00")),
    )
    .await
    .unwrap();

    assert!(response.0.confirmed);
    assert!(response.0.ledger_warning.is_none());

    let favorites = state.ledger.list_favorites().await.unwrap();
    let newest = favorites.last().unwrap();
    assert_eq!(newest.name, "Sara Ahmad");
    assert_eq!(newest.amount, "25.00");
    assert_eq!(newest.origin, FavoriteOrigin::Transfer);

    let recent = state.ledger.list_recent_activity().await.unwrap();
    assert_eq!(recent.first().unwrap().amount, "-25.00");
    assert_eq!(recent.first().unwrap().name, "Sara Ahmad");
}

#[tokio::test]
async fn test_transfer_with_invalid_amount_is_rejected() {
    let state = app_state(Err("unused".to_string()));

    let result = handlers::confirm_transfer(
        State(state.clone()),
        Json(transfer_request("Sara Ahmad", "-5.00")),
    )
    .await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    // Nothing was written.
    assert!(state.ledger.list_favorites().await.unwrap().is_empty());
    assert!(state.ledger.list_recent_activity().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_transfer_stays_confirmed_when_the_ledger_write_fails() {
    let gateway = Arc::new(FixedGateway {
        response: Err("unused".to_string()),
    });
    let snapshots = SnapshotStore::new(Arc::new(MemoryDocumentStore::new()));
    let state = Arc::new(AppState {
        coordinator: Arc::new(AccountSyncCoordinator::new(gateway, snapshots)),
        ledger: Arc::new(TransferLedger::new(Arc::new(FailingKeyValueStore), 50)),
    });

    let response = handlers::confirm_transfer(
        State(state),
        Json(transfer_request("Sara Ahmad", "25.00")),
    )
    .await
    .unwrap();

    assert!(response.0.confirmed);
    assert!(response.0.ledger_warning.is_some());
}

#[tokio::test]
async fn test_manual_favorite_is_tagged_manual() {
    let state = app_state(Err("unused".to_string()));

    let request = AddFavoriteRequest {
        name: "Omar Khalil".to_string(),
        iban: "JO94CBJO0000000000005678".to_string(),
        bank: "Zain Cash".to_string(),
        amount: "40".to_string(),
    };

    let response = handlers::add_favorite(State(state.clone()), Json(request))
        .await
        .unwrap();
    let entry = response.0.data.unwrap();
    assert_eq!(entry.origin, FavoriteOrigin::Manual);
    assert_eq!(entry.amount, "40.00");

    let favorites = state.ledger.list_favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
}

#[tokio::test]
async fn test_dashboard_refresh_returns_fresh_accounts() {
    let account = Account {
        iban: "JO71CBJO0000000000001234".to_string(),
        account_type: "current".to_string(),
        currency: "JOD".to_string(),
        balance: "150.00".to_string(),
        customer_id: "CUST_1".to_string(),
    };
    let state = app_state(Ok(vec![account.clone()]));

    let response = handlers::refresh_accounts(State(state), Path("CUST_1".to_string()))
        .await
        .unwrap();

    assert_eq!(response.0.status, "fresh");
    assert_eq!(response.0.accounts, vec![account]);
    assert!(response.0.notice.is_none());
}

#[tokio::test]
async fn test_dashboard_refresh_serves_cached_data_with_a_notice() {
    let account = Account {
        iban: "JO71CBJO0000000000001234".to_string(),
        account_type: "current".to_string(),
        currency: "JOD".to_string(),
        balance: "150.00".to_string(),
        customer_id: "CUST_1".to_string(),
    };

    let documents = Arc::new(MemoryDocumentStore::new());
    SnapshotStore::new(documents.clone())
        .put("CUST_1", &[account.clone()])
        .await
        .unwrap();

    let gateway = Arc::new(FixedGateway {
        response: Err("gateway unreachable".to_string()),
    });
    let state = Arc::new(AppState {
        coordinator: Arc::new(AccountSyncCoordinator::new(
            gateway,
            SnapshotStore::new(documents),
        )),
        ledger: Arc::new(TransferLedger::new(Arc::new(MemoryKeyValueStore::new()), 50)),
    });

    let response = handlers::refresh_accounts(State(state), Path("CUST_1".to_string()))
        .await
        .unwrap();

    assert_eq!(response.0.status, "stale");
    assert_eq!(response.0.accounts, vec![account]);
    assert!(response.0.captured_at.is_some());
    assert!(response.0.notice.is_some());
}

#[tokio::test]
async fn test_dashboard_refresh_maps_unavailable_to_api_error() {
    let state = app_state(Err("gateway unreachable".to_string()));

    let result = handlers::refresh_accounts(State(state), Path("CUST_1".to_string())).await;
    assert!(matches!(result, Err(ApiError::AccountsUnavailable(_))));
}
