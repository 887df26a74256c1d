use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use accounts::AccountRefresh;
use shared::models::{Account, FavoriteEntry, FavoriteOrigin, RecentActivityEntry};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

// Response envelope for ledger endpoints
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshAccountsResponse {
    pub status: String,
    pub accounts: Vec<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmTransferRequest {
    pub recipient_name: String,
    pub recipient_iban: String,
    pub recipient_bank: String,
    pub amount: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmTransferResponse {
    pub confirmed: bool,
    /// Present when the transfer went through but the local ledger could not
    /// be updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_warning: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub name: String,
    pub iban: String,
    pub bank: String,
    pub amount: String,
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Dashboard refresh: live accounts when the gateway answers, the last
/// snapshot with a notice when it does not, 503 when neither is available.
pub async fn refresh_accounts(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> ApiResult<Json<RefreshAccountsResponse>> {
    let outcome = state.coordinator.refresh(&customer_id).await?;

    let response = match outcome {
        AccountRefresh::Fresh(accounts) => RefreshAccountsResponse {
            status: "fresh".to_string(),
            accounts,
            captured_at: None,
            notice: None,
        },
        AccountRefresh::Stale {
            accounts,
            captured_at,
        } => RefreshAccountsResponse {
            status: "stale".to_string(),
            accounts,
            captured_at: Some(captured_at),
            notice: Some("Showing cached account data; the live refresh failed.".to_string()),
        },
        AccountRefresh::Unavailable { reason } => {
            return Err(ApiError::AccountsUnavailable(reason));
        }
    };

    Ok(Json(response))
}

pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<Vec<FavoriteEntry>>>> {
    let favorites = state.ledger.list_favorites().await?;
    Ok(Json(ApiResponse::success(favorites)))
}

/// Manual favorite creation from the transfer screen's form.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddFavoriteRequest>,
) -> ApiResult<Json<ApiResponse<FavoriteEntry>>> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("name is required".to_string()));
    }
    if request.iban.trim().is_empty() {
        return Err(ApiError::InvalidInput("iban is required".to_string()));
    }
    if request.bank.trim().is_empty() {
        return Err(ApiError::InvalidInput("bank is required".to_string()));
    }
    let amount = parse_amount(&request.amount)?;

    let entry = FavoriteEntry::new(
        request.name,
        request.iban,
        request.bank,
        format!("{:.2}", amount),
        FavoriteOrigin::Manual,
    );
    state.ledger.add_favorite(entry.clone()).await?;

    Ok(Json(ApiResponse::success(entry)))
}

pub async fn list_recent_activity(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<Vec<RecentActivityEntry>>>> {
    let recent = state.ledger.list_recent_activity().await?;
    Ok(Json(ApiResponse::success(recent)))
}

/// Transfer confirmation: appends the recipient to favorites and prepends an
/// outgoing entry to recent activity.
///
/// The transfer itself is already confirmed by the time this runs; a ledger
/// failure is reported in the response but never rolls the transfer back.
pub async fn confirm_transfer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfirmTransferRequest>,
) -> ApiResult<Json<ConfirmTransferResponse>> {
    if request.recipient_name.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "recipient name is required".to_string(),
        ));
    }
    if request.recipient_iban.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "recipient iban is required".to_string(),
        ));
    }
    if request.recipient_bank.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "recipient bank is required".to_string(),
        ));
    }
    let amount = parse_amount(&request.amount)?;

    let favorite = FavoriteEntry::new(
        request.recipient_name.clone(),
        request.recipient_iban,
        request.recipient_bank,
        format!("{:.2}", amount),
        FavoriteOrigin::Transfer,
    );
    let activity =
        RecentActivityEntry::new(request.recipient_name, format!("-{:.2}", amount));

    let mut ledger_warning = None;

    if let Err(e) = state.ledger.add_favorite(favorite).await {
        warn!("Failed to save favorite after confirmed transfer: {}", e);
        ledger_warning = Some(e.to_string());
    }
    if let Err(e) = state.ledger.record_transaction(activity).await {
        warn!("Failed to record activity after confirmed transfer: {}", e);
        ledger_warning.get_or_insert(e.to_string());
    }

    Ok(Json(ConfirmTransferResponse {
        confirmed: true,
        ledger_warning,
    }))
}

fn parse_amount(raw: &str) -> ApiResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount > 0.0 && amount.is_finite() => Ok(amount),
        _ => Err(ApiError::InvalidInput(
            "amount must be a positive number".to_string(),
        )),
    }
}
