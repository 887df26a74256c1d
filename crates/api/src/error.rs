use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Error type for the HTTP surface.
#[derive(Debug)]
pub enum ApiError {
    // Gateway failed and no cached snapshot exists
    AccountsUnavailable(String),

    // Persistence errors
    StoreError(String),
    LedgerError(String),

    // Validation errors
    InvalidInput(String),

    // Resource errors
    NotFound(String),

    // Internal errors
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::AccountsUnavailable(msg) => {
                write!(f, "Account data unavailable: {}", msg)
            }
            ApiError::StoreError(msg) => write!(f, "Store error: {}", msg),
            ApiError::LedgerError(msg) => write!(f, "Ledger error: {}", msg),
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::Gateway(msg) => ApiError::AccountsUnavailable(msg),
            shared::Error::Store(msg) => ApiError::StoreError(msg),
            shared::Error::Ledger(msg) => ApiError::LedgerError(msg),
            shared::Error::NotFound(msg) => ApiError::NotFound(msg),
            shared::Error::Validation(msg) => ApiError::InvalidInput(msg),
            shared::Error::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Error response body. A single human-readable message; no structured error
/// codes cross the UI boundary.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::AccountsUnavailable(msg) => {
                error!("Accounts unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Account data is currently unavailable. Please try again later.".to_string(),
                )
            }
            ApiError::StoreError(msg) => {
                error!("Store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
            ApiError::LedgerError(msg) => {
                error!("Ledger error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not update your saved transfer lists.".to_string(),
                )
            }
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_maps_to_503() {
        let response = ApiError::AccountsUnavailable("gateway down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_input_maps_to_400_and_keeps_its_message() {
        let response =
            ApiError::InvalidInput("amount must be a positive number".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_shared_errors_convert_to_api_errors() {
        let api_err: ApiError = shared::Error::Ledger("write failed".to_string()).into();
        assert!(matches!(api_err, ApiError::LedgerError(_)));

        let api_err: ApiError = shared::Error::Validation("empty id".to_string()).into();
        assert!(matches!(api_err, ApiError::InvalidInput(_)));
    }
}
