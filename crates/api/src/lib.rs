pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorResponse};

use accounts::AccountSyncCoordinator;
use ledger::TransferLedger;
use std::sync::Arc;

/// Shared application state handed to every handler.
pub struct AppState {
    pub coordinator: Arc<AccountSyncCoordinator>,
    pub ledger: Arc<TransferLedger>,
}
