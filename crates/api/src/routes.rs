use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Dashboard
        .route(
            "/api/customers/:customer_id/accounts",
            get(handlers::refresh_accounts),
        )
        // Transfer flow
        .route(
            "/api/ledger/favorites",
            get(handlers::list_favorites).post(handlers::add_favorite),
        )
        .route(
            "/api/ledger/recent-activity",
            get(handlers::list_recent_activity),
        )
        .route("/api/transfers/confirm", post(handlers::confirm_transfer))
        .with_state(state)
}
