use accounts::{AccountSyncCoordinator, HttpAccountGateway, SnapshotStore};
use anyhow::Result;
use api::AppState;
use database::{connect_redis, RedisDocumentStore, RedisKeyValueStore};
use ledger::TransferLedger;
use shared::config::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    api::logging::init_logging();

    tracing::info!("Starting mobile banking API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Connect storage
    let redis_pool = connect_redis(&config.redis.url).await?;
    tracing::info!("Redis connection established");

    // Wire up the account sync coordinator
    let gateway = Arc::new(HttpAccountGateway::new(&config.gateway));
    let snapshots = SnapshotStore::new(Arc::new(RedisDocumentStore::new(redis_pool.clone())));
    let coordinator = Arc::new(AccountSyncCoordinator::new(gateway, snapshots));
    tracing::info!("Account sync coordinator initialized");

    // Wire up the transfer ledger
    let ledger_store = Arc::new(RedisKeyValueStore::new(redis_pool));
    let ledger = Arc::new(TransferLedger::new(
        ledger_store,
        config.ledger.recent_activity_cap,
    ));
    tracing::info!("Transfer ledger initialized");

    let state = Arc::new(AppState {
        coordinator,
        ledger,
    });

    // Create router with CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on {}", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
