use redis::{aio::ConnectionManager, Client};

pub mod document;
pub mod kv;

pub use document::{DocumentStore, MemoryDocumentStore, RedisDocumentStore};
pub use kv::{KeyValueStore, MemoryKeyValueStore, RedisKeyValueStore};

pub type RedisPool = ConnectionManager;

/// Open a redis connection manager shared by the document and key-value
/// stores. The manager reconnects on its own after transient failures.
pub async fn connect_redis(redis_url: &str) -> anyhow::Result<RedisPool> {
    tracing::info!("Connecting to redis");

    let client = Client::open(redis_url)?;
    Ok(ConnectionManager::new(client).await?)
}
