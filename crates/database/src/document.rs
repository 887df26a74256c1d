use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::Value;
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::RedisPool;

/// Durable per-key document persistence, grouped into named collections.
///
/// Writes replace the whole document; there is no merge, versioning or TTL.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>>;
    async fn put_document(&self, collection: &str, key: &str, value: Value) -> Result<()>;
}

fn storage_key(collection: &str, key: &str) -> String {
    format!("{}:{}", collection, key)
}

/// Redis-backed document store. Documents are stored as JSON strings under
/// `{collection}:{key}`.
pub struct RedisDocumentStore {
    pool: RedisPool,
}

impl RedisDocumentStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let storage_key = storage_key(collection, key);
        let mut conn = self.pool.clone();

        let raw: Option<String> = conn
            .get(&storage_key)
            .await
            .map_err(|e| Error::Store(format!("redis get {}: {}", storage_key, e)))?;

        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| {
                    Error::Store(format!("corrupt document {}: {}", storage_key, e))
                })?;
                Ok(Some(value))
            }
            None => {
                debug!("Document {} not found", storage_key);
                Ok(None)
            }
        }
    }

    async fn put_document(&self, collection: &str, key: &str, value: Value) -> Result<()> {
        let storage_key = storage_key(collection, key);

        let json = serde_json::to_string(&value)
            .map_err(|e| Error::Internal(format!("serialize document {}: {}", storage_key, e)))?;

        let mut conn = self.pool.clone();
        conn.set::<_, _, ()>(&storage_key, json)
            .await
            .map_err(|e| Error::Store(format!("redis set {}: {}", storage_key, e)))?;

        debug!("Wrote document {}", storage_key);
        Ok(())
    }
}

/// In-memory document store for tests and offline development.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&storage_key(collection, key)).cloned())
    }

    async fn put_document(&self, collection: &str, key: &str, value: Value) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(storage_key(collection, key), value);
        Ok(())
    }
}
