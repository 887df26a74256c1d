use async_trait::async_trait;
use redis::AsyncCommands;
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::RedisPool;

/// Flat key-value persistence backing the transfer ledger lists.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub struct RedisKeyValueStore {
    pool: RedisPool,
    /// Prefix keeping ledger keys apart from document collections.
    prefix: String,
}

impl RedisKeyValueStore {
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            prefix: "local".to_string(),
        }
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let storage_key = self.storage_key(key);
        let mut conn = self.pool.clone();

        conn.get(&storage_key)
            .await
            .map_err(|e| Error::Store(format!("redis get {}: {}", storage_key, e)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage_key = self.storage_key(key);
        let mut conn = self.pool.clone();

        conn.set::<_, _, ()>(&storage_key, value)
            .await
            .map_err(|e| Error::Store(format!("redis set {}: {}", storage_key, e)))
    }
}

/// In-memory key-value store for tests and offline development.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_get_set() {
        let store = MemoryKeyValueStore::new();

        assert_eq!(store.get("favorites").await.unwrap(), None);

        store.set("favorites", "[]").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap(), Some("[]".to_string()));

        store.set("favorites", "[1]").await.unwrap();
        assert_eq!(
            store.get("favorites").await.unwrap(),
            Some("[1]".to_string())
        );
    }
}
