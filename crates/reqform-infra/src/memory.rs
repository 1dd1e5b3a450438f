//! In-memory key-value store.
//!
//! Backs ephemeral sessions (`reqform fill --ephemeral`): nothing survives
//! the process. Enforces the same per-value quota as the SQLite store.

use dashmap::DashMap;

use reqform_core::storage::kv_store::KvStore;
use reqform_types::config::StorageConfig;
use reqform_types::error::StorageError;

pub struct InMemoryKvStore {
    entries: DashMap<String, String>,
    max_value_bytes: usize,
}

impl InMemoryKvStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            entries: DashMap::new(),
            max_value_bytes: config.max_value_bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new(&StorageConfig::default())
    }
}

impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.max_value_bytes {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit: self.max_value_bytes,
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemoryKvStore::default();
        assert!(store.is_empty());

        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_quota() {
        let store = InMemoryKvStore::new(&StorageConfig { max_value_bytes: 3 });
        assert!(store.set("k", "abc").await.is_ok());
        assert!(matches!(
            store.set("k", "abcd").await,
            Err(StorageError::QuotaExceeded { size: 4, limit: 3 })
        ));
    }
}
