//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `reqform-core` using sqlx with split read/write
//! pools. Writes larger than the configured quota are rejected before they
//! reach the database.

use chrono::Utc;
use sqlx::Row;

use reqform_core::storage::kv_store::KvStore;
use reqform_types::config::StorageConfig;
use reqform_types::error::StorageError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
pub struct SqliteKvStore {
    pool: DatabasePool,
    max_value_bytes: usize,
}

impl SqliteKvStore {
    pub fn new(pool: DatabasePool, config: &StorageConfig) -> Self {
        Self {
            pool,
            max_value_bytes: config.max_value_bytes,
        }
    }
}

fn query_error(e: sqlx::Error) -> StorageError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::Unavailable(e.to_string())
        }
        other => StorageError::Query(other.to_string()),
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM form_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let value: String = row.try_get("value").map_err(query_error)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.max_value_bytes {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit: self.max_value_bytes,
            });
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO form_storage (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM form_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(())
    }
}
