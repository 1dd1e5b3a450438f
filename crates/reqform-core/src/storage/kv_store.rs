//! Key-value store trait.
//!
//! A flat, string-keyed store of string values, the same shape as a browser's
//! origin-scoped storage. Implementations live in reqform-infra.

use std::future::Future;
use std::sync::Arc;

use reqform_types::error::StorageError;

/// Durable string key-value storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Set a value for a key (upsert). May reject the write, e.g. over quota.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete a key. No-op if the key does not exist.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: KvStore> KvStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).remove(key)
    }
}
