//! Storage adapter for form progress and results.
//!
//! Two JSON records under fixed keys: the in-progress snapshot and the final
//! results. Both slots are single-valued and last-write-wins. Saves report
//! failures; loads treat a missing, unreadable or malformed record as "no
//! data" so a broken store never blocks starting over.

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use reqform_types::error::StorageError;
use reqform_types::form::{NewResults, ProgressSnapshot, ResultsRecord};

use super::kv_store::KvStore;

/// Key holding the in-progress snapshot.
pub const PROGRESS_KEY: &str = "websiteRequirementsForm";

/// Key holding the final results record.
pub const RESULTS_KEY: &str = "websiteRequirementsResults";

/// Form record persistence on top of any `KvStore`.
pub struct FormStorage<S> {
    store: S,
}

impl<S: KvStore> FormStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the progress slot.
    pub async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        self.write(PROGRESS_KEY, snapshot).await?;
        tracing::debug!(step = snapshot.current_step, "form progress saved");
        Ok(())
    }

    pub async fn load_progress(&self) -> Option<ProgressSnapshot> {
        self.read(PROGRESS_KEY).await
    }

    /// Assign an id to the results, overwrite the results slot, return the id.
    ///
    /// Ids are UUIDv7: a millisecond timestamp prefix followed by random bits.
    pub async fn save_results(&self, results: NewResults) -> Result<String, StorageError> {
        let id = Uuid::now_v7().to_string();
        let record = results.with_id(id.clone());
        self.write(RESULTS_KEY, &record).await?;
        tracing::info!(%id, "results saved");
        Ok(id)
    }

    pub async fn load_results(&self) -> Option<ResultsRecord> {
        self.read(RESULTS_KEY).await
    }

    pub async fn clear_progress(&self) -> Result<(), StorageError> {
        self.store.remove(PROGRESS_KEY).await
    }

    pub async fn clear_results(&self) -> Result<(), StorageError> {
        self.store.remove(RESULTS_KEY).await
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(key, &json).await.inspect_err(|e| {
            tracing::error!(key, error = %e, "failed to save form data");
        })
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read form data, starting fresh");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed form data");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use reqform_types::form::{FormData, FormState};

    use crate::prompt::generate_prompts;
    use crate::testing::{FailingStore, MemoryStore};

    fn sample_state() -> FormState {
        let mut data = FormData::new();
        data.set("companyName", "Acme");
        data.set("customerAge", vec!["18-24", "25-34"]);
        FormState::at_step(data, 3).unwrap()
    }

    fn sample_results() -> NewResults {
        let data = sample_state().form_data;
        NewResults {
            prompts: generate_prompts(&data),
            form_data: data,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_progress_roundtrip() {
        let storage = FormStorage::new(MemoryStore::default());
        let snapshot = sample_state().snapshot(Utc::now());

        storage.save_progress(&snapshot).await.unwrap();
        let loaded = storage.load_progress().await.unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.into_state(), sample_state());
    }

    #[tokio::test]
    async fn test_progress_overwrites_single_slot() {
        let storage = FormStorage::new(MemoryStore::default());
        let mut state = sample_state();
        storage.save_progress(&state.snapshot(Utc::now())).await.unwrap();

        state.advance();
        storage.save_progress(&state.snapshot(Utc::now())).await.unwrap();

        assert_eq!(storage.load_progress().await.unwrap().current_step, 4);
        assert_eq!(storage.store().len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let storage = FormStorage::new(MemoryStore::default());
        assert!(storage.load_progress().await.is_none());
        assert!(storage.load_results().await.is_none());
    }

    #[tokio::test]
    async fn test_load_malformed_returns_none() {
        let store = MemoryStore::default();
        store.insert(PROGRESS_KEY, "{not json");
        store.insert(RESULTS_KEY, r#"{"formData":{},"prompts":42}"#);
        let storage = FormStorage::new(store);

        assert!(storage.load_progress().await.is_none());
        assert!(storage.load_results().await.is_none());
    }

    #[tokio::test]
    async fn test_load_read_failure_returns_none() {
        let storage = FormStorage::new(FailingStore);
        assert!(storage.load_progress().await.is_none());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let storage = FormStorage::new(FailingStore);
        let snapshot = sample_state().snapshot(Utc::now());

        let err = storage.save_progress(&snapshot).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(storage.save_results(sample_results()).await.is_err());
    }

    #[tokio::test]
    async fn test_save_results_embeds_generated_id() {
        let storage = FormStorage::new(MemoryStore::default());

        let id = storage.save_results(sample_results()).await.unwrap();
        let record = storage.load_results().await.unwrap();

        assert_eq!(record.id, id);
        assert!(record.prompts.business.contains("Acme"));

        let raw = storage.store().raw(RESULTS_KEY).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["id"], id.as_str());
        assert!(json["timestamp"].is_string());
        assert!(json["prompts"]["master"].is_string());
    }

    #[tokio::test]
    async fn test_results_ids_are_unique() {
        let storage = FormStorage::new(MemoryStore::default());
        let first = storage.save_results(sample_results()).await.unwrap();
        let second = storage.save_results(sample_results()).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(storage.load_results().await.unwrap().id, second);
    }

    #[tokio::test]
    async fn test_clear_slots() {
        let storage = FormStorage::new(MemoryStore::default());
        storage
            .save_progress(&sample_state().snapshot(Utc::now()))
            .await
            .unwrap();
        storage.save_results(sample_results()).await.unwrap();

        storage.clear_progress().await.unwrap();
        assert!(storage.load_progress().await.is_none());
        assert!(storage.load_results().await.is_some());

        storage.clear_results().await.unwrap();
        assert!(storage.load_results().await.is_none());
    }
}
