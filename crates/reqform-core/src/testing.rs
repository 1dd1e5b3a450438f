//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use reqform_types::error::StorageError;
use reqform_types::form::{FormData, ResultsRecord};
use reqform_types::validation::FieldStatus;

use crate::form::presenter::{FormPresenter, NavigationView, Notification, SaveStatus};
use crate::schema::StepDefinition;
use crate::storage::kv_store::KvStore;

/// HashMap-backed store whose writes can be switched to fail.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit: 0,
            });
        }
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store that is never available.
pub struct FailingStore;

impl KvStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Everything a presenter was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Step { number: u8, view: NavigationView },
    Field(FieldStatus),
    Save(SaveStatus),
    Notice(Notification),
    Results(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub events: Vec<Rendered>,
}

impl RecordingPresenter {
    pub fn last_step(&self) -> Option<u8> {
        self.events.iter().rev().find_map(|e| match e {
            Rendered::Step { number, .. } => Some(*number),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&Notification> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Rendered::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn save_statuses(&self) -> Vec<&SaveStatus> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Rendered::Save(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl FormPresenter for RecordingPresenter {
    fn render_step(&mut self, step: &StepDefinition, view: &NavigationView, _data: &FormData) {
        self.events.push(Rendered::Step {
            number: step.number,
            view: view.clone(),
        });
    }

    fn apply_field_status(&mut self, status: &FieldStatus) {
        self.events.push(Rendered::Field(status.clone()));
    }

    fn update_save_status(&mut self, status: &SaveStatus) {
        self.events.push(Rendered::Save(status.clone()));
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(Rendered::Notice(notification));
    }

    fn show_results(&mut self, record: &ResultsRecord) {
        self.events.push(Rendered::Results(record.id.clone()));
    }
}
