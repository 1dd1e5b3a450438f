//! Form data, step state, and the two persisted records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::prompt::GeneratedPrompts;

/// Number of steps in the requirements form.
pub const TOTAL_STEPS: u8 = 6;

/// A single answer: free text / single choice, or an ordered multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// The string value, if this is a single-valued field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Multi(_) => None,
        }
    }

    /// The selected entries, if this is a multi-select field.
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::Multi(items) => Some(items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Multi(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        Self::Multi(value.into_iter().map(str::to_string).collect())
    }
}

/// The evolving record of user answers, keyed by field name.
///
/// Unknown keys are kept as-is. Backed by a `BTreeMap` so the serialized
/// form is stable for identical contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, FieldValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value of a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Shorthand for the string value of a single-valued field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// In-memory state of one form session.
///
/// `current_step` always stays within `1..=TOTAL_STEPS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub form_data: FormData,
    current_step: u8,
}

impl FormState {
    /// Fresh state on step 1 with no answers.
    pub fn new() -> Self {
        Self {
            form_data: FormData::new(),
            current_step: 1,
        }
    }

    /// Build a state positioned on `step`.
    pub fn at_step(form_data: FormData, step: u8) -> Result<Self, FormError> {
        if !(1..=TOTAL_STEPS).contains(&step) {
            return Err(FormError::StepOutOfRange(step));
        }
        Ok(Self {
            form_data,
            current_step: step,
        })
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == TOTAL_STEPS
    }

    /// Move one step forward. Returns `false` (and stays) on the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.current_step += 1;
        true
    }

    /// Move one step back. Returns `false` (and stays) on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.is_first_step() {
            return false;
        }
        self.current_step -= 1;
        true
    }

    /// Completion ratio as a percentage (step 6 of 6 is 100).
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.current_step) / f64::from(TOTAL_STEPS) * 100.0
    }

    /// Point-in-time copy for persistence.
    pub fn snapshot(&self, timestamp: DateTime<Utc>) -> ProgressSnapshot {
        ProgressSnapshot {
            form_data: self.form_data.clone(),
            current_step: self.current_step,
            timestamp: timestamp.timestamp_millis(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// The single persisted in-progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub form_data: FormData,
    pub current_step: u8,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl ProgressSnapshot {
    /// Rebuild a form state from the snapshot, clamping the step into range.
    pub fn into_state(self) -> FormState {
        let step = self.current_step.clamp(1, TOTAL_STEPS);
        FormState {
            form_data: self.form_data,
            current_step: step,
        }
    }
}

/// Results produced at completion, before the storage layer assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResults {
    pub form_data: FormData,
    pub prompts: GeneratedPrompts,
    pub timestamp: DateTime<Utc>,
}

impl NewResults {
    pub fn with_id(self, id: String) -> ResultsRecord {
        ResultsRecord {
            form_data: self.form_data,
            prompts: self.prompts,
            timestamp: self.timestamp,
            id,
        }
    }
}

/// The persisted final record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRecord {
    pub form_data: FormData,
    pub prompts: GeneratedPrompts,
    /// Serialized as an RFC 3339 / ISO-8601 string.
    pub timestamp: DateTime<Utc>,
    pub id: String,
}
