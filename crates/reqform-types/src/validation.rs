//! Declarative validation rules and their outcomes.

use serde::{Deserialize, Serialize};

/// Rule attached to one field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
}

impl ValidationRule {
    pub const fn required() -> Self {
        Self {
            required: true,
            min_length: None,
        }
    }

    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }
}

/// Pass/fail decision for a single field.
///
/// `message` is empty when the field is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStatus {
    pub field: String,
    pub valid: bool,
    pub message: String,
}

impl FieldStatus {
    pub fn valid(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: false,
            message: message.into(),
        }
    }

    /// Id of the inline error slot for this field (`<fieldId>-error`).
    pub fn error_slot_id(&self) -> String {
        format!("{}-error", self.field)
    }
}
