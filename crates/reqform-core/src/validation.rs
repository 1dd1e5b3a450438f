//! Field validation.
//!
//! The validator only decides; it never touches the presentation layer.
//! Callers hand the resulting `FieldStatus` to `FormPresenter::apply_field_status`.

use std::collections::BTreeMap;

use reqform_types::form::{FieldValue, FormData};
use reqform_types::validation::{FieldStatus, ValidationRule};

use crate::schema;

/// The rule table the form ships with.
pub fn default_rules() -> Vec<(&'static str, ValidationRule)> {
    vec![
        ("companyName", ValidationRule::required().with_min_length(2)),
        ("industry", ValidationRule::required()),
        ("businessSize", ValidationRule::required()),
        ("primaryGoal", ValidationRule::required()),
    ]
}

/// Declarative per-field validator.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: BTreeMap<String, ValidationRule>,
    labels: BTreeMap<String, String>,
}

impl Validator {
    /// Build a validator with the given rules and no labels.
    pub fn new<K: Into<String>>(rules: impl IntoIterator<Item = (K, ValidationRule)>) -> Self {
        Self {
            rules: rules.into_iter().map(|(k, r)| (k.into(), r)).collect(),
            labels: BTreeMap::new(),
        }
    }

    /// Add human-readable labels used in error messages.
    pub fn with_labels<K: Into<String>, V: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.labels
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn rule(&self, field: &str) -> Option<&ValidationRule> {
        self.rules.get(field)
    }

    /// Label for a field, falling back to the raw field name.
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map(String::as_str).unwrap_or(field)
    }

    /// Validate one field. A missing value counts as the empty string.
    pub fn validate(&self, field: &str, value: Option<&FieldValue>) -> FieldStatus {
        let Some(rule) = self.rules.get(field) else {
            return FieldStatus::valid(field);
        };

        match value {
            Some(FieldValue::Multi(items)) => {
                let selected = items.iter().any(|item| !item.trim().is_empty());
                if rule.required && !selected {
                    return FieldStatus::invalid(field, self.required_message(field));
                }
            }
            Some(FieldValue::Text(text)) => return self.validate_text(field, rule, text),
            None => return self.validate_text(field, rule, ""),
        }

        FieldStatus::valid(field)
    }

    /// Validate a set of fields against the current form data.
    pub fn validate_fields<'a>(
        &self,
        fields: impl IntoIterator<Item = &'a str>,
        data: &FormData,
    ) -> Vec<FieldStatus> {
        fields
            .into_iter()
            .map(|name| self.validate(name, data.get(name)))
            .collect()
    }

    /// Rules are checked in order and the last failing one names the error,
    /// so an empty field with a minimum length reports the length message.
    fn validate_text(&self, field: &str, rule: &ValidationRule, raw: &str) -> FieldStatus {
        let value = raw.trim();
        let mut message = None;

        if rule.required && value.is_empty() {
            message = Some(self.required_message(field));
        }

        if let Some(min) = rule.min_length {
            if value.chars().count() < min {
                message = Some(format!(
                    "{} must be at least {min} characters",
                    self.label(field)
                ));
            }
        }

        match message {
            Some(message) => FieldStatus::invalid(field, message),
            None => FieldStatus::valid(field),
        }
    }

    fn required_message(&self, field: &str) -> String {
        format!("{} is required", self.label(field))
    }
}

impl Default for Validator {
    /// The shipped rule table, labelled from the form schema.
    fn default() -> Self {
        let labels = schema::STEPS
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| (f.name, f.label));
        Self::new(default_rules()).with_labels(labels)
    }
}
