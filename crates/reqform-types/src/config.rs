//! Configuration types for reqform.
//!
//! `FormConfig` represents the `config.toml` in the data directory. Every
//! field has a default so an empty or partial file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub autosave: AutosaveConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Timers that drive background persistence while the form is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Quiet period after the last edit before saving.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Safety-net save interval.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_debounce_ms() -> u64 {
    1_000
}

fn default_interval_secs() -> u64 {
    30
}

impl AutosaveConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            interval_secs: default_interval_secs(),
        }
    }
}

/// Limits of the durable key-value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Largest value (in bytes) a single key may hold.
    #[serde(default = "default_max_value_bytes")]
    pub max_value_bytes: usize,
}

fn default_max_value_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_value_bytes: default_max_value_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_config_default_values() {
        let config = FormConfig::default();
        assert_eq!(config.autosave.debounce(), Duration::from_secs(1));
        assert_eq!(config.autosave.interval(), Duration::from_secs(30));
        assert_eq!(config.storage.max_value_bytes, 5_242_880);
    }

    #[test]
    fn test_form_config_deserialize_empty() {
        let config: FormConfig = toml::from_str("").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_form_config_deserialize_partial() {
        let config: FormConfig = toml::from_str(
            r#"
[autosave]
debounce_ms = 250
"#,
        )
        .unwrap();
        assert_eq!(config.autosave.debounce_ms, 250);
        assert_eq!(config.autosave.interval_secs, 30);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_zero_interval_is_floored() {
        let config = AutosaveConfig {
            debounce_ms: 0,
            interval_secs: 0,
        };
        assert_eq!(config.interval(), Duration::from_secs(1));
    }
}
