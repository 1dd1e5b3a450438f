//! Configuration loader for reqform.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`FormConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::Path;

use reqform_types::config::FormConfig;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`FormConfig::default()`].
/// - Unreadable or unparsable file: logs a warning, returns the default.
pub async fn load_config(data_dir: &Path) -> FormConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return FormConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return FormConfig::default();
        }
    };

    match toml::from_str::<FormConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            FormConfig::default()
        }
    }
}
