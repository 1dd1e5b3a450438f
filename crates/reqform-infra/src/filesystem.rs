//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "REQFORM_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `REQFORM_DATA_DIR` environment variable
/// 2. `~/.reqform`
/// 3. `./.reqform`
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn data_dir_from(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".reqform");
    }

    PathBuf::from(".reqform")
}
