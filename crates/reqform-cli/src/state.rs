//! Application state shared by all commands.
//!
//! Resolves the data directory, loads `config.toml`, and opens the SQLite
//! store that backs form progress and results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use reqform_core::storage::adapter::FormStorage;
use reqform_infra::config::load_config;
use reqform_infra::filesystem::resolve_data_dir;
use reqform_infra::sqlite::kv::SqliteKvStore;
use reqform_infra::sqlite::pool::DatabasePool;
use reqform_types::config::FormConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: FormConfig,
    pub store: Arc<SqliteKvStore>,
}

impl AppState {
    /// Initialize the application state: data dir, config, database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        Self::init_in(data_dir).await
    }

    pub async fn init_in(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;
        let pool = DatabasePool::open_in(&data_dir)
            .await
            .context("failed to open form database")?;
        let store = Arc::new(SqliteKvStore::new(pool, &config.storage));

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");

        Ok(Self {
            data_dir,
            config,
            store,
        })
    }

    /// Form storage over the persistent store.
    pub fn form_storage(&self) -> FormStorage<Arc<SqliteKvStore>> {
        FormStorage::new(Arc::clone(&self.store))
    }
}
