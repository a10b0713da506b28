//! Builder for creating and configuring Scheduler instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;

use super::Scheduler;
use crate::error::{Result, SchedulerError};
use crate::store::{MemoryStore, PlanStore, SqliteStore};

/// Builder for creating and configuring Scheduler instances.
#[derive(Default)]
pub struct SchedulerBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn PlanStore>>,
}

impl SchedulerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or
    /// `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses the given store instead of opening a SQLite database.
    pub fn with_store(mut self, store: Arc<dyn PlanStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses a volatile in-memory store. Plans are lost when the
    /// scheduler is dropped.
    pub fn in_memory(self) -> Self {
        self.with_store(Arc::new(MemoryStore::new()))
    }

    /// Builds the configured scheduler instance.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::FileSystem` if the database directory
    /// cannot be created, `SchedulerError::Database` if opening or
    /// migrating the database fails.
    pub async fn build(self) -> Result<Scheduler> {
        if let Some(store) = self.store {
            return Ok(Scheduler::new(store));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SchedulerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = task::spawn_blocking(move || SqliteStore::new(&db_path))
            .await
            .map_err(|e| SchedulerError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        Ok(Scheduler::new(Arc::new(store)))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| SchedulerError::XdgDirectory(e.to_string()))
    }
}
