// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the HistoryStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use helpdesk_config::model::StorageConfig;
use helpdesk_core::{
    AdapterType, Exchange, HealthStatus, HelpdeskError, HistoryStore, NewExchange, PluginAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed history store.
///
/// The database is opened by [`HistoryStore::initialize`]; every other
/// operation fails until then.
pub struct SqliteHistory {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteHistory {
    /// Create a new store. No file is touched until `initialize`.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, HelpdeskError> {
        self.db.get().ok_or_else(|| HelpdeskError::Storage {
            source: "history store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteHistory {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HelpdeskError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn initialize(&self) -> Result<(), HelpdeskError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HelpdeskError::Storage {
            source: "history store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "history store initialized");
        Ok(())
    }

    async fn append(&self, exchange: &NewExchange) -> Result<(), HelpdeskError> {
        let id = queries::exchanges::append(self.db()?, exchange).await?;
        debug!(user_id = exchange.user_id, id, "exchange stored");
        Ok(())
    }

    async fn recent(&self, user_id: i64, limit: usize) -> Result<Vec<Exchange>, HelpdeskError> {
        queries::exchanges::recent(self.db()?, user_id, limit).await
    }

    async fn close(&self) -> Result<(), HelpdeskError> {
        self.db()?.close().await?;
        debug!("history store closed");
        Ok(())
    }
}
