// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, schema creation, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. Do NOT open additional connections for writes.

use std::path::Path;

use helpdesk_core::HelpdeskError;
use tracing::debug;

/// Schema for the exchange log. Safe to run on every start.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS messages (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id   INTEGER NOT NULL,
    username  TEXT,
    message   TEXT,
    response  TEXT,
    timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_messages_user_timestamp
    ON messages (user_id, timestamp);
";

/// Handle to the SQLite database backing the history store.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// Parent directories are created as needed. `":memory:"` opens a
    /// private in-memory database.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, HelpdeskError> {
        let conn = if path == ":memory:" {
            tokio_rusqlite::Connection::open_in_memory()
                .await
                .map_err(HelpdeskError::storage)?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(HelpdeskError::storage)?;
            }
            tokio_rusqlite::Connection::open(path)
                .await
                .map_err(HelpdeskError::storage)?
        };

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying connection, for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), HelpdeskError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint and close the connection. Later calls fail with a storage error.
    pub async fn close(&self) -> Result<(), HelpdeskError> {
        self.checkpoint().await?;
        self.conn.clone().close().await.map_err(HelpdeskError::storage)
    }
}

/// Convert a tokio-rusqlite error into a storage error.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HelpdeskError {
    HelpdeskError::Storage {
        source: Box::new(e),
    }
}
