// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange log queries.

use helpdesk_core::{Exchange, HelpdeskError, NewExchange};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Insert one exchange. `id` and `timestamp` are assigned by SQLite.
///
/// Returns the new row id.
pub async fn append(db: &Database, exchange: &NewExchange) -> Result<i64, HelpdeskError> {
    let exchange = exchange.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO messages (user_id, username, message, response)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    exchange.user_id,
                    exchange.username,
                    exchange.message,
                    exchange.response,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Up to `limit` exchanges for `user_id`, newest first.
///
/// Rows written within the same millisecond are ordered by insertion.
pub async fn recent(
    db: &Database,
    user_id: i64,
    limit: usize,
) -> Result<Vec<Exchange>, HelpdeskError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<Exchange>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, username, message, response, timestamp
                 FROM messages WHERE user_id = ?1
                 ORDER BY timestamp DESC, id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(Exchange {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    username: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    message: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    response: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    timestamp: row.get(5)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
