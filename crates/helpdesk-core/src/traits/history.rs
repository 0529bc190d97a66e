// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History store trait: the append-only log of past exchanges per user.

use async_trait::async_trait;

use crate::error::HelpdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Exchange, NewExchange};

/// Durable, append-only record of exchanges, queryable by user.
///
/// Records are never updated or deleted through this trait.
#[async_trait]
pub trait HistoryStore: PluginAdapter {
    /// Ensures the backing schema exists. Idempotent across process starts.
    async fn initialize(&self) -> Result<(), HelpdeskError>;

    /// Inserts one exchange with a server-assigned timestamp.
    async fn append(&self, exchange: &NewExchange) -> Result<(), HelpdeskError>;

    /// Returns up to `limit` exchanges for `user_id`, newest first.
    ///
    /// A user without history yields an empty vector.
    async fn recent(&self, user_id: i64, limit: usize) -> Result<Vec<Exchange>, HelpdeskError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), HelpdeskError>;
}
