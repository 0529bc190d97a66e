// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite history store for the Helpdesk support bot.
//!
//! One append-only `messages` table holding every completed exchange, read
//! back per user newest-first. All statements run on tokio-rusqlite's single
//! background thread.

pub mod adapter;
pub mod database;
pub mod queries;

pub use adapter::SqliteHistory;
pub use database::Database;
