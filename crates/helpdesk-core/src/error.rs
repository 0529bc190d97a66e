// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Helpdesk support bot.

use thiserror::Error;

/// The primary error type used across all Helpdesk adapter traits and core operations.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// Configuration errors (invalid TOML, missing credentials, bad proxy URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// History store errors (database unreachable, write rejected, corrupt rows).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat platform errors (connection failure, message delivery).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Completion service errors (transport, auth, quota, malformed reply).
    #[error("completion error: {message}")]
    Completion {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HelpdeskError {
    /// Wraps any error as a storage failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(source),
        }
    }

    /// Returns `true` for errors raised by the history store.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    /// Returns `true` for errors raised by the completion service.
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion { .. })
    }
}
