// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Helpdesk pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Display name stored when the platform does not report one.
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// Number of past exchanges loaded into each prompt unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Unique identifier for a sent message, as reported by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Completion,
    Storage,
}

// --- History types ---

/// One persisted (message, response) pair for a user.
///
/// Records are immutable once written. `timestamp` is assigned by the store
/// on insert (ISO 8601, UTC, millisecond precision).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub message: String,
    pub response: String,
    pub timestamp: String,
}

/// Insert payload for a new [`Exchange`]; id and timestamp are server-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchange {
    pub user_id: i64,
    pub username: String,
    pub message: String,
    pub response: String,
}

impl NewExchange {
    /// Builds an insert payload, substituting [`UNKNOWN_USERNAME`] for a missing name.
    pub fn new(
        user_id: i64,
        username: Option<&str>,
        message: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            username: username.unwrap_or(UNKNOWN_USERNAME).to_string(),
            message: message.into(),
            response: response.into(),
        }
    }
}

// --- Channel types ---

/// What an inbound platform event asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// The `/start` command.
    Start,
    /// Free-form text routed through the completion pipeline.
    Text(String),
}

/// An inbound message received from a channel adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Platform message id.
    pub id: String,
    /// Conversation the reply is addressed to.
    pub chat_id: i64,
    /// Platform-scoped sender identity.
    pub user_id: i64,
    /// Sender display name, if the platform reports one.
    pub username: Option<String>,
    pub content: MessageContent,
    /// RFC 3339 time the platform received the message.
    pub timestamp: String,
}

impl InboundMessage {
    /// Returns the sender name or [`UNKNOWN_USERNAME`].
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(UNKNOWN_USERNAME)
    }
}

/// An outbound message to be sent via a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub content: String,
}

impl OutboundMessage {
    /// Creates a reply addressed to the conversation of `inbound`.
    pub fn reply(inbound: &InboundMessage, content: impl Into<String>) -> Self {
        Self {
            chat_id: inbound.chat_id,
            content: content.into(),
        }
    }
}

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_typing: bool,
    pub max_message_length: Option<usize>,
}

// --- Completion types ---

/// A request to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Composite prompt sent as the user turn.
    pub prompt: String,
}

/// Token accounting reported by the completion service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A single generated reply from the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}
