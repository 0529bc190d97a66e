// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Helpdesk support bot.
//!
//! Provides the error type, the shared data types, and the adapter traits
//! that the channel, completion, and storage crates implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::HelpdeskError;
pub use types::{
    AdapterType, CompletionRequest, CompletionResponse, Exchange, HealthStatus, InboundMessage,
    MessageContent, MessageId, NewExchange, OutboundMessage, TokenUsage,
};

pub use traits::{ChannelAdapter, CompletionAdapter, HistoryStore, PluginAdapter};
