// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for chat platform integrations.

use async_trait::async_trait;

use crate::error::HelpdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelCapabilities, InboundMessage, MessageId, OutboundMessage};

/// Adapter for bidirectional chat platform integrations.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the chat platform and starts receiving events.
    async fn connect(&mut self) -> Result<(), HelpdeskError>;

    /// Sends a message through the channel.
    ///
    /// Returns the id of the last platform message sent when the content had
    /// to be split.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, HelpdeskError>;

    /// Receives the next inbound message from the channel.
    async fn receive(&self) -> Result<InboundMessage, HelpdeskError>;

    /// Shows a typing indicator in the given chat. No-op by default.
    async fn send_typing(&self, _chat_id: i64) -> Result<(), HelpdeskError> {
        Ok(())
    }
}
