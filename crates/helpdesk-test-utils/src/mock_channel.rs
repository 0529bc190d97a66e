// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound messages
//! and captured outbound messages for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use helpdesk_core::HelpdeskError;
use helpdesk_core::traits::{ChannelAdapter, PluginAdapter};
use helpdesk_core::types::{
    AdapterType, ChannelCapabilities, HealthStatus, InboundMessage, MessageContent, MessageId,
    OutboundMessage,
};

/// A mock messaging channel for testing.
///
/// - **inbound**: messages injected via `inject_message()` are returned by `receive()`
/// - **sent**: messages passed to `send()` are captured and retrievable via `sent_messages()`
/// - **typing**: chat ids passed to `send_typing()`
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundMessage>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    typing: Arc<Mutex<Vec<i64>>>,
    notify: Arc<Notify>,
    fail_sends: AtomicBool,
}

impl MockChannel {
    /// Create a new mock channel with empty queues.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            typing: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    /// Inject an inbound message into the receive queue.
    pub async fn inject_message(&self, msg: InboundMessage) {
        self.inbound.lock().await.push_back(msg);
        self.notify.notify_one();
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Chat ids for which a typing indicator was requested.
    pub async fn typing_chats(&self) -> Vec<i64> {
        self.typing.lock().await.clone()
    }

    /// Make every subsequent `send()` and `send_typing()` fail.
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    fn delivery_error(&self) -> Option<HelpdeskError> {
        self.fail_sends
            .load(Ordering::SeqCst)
            .then(|| HelpdeskError::Channel {
                message: "mock delivery failure".into(),
                source: None,
            })
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an inbound text message from `user_id` in their private chat.
pub fn text_message(user_id: i64, username: Option<&str>, text: &str) -> InboundMessage {
    inbound(user_id, username, MessageContent::Text(text.to_string()))
}

/// Build an inbound `/start` command from `user_id`.
pub fn start_command(user_id: i64, username: Option<&str>) -> InboundMessage {
    inbound(user_id, username, MessageContent::Start)
}

fn inbound(user_id: i64, username: Option<&str>, content: MessageContent) -> InboundMessage {
    InboundMessage {
        id: format!("test-{}", uuid::Uuid::new_v4()),
        chat_id: user_id,
        user_id,
        username: username.map(str::to_string),
        content,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HelpdeskError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_typing: true,
            max_message_length: None,
        }
    }

    async fn connect(&mut self) -> Result<(), HelpdeskError> {
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, HelpdeskError> {
        if let Some(err) = self.delivery_error() {
            return Err(err);
        }
        self.sent.lock().await.push(msg);
        Ok(MessageId(format!("mock-msg-{}", uuid::Uuid::new_v4())))
    }

    async fn receive(&self) -> Result<InboundMessage, HelpdeskError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(msg) = queue.pop_front() {
                    return Ok(msg);
                }
            }
            self.notify.notified().await;
        }
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), HelpdeskError> {
        if let Some(err) = self.delivery_error() {
            return Err(err);
        }
        self.typing.lock().await.push(chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn receive_returns_injected_messages() {
        let channel = MockChannel::new();
        channel.inject_message(text_message(7, Some("ann"), "hello")).await;

        let received = channel.receive().await.unwrap();
        assert_eq!(received.user_id, 7);
        assert_eq!(received.content, MessageContent::Text("hello".into()));
    }

    #[tokio::test]
    async fn receive_waits_for_injection() {
        let channel = Arc::new(MockChannel::new());
        let receiver = {
            let channel = channel.clone();
            tokio::spawn(async move { channel.receive().await })
        };

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        channel.inject_message(start_command(3, None)).await;

        let received = receiver.await.unwrap().unwrap();
        assert_eq!(received.content, MessageContent::Start);
    }

    #[tokio::test]
    async fn send_captures_outbound_messages() {
        let channel = MockChannel::new();
        let msg_id = channel
            .send(OutboundMessage {
                chat_id: 7,
                content: "response text".into(),
            })
            .await
            .unwrap();
        assert!(msg_id.0.starts_with("mock-msg-"));

        let sent = channel.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].content, "response text");
    }

    #[tokio::test]
    async fn failing_sends_are_not_captured() {
        let channel = MockChannel::new();
        channel.set_fail_sends(true);

        let result = channel
            .send(OutboundMessage {
                chat_id: 7,
                content: "lost".into(),
            })
            .await;
        assert!(result.is_err());
        assert!(channel.send_typing(7).await.is_err());
        assert_eq!(channel.sent_count().await, 0);
    }
}
