// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Helpdesk support bot.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide long
//! polling. Inbound updates are classified in [`handler`] and queued for the
//! agent loop; replies are sent as plain text, split when too long.

pub mod handler;
pub mod split;

use std::sync::OnceLock;

use async_trait::async_trait;
use helpdesk_config::model::TelegramConfig;
use helpdesk_core::error::HelpdeskError;
use helpdesk_core::traits::{ChannelAdapter, PluginAdapter};
use helpdesk_core::types::{
    AdapterType, ChannelCapabilities, HealthStatus, InboundMessage, MessageId, OutboundMessage,
};
use teloxide::dispatching::ShutdownToken;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Environment variable consulted when `telegram.bot_token` is unset.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Capacity of the queue between the dispatcher and the agent loop.
const INBOUND_QUEUE_CAPACITY: usize = 100;

/// Telegram channel adapter implementing [`ChannelAdapter`].
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
    shutdown_token: OnceLock<ShutdownToken>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// The token comes from `config.bot_token`, falling back to
    /// `TELEGRAM_BOT_TOKEN`.
    pub fn new(config: &TelegramConfig) -> Result<Self, HelpdeskError> {
        let token = resolve_bot_token(
            config.bot_token.as_deref(),
            std::env::var(TOKEN_ENV_VAR).ok(),
        )?;

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
            shutdown_token: OnceLock::new(),
        })
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        match self.bot.get_me().await {
            Ok(me) => {
                debug!(username = ?me.username, "Telegram bot reachable");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), HelpdeskError> {
        debug!("Telegram channel shutting down");
        if let Some(token) = self.shutdown_token.get() {
            match token.shutdown() {
                Ok(done) => done.await,
                Err(_) => debug!("dispatcher was not running"),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_typing: true,
            max_message_length: Some(split::MAX_CHUNK_BYTES),
        }
    }

    async fn connect(&mut self) -> Result<(), HelpdeskError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handler = Update::filter_message().endpoint(move |msg: Message| {
            let tx = tx.clone();
            async move {
                let Some(content) = handler::classify(&msg) else {
                    debug!(msg_id = msg.id.0, "ignoring unsupported message");
                    return respond(());
                };

                let Some(inbound) = handler::to_inbound_message(&msg, content) else {
                    debug!(chat_id = msg.chat.id.0, "ignoring message without sender");
                    return respond(());
                };

                if tx.send(inbound).await.is_err() {
                    warn!("inbound channel closed, dropping message");
                }
                respond(())
            }
        });

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|_| async {}) // Silently ignore non-message updates
            .build();
        // Set once; a second connect returns early above.
        let _ = self.shutdown_token.set(dispatcher.shutdown_token());

        let handle = tokio::spawn(async move {
            dispatcher.dispatch().await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, HelpdeskError> {
        let max_len = self
            .capabilities()
            .max_message_length
            .unwrap_or(split::MAX_CHUNK_BYTES);
        let chunks = split::split_message(&msg.content, max_len);
        if chunks.is_empty() {
            return Err(HelpdeskError::Channel {
                message: "refusing to send an empty message".into(),
                source: None,
            });
        }

        let chat_id = ChatId(msg.chat_id);
        let mut last_id = None;
        for chunk in &chunks {
            let sent = self
                .bot
                .send_message(chat_id, *chunk)
                .await
                .map_err(|e| HelpdeskError::Channel {
                    message: format!("failed to send message: {e}"),
                    source: Some(Box::new(e)),
                })?;
            last_id = Some(sent.id.0);
        }

        if chunks.len() > 1 {
            debug!(chat_id = msg.chat_id, parts = chunks.len(), "long reply split");
        }

        Ok(MessageId(last_id.unwrap_or_default().to_string()))
    }

    async fn receive(&self) -> Result<InboundMessage, HelpdeskError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| HelpdeskError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), HelpdeskError> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map_err(|e| HelpdeskError::Channel {
                message: format!("failed to send typing indicator: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(())
    }
}

/// Picks the configured token, else the environment one.
fn resolve_bot_token(
    config_token: Option<&str>,
    env_token: Option<String>,
) -> Result<String, HelpdeskError> {
    config_token
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .or(env_token.filter(|t| !t.trim().is_empty()))
        .ok_or_else(|| {
            HelpdeskError::Config(format!(
                "Telegram bot token not found. Set telegram.bot_token in config or {TOKEN_ENV_VAR} environment variable."
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_channel() -> TelegramChannel {
        TelegramChannel::new(&TelegramConfig {
            bot_token: Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".into()),
        })
        .unwrap()
    }

    #[test]
    fn token_from_config_wins() {
        let token = resolve_bot_token(Some("cfg:token"), Some("env:token".into())).unwrap();
        assert_eq!(token, "cfg:token");
    }

    #[test]
    fn token_falls_back_to_env() {
        let token = resolve_bot_token(None, Some("env:token".into())).unwrap();
        assert_eq!(token, "env:token");

        let token = resolve_bot_token(Some(""), Some("env:token".into())).unwrap();
        assert_eq!(token, "env:token");
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = resolve_bot_token(None, None).unwrap_err();
        assert!(matches!(err, HelpdeskError::Config(ref m) if m.contains(TOKEN_ENV_VAR)));
        assert!(resolve_bot_token(Some(" "), Some(String::new())).is_err());
    }

    #[test]
    fn capabilities_are_correct() {
        let caps = test_channel().capabilities();
        assert!(caps.supports_typing);
        assert_eq!(caps.max_message_length, Some(split::MAX_CHUNK_BYTES));
    }

    #[test]
    fn plugin_adapter_metadata() {
        let channel = test_channel();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }

    #[tokio::test]
    async fn empty_reply_is_rejected_before_network() {
        let err = test_channel()
            .send(OutboundMessage {
                chat_id: 42,
                content: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::Channel { .. }));
    }

    #[tokio::test]
    async fn shutdown_without_connect_is_ok() {
        test_channel().shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn queued_messages_are_received_in_order() {
        let channel = test_channel();
        for (id, text) in [("1", "first"), ("2", "second")] {
            channel
                .inbound_tx
                .send(InboundMessage {
                    id: id.into(),
                    chat_id: 42,
                    user_id: 42,
                    username: None,
                    content: helpdesk_core::MessageContent::Text(text.into()),
                    timestamp: "2026-01-01T00:00:00+00:00".into(),
                })
                .await
                .unwrap();
        }

        assert_eq!(channel.receive().await.unwrap().id, "1");
        assert_eq!(channel.receive().await.unwrap().id, "2");
    }
}
