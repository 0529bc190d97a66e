// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-message processing: greeting, history lookup, completion, persistence, reply.

use std::sync::Arc;

use helpdesk_config::model::AgentConfig;
use helpdesk_context::PromptBuilder;
use helpdesk_core::error::HelpdeskError;
use helpdesk_core::traits::{ChannelAdapter, CompletionAdapter, HistoryStore};
use helpdesk_core::types::{
    CompletionRequest, InboundMessage, MessageContent, NewExchange, OutboundMessage,
};
use tracing::{debug, error, info, warn};

/// Processing stages of a single text message, logged as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Received,
    HistoryLoaded,
    PromptBuilt,
    CompletionRequested,
    Answered,
    Apologized,
}

/// What happened to one inbound message.
///
/// Persistence and delivery are reported separately: a stored exchange is
/// not rolled back when its reply cannot be delivered, and a generated reply
/// is still delivered when it cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// `/start` was answered with the greeting.
    Greeted { delivered: bool },
    /// The completion service answered.
    Answered { persisted: bool, delivered: bool },
    /// The completion service failed and the apology was sent instead.
    Apologized { delivered: bool },
}

/// Turns one inbound message into one reply.
pub struct MessageHandler {
    history: Arc<dyn HistoryStore>,
    completion: Arc<dyn CompletionAdapter>,
    channel: Arc<dyn ChannelAdapter>,
    prompt_builder: PromptBuilder,
    history_limit: usize,
    greeting: String,
    apology: String,
}

impl MessageHandler {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        completion: Arc<dyn CompletionAdapter>,
        channel: Arc<dyn ChannelAdapter>,
        prompt_builder: PromptBuilder,
        config: &AgentConfig,
    ) -> Self {
        Self {
            history,
            completion,
            channel,
            prompt_builder,
            history_limit: config.history_limit,
            greeting: config.greeting.clone(),
            apology: config.apology.clone(),
        }
    }

    /// Processes one message start to finish.
    ///
    /// Only a failed history read is returned as an error; in that case no
    /// reply is sent. Completion failures are answered with the apology.
    pub async fn handle(&self, inbound: &InboundMessage) -> Result<HandleOutcome, HelpdeskError> {
        let text = match &inbound.content {
            MessageContent::Start => {
                debug!(user_id = inbound.user_id, "greeting new user");
                let delivered = self.reply(inbound, &self.greeting).await;
                return Ok(HandleOutcome::Greeted { delivered });
            }
            MessageContent::Text(text) => text.as_str(),
        };

        debug!(
            stage = %Stage::Received,
            user_id = inbound.user_id,
            chat_id = inbound.chat_id,
            username = inbound.display_name(),
            "message received"
        );

        let history = self
            .history
            .recent(inbound.user_id, self.history_limit)
            .await
            .inspect_err(|e| {
                error!(user_id = inbound.user_id, error = %e, "failed to load history");
            })?;
        debug!(
            stage = %Stage::HistoryLoaded,
            user_id = inbound.user_id,
            exchanges = history.len(),
            "history loaded"
        );

        let prompt = self.prompt_builder.build(&history, text);
        debug!(stage = %Stage::PromptBuilt, prompt_len = prompt.len(), "prompt built");

        if self.channel.capabilities().supports_typing
            && let Err(e) = self.channel.send_typing(inbound.chat_id).await
        {
            debug!(error = %e, "failed to send typing indicator");
        }

        debug!(stage = %Stage::CompletionRequested, user_id = inbound.user_id, "requesting completion");
        let completion = self
            .completion
            .complete(CompletionRequest { prompt })
            .await
            .and_then(|response| {
                if response.content.trim().is_empty() {
                    Err(HelpdeskError::Completion {
                        message: "completion returned an empty reply".into(),
                        source: None,
                    })
                } else {
                    Ok(response)
                }
            });
        let response = match completion {
            Ok(response) => response,
            Err(e) => {
                error!(user_id = inbound.user_id, error = %e, "completion failed");
                let delivered = self.reply(inbound, &self.apology).await;
                debug!(stage = %Stage::Apologized, user_id = inbound.user_id, delivered, "apology sent");
                return Ok(HandleOutcome::Apologized { delivered });
            }
        };

        if let Some(usage) = &response.usage {
            debug!(
                model = response.model.as_str(),
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "completion received"
            );
        }

        let exchange = NewExchange::new(
            inbound.user_id,
            inbound.username.as_deref(),
            text,
            &response.content,
        );
        let persisted = match self.history.append(&exchange).await {
            Ok(()) => true,
            Err(e) => {
                error!(user_id = inbound.user_id, error = %e, "failed to store exchange");
                false
            }
        };

        let delivered = self.reply(inbound, &response.content).await;
        info!(
            stage = %Stage::Answered,
            user_id = inbound.user_id,
            persisted,
            delivered,
            "message answered"
        );

        Ok(HandleOutcome::Answered {
            persisted,
            delivered,
        })
    }

    async fn reply(&self, inbound: &InboundMessage, content: &str) -> bool {
        match self.channel.send(OutboundMessage::reply(inbound, content)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(chat_id = inbound.chat_id, error = %e, "failed to deliver reply");
                false
            }
        }
    }
}
