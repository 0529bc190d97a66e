// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent loop and message handling for the Helpdesk support bot.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives messages from a channel adapter
//! - Hands them one at a time to the [`MessageHandler`]
//! - Closes the history store and shuts the other adapters down on exit

pub mod handler;
pub mod shutdown;

use std::sync::Arc;

use helpdesk_core::error::HelpdeskError;
use helpdesk_core::traits::{ChannelAdapter, CompletionAdapter, HistoryStore, PluginAdapter};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub use handler::{HandleOutcome, MessageHandler, Stage};

/// Receives inbound messages and processes them sequentially until cancelled.
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter>,
    completion: Arc<dyn CompletionAdapter>,
    history: Arc<dyn HistoryStore>,
    handler: MessageHandler,
}

impl AgentLoop {
    /// Wires the adapters into a loop. The channel must already be connected.
    pub fn new(
        channel: Arc<dyn ChannelAdapter>,
        completion: Arc<dyn CompletionAdapter>,
        history: Arc<dyn HistoryStore>,
        handler: MessageHandler,
    ) -> Self {
        Self {
            channel,
            completion,
            history,
            handler,
        }
    }

    /// Runs until `cancel` fires or the channel closes.
    ///
    /// Handler errors are logged and the loop moves on to the next message.
    /// On exit the history store is closed and the channel and completion
    /// adapters are shut down.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), HelpdeskError> {
        info!("agent loop running");

        loop {
            tokio::select! {
                msg = self.channel.receive() => {
                    match msg {
                        Ok(inbound) => match self.handler.handle(&inbound).await {
                            Ok(outcome) => debug!(user_id = inbound.user_id, ?outcome, "message handled"),
                            Err(e) => error!(user_id = inbound.user_id, error = %e, "failed to handle inbound message"),
                        },
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            if e.to_string().contains("closed") {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        self.history.close().await?;

        if let Err(e) = self.channel.shutdown().await {
            warn!(adapter = self.channel.name(), error = %e, "adapter shutdown failed");
        }
        if let Err(e) = self.completion.shutdown().await {
            warn!(adapter = self.completion.name(), error = %e, "adapter shutdown failed");
        }

        info!("agent loop stopped");
        Ok(())
    }
}
