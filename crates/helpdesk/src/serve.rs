// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process startup: wires storage, knowledge, completion and Telegram into
//! the agent loop and runs it until a shutdown signal arrives.

use std::sync::Arc;

use helpdesk_agent::{AgentLoop, MessageHandler, shutdown};
use helpdesk_config::model::HelpdeskConfig;
use helpdesk_context::{Knowledge, PromptBuilder};
use helpdesk_core::error::HelpdeskError;
use helpdesk_core::traits::{ChannelAdapter, HistoryStore, PluginAdapter};
use helpdesk_core::types::HealthStatus;
use helpdesk_openai::OpenAiProvider;
use helpdesk_storage::SqliteHistory;
use helpdesk_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Runs the bot until SIGINT or SIGTERM.
///
/// Storage initialization, credential resolution and the Telegram connection
/// are fatal when they fail.
pub async fn run_serve(config: HelpdeskConfig) -> Result<(), HelpdeskError> {
    init_tracing(&config.agent.log_level);

    info!(agent_name = config.agent.name.as_str(), "starting helpdesk");

    let history = Arc::new(SqliteHistory::new(config.storage.clone()));
    history.initialize().await.inspect_err(|e| {
        error!(error = %e, path = config.storage.database_path.as_str(), "failed to open history store");
    })?;
    info!(path = config.storage.database_path.as_str(), "history store ready");

    let knowledge = Knowledge::load(&config.agent).await;
    let prompt_builder = PromptBuilder::new(knowledge);

    let completion = Arc::new(OpenAiProvider::new(&config.openai)?);

    let mut telegram = TelegramChannel::new(&config.telegram)?;
    log_health(&telegram).await;
    telegram.connect().await?;
    let channel: Arc<dyn ChannelAdapter> = Arc::new(telegram);
    info!("telegram channel connected");

    let handler = MessageHandler::new(
        history.clone(),
        completion.clone(),
        channel.clone(),
        prompt_builder,
        &config.agent,
    );
    let agent_loop = AgentLoop::new(channel, completion, history, handler);

    let cancel = shutdown::install_signal_handler();
    agent_loop.run(cancel).await?;

    info!("helpdesk shutdown complete");
    Ok(())
}

async fn log_health(adapter: &dyn PluginAdapter) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => info!(adapter = adapter.name(), "adapter healthy"),
        Ok(HealthStatus::Degraded(reason)) => {
            warn!(adapter = adapter.name(), reason = reason.as_str(), "adapter degraded")
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            warn!(adapter = adapter.name(), reason = reason.as_str(), "adapter unhealthy")
        }
        Err(e) => warn!(adapter = adapter.name(), error = %e, "health check failed"),
    }
}

/// Default filter directive when `RUST_LOG` is unset.
fn default_filter(log_level: &str) -> String {
    format!("helpdesk={log_level},warn")
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
