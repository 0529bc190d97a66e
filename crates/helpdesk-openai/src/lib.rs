// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI completion adapter for the Helpdesk support bot.
//!
//! Implements [`CompletionAdapter`] over the Chat Completions API: one system
//! message plus the composite prompt as the user turn, first choice returned.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use helpdesk_config::model::OpenAiConfig;
use helpdesk_core::error::HelpdeskError;
use helpdesk_core::traits::{CompletionAdapter, PluginAdapter};
use helpdesk_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use tracing::{debug, info};

use crate::client::{OpenAiClient, ProxySettings};
use crate::types::{ChatMessage, ChatRequest};

/// OpenAI provider implementing [`CompletionAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    system_prompt: String,
}

impl OpenAiProvider {
    /// Creates a provider from the `[openai]` config section.
    ///
    /// Proxies come from `openai.http_proxy` / `openai.https_proxy`, falling
    /// back to `HTTP_PROXY` / `HTTPS_PROXY`.
    pub fn new(config: &OpenAiConfig) -> Result<Self, HelpdeskError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let proxies = ProxySettings {
            http: resolve_setting(&config.http_proxy, "HTTP_PROXY"),
            https: resolve_setting(&config.https_proxy, "HTTPS_PROXY"),
        };

        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
            &proxies,
        )?;

        info!(
            model = config.model.as_str(),
            base_url = config.base_url.as_str(),
            http_proxy = proxies.http.is_some(),
            https_proxy = proxies.https.is_some(),
            "OpenAI provider initialized"
        );

        Ok(Self {
            client,
            system_prompt: config.system_prompt.clone(),
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenAiClient, system_prompt: String) -> Self {
        Self {
            client,
            system_prompt,
        }
    }

    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.client.default_model().to_string(),
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(request.prompt.clone()),
            ],
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        // No API call: health checks must not spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HelpdeskError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, HelpdeskError> {
        if request.prompt.trim().is_empty() {
            return Err(HelpdeskError::Completion {
                message: "prompt must not be empty".into(),
                source: None,
            });
        }

        let response = self.client.chat(&self.to_chat_request(&request)).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| HelpdeskError::Completion {
                message: "response contained no choices".into(),
                source: None,
            })?;

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| HelpdeskError::Completion {
                message: format!(
                    "first choice has no content (finish_reason: {})",
                    choice.finish_reason.as_deref().unwrap_or("unknown")
                ),
                source: None,
            })?;

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Resolves the API key: config value if non-empty, else `OPENAI_API_KEY`.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, HelpdeskError> {
    resolve_setting(config_key, "OPENAI_API_KEY").ok_or_else(|| {
        HelpdeskError::Config(
            "OpenAI API key not found. Set openai.api_key in config or OPENAI_API_KEY environment variable.".into(),
        )
    })
}

/// Config value if set and non-empty, else the named env var if non-empty.
fn resolve_setting(config_value: &Option<String>, env_var: &str) -> Option<String> {
    config_value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .or_else(|| std::env::var(env_var).ok().filter(|v| !v.trim().is_empty()))
}
