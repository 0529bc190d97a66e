// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! [`OpenAiClient`] handles authentication, proxies, timeouts, and error
//! mapping. Requests are sent once; failures are returned to the caller.

use std::time::Duration;

use helpdesk_core::HelpdeskError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Proxy URLs applied to outgoing requests, by target scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
}

/// HTTP client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client authenticated with `api_key`.
    ///
    /// Fails with a configuration error if the key is not a valid header value
    /// or a proxy URL cannot be parsed.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: String,
        timeout: Duration,
        proxies: &ProxySettings,
    ) -> Result<Self, HelpdeskError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HelpdeskError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout);

        if let Some(ref url) = proxies.http {
            let proxy = reqwest::Proxy::http(url)
                .map_err(|e| HelpdeskError::Config(format!("invalid HTTP proxy `{url}`: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if let Some(ref url) = proxies.https {
            let proxy = reqwest::Proxy::https(url)
                .map_err(|e| HelpdeskError::Config(format!("invalid HTTPS proxy `{url}`: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| HelpdeskError::Completion {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            default_model: model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the model sent with every request.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends one chat-completion request and decodes the response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, HelpdeskError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| HelpdeskError::Completion {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        let body = response.text().await.map_err(|e| HelpdeskError::Completion {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(HelpdeskError::Completion {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| HelpdeskError::Completion {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
