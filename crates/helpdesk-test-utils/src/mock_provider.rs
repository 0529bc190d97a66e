// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion adapter for deterministic testing.
//!
//! `MockProvider` implements `CompletionAdapter` with pre-configured replies
//! and failures, and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use helpdesk_core::HelpdeskError;
use helpdesk_core::traits::{CompletionAdapter, PluginAdapter};
use helpdesk_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};

/// One scripted outcome: reply text or failure message.
type Scripted = Result<String, String>;

/// A mock completion service returning pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" text is returned.
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider whose next call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Err(message.into())]))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a reply.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub async fn add_error(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HelpdeskError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, HelpdeskError> {
        self.requests.lock().await.push(request);

        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()));

        match outcome {
            Ok(content) => Ok(CompletionResponse {
                id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
                content,
                model: "mock-model".to_string(),
                usage: Some(TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                }),
            }),
            Err(message) => Err(HelpdeskError::Completion {
                message,
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            prompt: prompt.to_string(),
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request("hi")).await.unwrap();
        assert_eq!(resp.content, "mock response");
    }

    #[tokio::test]
    async fn scripted_outcomes_in_order() {
        let provider = MockProvider::with_responses(vec!["first".into()]);
        provider.add_error("quota exceeded").await;
        provider.add_response("third").await;

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        let err = provider.complete(request("b")).await.unwrap_err();
        assert!(err.is_completion());
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(provider.complete(request("c")).await.unwrap().content, "third");
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let provider = MockProvider::failing("down");
        let _ = provider.complete(request("prompt text")).await;

        assert_eq!(provider.call_count().await, 1);
        assert_eq!(provider.requests().await[0].prompt, "prompt text");
    }
}
