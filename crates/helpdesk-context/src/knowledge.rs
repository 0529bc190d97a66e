// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business description prepended to every prompt.

use helpdesk_config::model::AgentConfig;
use tracing::{info, warn};

/// Built-in company description used when no knowledge file is configured.
pub const DEFAULT_KNOWLEDGE: &str = include_str!("../assets/knowledge.txt");

/// Domain-knowledge text, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knowledge {
    text: String,
}

impl Knowledge {
    /// Wraps already-loaded text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Loads `config.knowledge_file` if set, otherwise the built-in text.
    ///
    /// An unreadable or empty file logs a warning and falls back to the default.
    pub async fn load(config: &AgentConfig) -> Self {
        if let Some(ref path) = config.knowledge_file {
            match tokio::fs::read_to_string(path).await {
                Ok(content) if !content.trim().is_empty() => {
                    info!(path = path.as_str(), "loaded knowledge from file");
                    return Self::new(content.trim());
                }
                Ok(_) => {
                    warn!(path = path.as_str(), "knowledge file is empty, using default");
                }
                Err(e) => {
                    warn!(
                        path = path.as_str(),
                        error = %e,
                        "failed to read knowledge file, using default"
                    );
                }
            }
        }
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Knowledge {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWLEDGE.trim())
    }
}
