// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::HelpdeskConfig;

/// Log levels accepted by `agent.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for `agent.history_limit`.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &HelpdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let limit = config.agent.history_limit;
    if limit == 0 || limit > MAX_HISTORY_LIMIT {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.history_limit must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}"
            ),
        });
    }

    if config.agent.greeting.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.greeting must not be empty".to_string(),
        });
    }

    if config.agent.apology.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.apology must not be empty".to_string(),
        });
    }

    if config.openai.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.model must not be empty".to_string(),
        });
    }

    if !has_http_scheme(&config.openai.base_url) {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.base_url `{}` must start with http:// or https://",
                config.openai.base_url
            ),
        });
    }

    if config.openai.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.timeout_secs must be greater than zero".to_string(),
        });
    }

    for (key, value) in [
        ("openai.http_proxy", &config.openai.http_proxy),
        ("openai.https_proxy", &config.openai.https_proxy),
    ] {
        // Blank values count as unset; the environment fallback applies.
        if let Some(proxy) = value
            && !proxy.trim().is_empty()
            && !has_http_scheme(proxy)
        {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{proxy}` must start with http:// or https://"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_http_scheme(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}
