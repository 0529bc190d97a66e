// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Helpdesk support bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Helpdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HelpdeskConfig {
    /// Bot identity, canned replies, and prompt settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// OpenAI-compatible completion service settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// History store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Bot identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot, used in logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of past exchanges included in each prompt.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Reply to the `/start` command.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Reply sent when the completion service fails.
    #[serde(default = "default_apology")]
    pub apology: String,

    /// Path to a text file with the business description prepended to every prompt.
    /// The built-in description is used when unset.
    #[serde(default)]
    pub knowledge_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            history_limit: default_history_limit(),
            greeting: default_greeting(),
            apology: default_apology(),
            knowledge_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "helpdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_limit() -> usize {
    20
}

fn default_greeting() -> String {
    "Привет! Я бот-помощник нашей компании. \
     Я могу ответить на вопросы о наших товарах, \
     условиях доставки, скидках и оформлении заказа. \
     Как я могу вам помочь?"
        .to_string()
}

fn default_apology() -> String {
    "Извините, произошла ошибка при обработке вашего запроса. \
     Пожалуйста, попробуйте позже."
        .to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Falls back to `TELEGRAM_BOT_TOKEN` when unset.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// OpenAI-compatible completion service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the API; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// System instruction sent ahead of every prompt.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Proxy for plain-HTTP requests. Falls back to `HTTP_PROXY` when unset.
    #[serde(default)]
    pub http_proxy: Option<String>,

    /// Proxy for HTTPS requests. Falls back to `HTTPS_PROXY` when unset.
    #[serde(default)]
    pub https_proxy: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            system_prompt: default_system_prompt(),
            timeout_secs: default_timeout_secs(),
            http_proxy: None,
            https_proxy: None,
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_system_prompt() -> String {
    "Вы - дружелюбный помощник компании, который отвечает на вопросы клиентов.".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// History store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("helpdesk").join("helpdesk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("helpdesk.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
