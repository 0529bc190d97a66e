// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Helpdesk configuration system.

use helpdesk_config::diagnostic::ConfigError;
use helpdesk_config::model::HelpdeskConfig;
use helpdesk_config::{load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_helpdesk_config() {
    let toml = r#"
[agent]
name = "support"
log_level = "debug"
history_limit = 10
greeting = "Hello!"
apology = "Sorry, try later."
knowledge_file = "/srv/helpdesk/knowledge.txt"

[telegram]
bot_token = "123:ABC"

[openai]
api_key = "sk-test"
model = "gpt-4o-mini"
base_url = "http://localhost:8080/v1"
system_prompt = "Be nice."
timeout_secs = 30
http_proxy = "http://proxy.local:3128"
https_proxy = "http://proxy.local:3129"

[storage]
database_path = "/tmp/helpdesk-test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "support");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.history_limit, 10);
    assert_eq!(config.agent.greeting, "Hello!");
    assert_eq!(config.agent.apology, "Sorry, try later.");
    assert_eq!(
        config.agent.knowledge_file.as_deref(),
        Some("/srv/helpdesk/knowledge.txt")
    );
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.base_url, "http://localhost:8080/v1");
    assert_eq!(config.openai.system_prompt, "Be nice.");
    assert_eq!(config.openai.timeout_secs, 30);
    assert_eq!(
        config.openai.http_proxy.as_deref(),
        Some("http://proxy.local:3128")
    );
    assert_eq!(
        config.openai.https_proxy.as_deref(),
        Some("http://proxy.local:3129")
    );
    assert_eq!(config.storage.database_path, "/tmp/helpdesk-test.db");
    assert!(!config.storage.wal_mode);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    let defaults = HelpdeskConfig::default();

    assert_eq!(config.agent.history_limit, 20);
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.agent.greeting, defaults.agent.greeting);
    assert!(config.agent.knowledge_file.is_none());
    assert!(config.telegram.bot_token.is_none());
    assert!(config.openai.api_key.is_none());
    assert_eq!(config.openai.model, "gpt-3.5-turbo");
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.timeout_secs, 120);
    assert!(config.storage.wal_mode);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[openai]\nmodel = \"gpt-4o\"\n").unwrap();
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.timeout_secs, 120);
}

#[test]
fn unknown_key_is_rejected_with_suggestion() {
    let toml = "[telegram]\nbot_tken = \"123:ABC\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();

    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should report an unknown key");

    assert_eq!(unknown.0, "bot_tken");
    assert_eq!(unknown.1.as_deref(), Some("bot_token"));
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[anthropic]\napi_key = \"x\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "anthropic"))
    );
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[agent]\nhistory_limit = \"many\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }))
    );
}

#[test]
fn semantic_violation_is_reported_after_parse() {
    let errors = load_and_validate_str("[agent]\nhistory_limit = 0\n").unwrap_err();
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("history_limit"))
    ));
}

#[test]
fn valid_toml_passes_validation() {
    let config = load_and_validate_str("[agent]\nhistory_limit = 5\n").unwrap();
    assert_eq!(config.agent.history_limit, 5);
}
