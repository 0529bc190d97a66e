// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./helpdesk.toml` > `~/.config/helpdesk/helpdesk.toml` > `/etc/helpdesk/helpdesk.toml`
//! with environment variable overrides via `HELPDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HelpdeskConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/helpdesk/helpdesk.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "helpdesk.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/helpdesk/helpdesk.toml` (system-wide)
/// 3. `~/.config/helpdesk/helpdesk.toml` (user XDG config)
/// 4. `./helpdesk.toml` (local directory)
/// 5. `HELPDESK_*` environment variables
pub fn load_config() -> Result<HelpdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HelpdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HelpdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HelpdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HelpdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HelpdeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Path of the per-user configuration file, if a config dir exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("helpdesk").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `HELPDESK_TELEGRAM_BOT_TOKEN` must map to `telegram.bot_token`,
/// not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("HELPDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_vars_map_to_nested_keys() {
        Jail::expect_with(|jail| {
            jail.set_env("HELPDESK_TELEGRAM_BOT_TOKEN", "123:abc");
            jail.set_env("HELPDESK_OPENAI_HTTPS_PROXY", "http://proxy.local:3128");
            jail.set_env("HELPDESK_AGENT_HISTORY_LIMIT", "5");

            let config = load_config()?;
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
            assert_eq!(
                config.openai.https_proxy.as_deref(),
                Some("http://proxy.local:3128")
            );
            assert_eq!(config.agent.history_limit, 5);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults_and_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[openai]
model = "gpt-4o-mini"

[storage]
database_path = "from-file.db"
"#,
            )?;
            jail.set_env("HELPDESK_STORAGE_DATABASE_PATH", "from-env.db");

            let config = load_config()?;
            assert_eq!(config.openai.model, "gpt-4o-mini");
            assert_eq!(config.storage.database_path, "from-env.db");
            Ok(())
        });
    }

    #[test]
    fn explicit_path_is_loaded() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[agent]\nname = \"custom\"\n")?;
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.agent.name, "custom");
            Ok(())
        });
    }
}
