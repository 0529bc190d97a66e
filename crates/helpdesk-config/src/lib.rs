// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Helpdesk support bot.
//!
//! TOML configuration with strict key checking (`deny_unknown_fields`), an XDG
//! file hierarchy, `HELPDESK_` environment overrides, and miette diagnostics
//! with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use helpdesk_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("History limit: {}", config.agent.history_limit);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::HelpdeskConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors are converted into diagnostics pointing at the offending
/// line of whichever `helpdesk.toml` produced them.
pub fn load_and_validate() -> Result<HelpdeskConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<HelpdeskConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read every config file that exists so error spans can be rendered.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| PathBuf::from(loader::LOCAL_CONFIG_FILE));

    [
        Some(local),
        loader::user_config_path(),
        Some(Path::new(loader::SYSTEM_CONFIG_PATH).to_path_buf()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        tracing::debug!(path = %path.display(), "read config source for diagnostics");
        Some((path.display().to_string(), content))
    })
    .collect()
}
