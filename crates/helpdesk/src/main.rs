// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpdesk - a Telegram support bot backed by an OpenAI-compatible model.
//!
//! This is the binary entry point.

mod serve;

use clap::Parser;

/// Helpdesk - a Telegram support bot backed by an OpenAI-compatible model.
///
/// Configuration is read from helpdesk.toml files and HELPDESK_* environment
/// variables; a .env file in the working directory is loaded first.
#[derive(Parser, Debug)]
#[command(name = "helpdesk", version, about, long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let _cli = Cli::parse();

    let config = match helpdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            helpdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve::run_serve(config).await {
        eprintln!("helpdesk: {e}");
        std::process::exit(1);
    }
}
