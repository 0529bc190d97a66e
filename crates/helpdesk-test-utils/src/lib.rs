// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Helpdesk tests.
//!
//! Mock adapters for fast, deterministic tests without Telegram, OpenAI or
//! a database.
//!
//! # Components
//!
//! - [`MockProvider`] - completion service with scripted replies and failures
//! - [`MockChannel`] - messaging channel with message injection and capture
//! - [`MockHistory`] - in-memory history store with failure injection

pub mod mock_channel;
pub mod mock_history;
pub mod mock_provider;

pub use mock_channel::{MockChannel, start_command, text_message};
pub use mock_history::MockHistory;
pub use mock_provider::MockProvider;
