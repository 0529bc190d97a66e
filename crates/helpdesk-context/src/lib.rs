// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for the Helpdesk support bot.
//!
//! [`Knowledge`] holds the business description loaded at startup;
//! [`PromptBuilder`] combines it with a user's recent exchanges and the new
//! message into one completion prompt.

pub mod knowledge;
pub mod prompt;

pub use knowledge::Knowledge;
pub use prompt::PromptBuilder;
