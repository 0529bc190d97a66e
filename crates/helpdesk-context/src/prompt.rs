// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composite prompt assembly: knowledge, transcript, current question.

use std::fmt::Write;

use helpdesk_core::Exchange;

use crate::knowledge::Knowledge;

/// Header introducing the past-exchange transcript.
pub const HISTORY_HEADER: &str = "История диалога:";

/// Prefix of the line carrying the new message.
pub const QUESTION_PREFIX: &str = "Текущий вопрос пользователя:";

/// Closing instruction.
pub const INSTRUCTION: &str =
    "Пожалуйста, ответьте на вопрос пользователя, используя информацию о компании.";

/// Builds the single user-turn payload sent to the completion service.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    knowledge: Knowledge,
}

impl PromptBuilder {
    pub fn new(knowledge: Knowledge) -> Self {
        Self { knowledge }
    }

    /// Assemble the prompt.
    ///
    /// `history` is taken as the store returns it (newest first) and rendered
    /// oldest first. No truncation is applied.
    pub fn build(&self, history: &[Exchange], message: &str) -> String {
        let mut transcript = String::new();
        for exchange in history.iter().rev() {
            // Writing into a String cannot fail.
            let _ = writeln!(transcript, "User: {}", exchange.message);
            let _ = writeln!(transcript, "Assistant: {}", exchange.response);
        }

        format!(
            "{knowledge}\n\n{HISTORY_HEADER}\n{transcript}\n{QUESTION_PREFIX} {message}\n\n{INSTRUCTION}",
            knowledge = self.knowledge.text(),
        )
    }
}
