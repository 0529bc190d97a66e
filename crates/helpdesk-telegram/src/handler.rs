// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update classification and conversion.
//!
//! Decides whether an incoming Telegram message is the `/start` command,
//! free text for the completion pipeline, or something to ignore, then
//! converts it into a channel-agnostic [`InboundMessage`].

use helpdesk_core::types::{InboundMessage, MessageContent};
use teloxide::types::Message;

/// Command that triggers the greeting.
pub const START_COMMAND: &str = "start";

/// Classifies a message.
///
/// Returns `None` for non-text messages and for commands other than `/start`.
pub fn classify(msg: &Message) -> Option<MessageContent> {
    let text = msg.text()?;
    match command_name(text) {
        Some(START_COMMAND) => Some(MessageContent::Start),
        Some(_) => None,
        None => Some(MessageContent::Text(text.to_string())),
    }
}

/// Extracts the command name from `/name`, `/name@bot` or `/name args`.
///
/// Returns `None` when the text is not a command.
pub fn command_name(text: &str) -> Option<&str> {
    let token = text.split_whitespace().next()?;
    let name = token.strip_prefix('/')?;
    let name = name.split_once('@').map_or(name, |(name, _bot)| name);
    let is_command =
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_command.then_some(name)
}

/// Converts a classified message into an [`InboundMessage`].
///
/// Messages without a sender (channel posts) return `None`.
pub fn to_inbound_message(msg: &Message, content: MessageContent) -> Option<InboundMessage> {
    let user = msg.from.as_ref()?;
    Some(InboundMessage {
        id: msg.id.0.to_string(),
        chat_id: msg.chat.id.0,
        user_id: i64::try_from(user.id.0).ok()?,
        username: user.username.clone(),
        content,
        timestamp: msg.date.to_rfc3339(),
    })
}
