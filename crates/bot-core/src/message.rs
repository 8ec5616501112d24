//! Message types for inbound events and model-facing chat turns.

use serde::{Deserialize, Serialize};

/// A chat message handed to (or stored for) the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// The message an inbound message replied to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedMessage {
    /// Display name of the quoted message's author.
    pub author_name: String,
    /// Text of the quoted message.
    pub text: String,
}

/// A platform-neutral view of one inbound channel message.
///
/// The gateway builds one of these per event; the orchestrator consumes it.
/// Attachment content never crosses this boundary - only a count of image
/// attachments, which the orchestrator turns into a textual note.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Guild (server) the message was sent in.
    pub guild_id: u64,
    /// Channel the message was sent in.
    pub channel_id: u64,
    /// Author's user id.
    pub author_id: u64,
    /// Author's display name at the time of the message.
    pub author_name: String,
    /// Raw message text, mention tokens included.
    pub text: String,
    /// Number of image attachments on the message.
    pub image_count: usize,
    /// The quoted message, when this message is a reply.
    pub replied_to: Option<QuotedMessage>,
    /// Whether the author holds administrator privilege in this guild.
    pub is_admin: bool,
}

impl InboundMessage {
    /// The caller context for tool dispatch derived from this message.
    pub fn caller(&self) -> crate::CallerContext {
        crate::CallerContext {
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            caller_id: self.author_id,
            caller_name: self.author_name.clone(),
            is_admin: self.is_admin,
        }
    }
}
