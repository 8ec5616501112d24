//! Narrow interfaces onto the chat platform.
//!
//! The gateway crate implements these against the real Discord API; tests
//! implement them with recording mocks. Handlers translate the typed
//! failures into user-facing strings - nothing here reaches the user raw.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from platform operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The bot lacks permission for the attempted action.
    #[error("missing platform permission")]
    PermissionDenied,

    /// The referenced entity does not exist or is not visible.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other platform API failure.
    #[error("platform error: {0}")]
    Api(String),
}

/// A guild member as the moderation handlers see one.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    /// The member's user id.
    pub user_id: u64,
    /// Display name (guild nickname if set, otherwise account name).
    pub display_name: String,
    /// Position of the member's highest role; higher means more authority.
    pub role_rank: i64,
}

/// Kind of channel to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Text channel.
    Text,
    /// Voice channel.
    Voice,
}

impl ChannelKind {
    /// Parse a user-supplied kind string; anything that is not "voice" is text.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("voice") {
            Self::Voice
        } else {
            Self::Text
        }
    }

    /// Lowercase display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }
}

/// A channel created through [`GuildModerator::create_channel`].
#[derive(Debug, Clone)]
pub struct CreatedChannel {
    /// The new channel's id.
    pub id: u64,
    /// The new channel's name.
    pub name: String,
    /// The kind that was created.
    pub kind: ChannelKind,
}

/// Outbound message delivery.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to `channel_id`. The caller is responsible for chunking.
    async fn send(&self, channel_id: u64, text: &str) -> Result<(), PlatformError>;
}

/// Guild moderation and lookup operations.
#[async_trait]
pub trait GuildModerator: Send + Sync {
    /// Fetch a member, including their role rank.
    async fn fetch_member(&self, guild_id: u64, user_id: u64) -> Result<MemberInfo, PlatformError>;

    /// The bot's own membership in the guild, for hierarchy checks.
    async fn bot_member(&self, guild_id: u64) -> Result<MemberInfo, PlatformError>;

    /// Kick a member.
    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), PlatformError>;

    /// Ban a member.
    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), PlatformError>;

    /// Create a channel, optionally under a named category.
    async fn create_channel(
        &self,
        guild_id: u64,
        name: &str,
        category_name: Option<&str>,
        kind: ChannelKind,
    ) -> Result<CreatedChannel, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_kind_parse() {
        assert_eq!(ChannelKind::parse("voice"), ChannelKind::Voice);
        assert_eq!(ChannelKind::parse("Voice"), ChannelKind::Voice);
        assert_eq!(ChannelKind::parse("text"), ChannelKind::Text);
        assert_eq!(ChannelKind::parse("anything-else"), ChannelKind::Text);
    }
}
