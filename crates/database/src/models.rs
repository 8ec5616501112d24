//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a stored conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// A message written by a guild member.
    User,
    /// A reply emitted by the bot.
    Assistant,
}

impl TurnRole {
    /// Database / model-facing role string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// Kind of an audited admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Kick,
    Ban,
    CreateChannel,
    ActivityCheck,
}

impl ActionKind {
    /// Stable string stored in the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Kick => "kick",
            ActionKind::Ban => "ban",
            ActionKind::CreateChannel => "create_channel",
            ActionKind::ActivityCheck => "user_activity_check",
        }
    }
}

/// One message in a channel's stored conversation history.
///
/// The autoincrement `id` is the authoritative ordering; `timestamp` is kept
/// for display and audit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ConversationTurn {
    /// Auto-incrementing insertion order.
    pub id: i64,
    /// Guild the turn belongs to.
    pub guild_id: String,
    /// Channel the turn belongs to.
    pub channel_id: String,
    /// Author's user id (the bot's own id for assistant turns).
    pub user_id: String,
    /// Author's display name at insertion time.
    pub display_name: String,
    /// "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
    /// Token count computed at insertion time.
    pub token_count: i64,
    /// Insertion timestamp.
    pub timestamp: String,
}

/// Per-(user, guild) activity profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// User id.
    pub user_id: String,
    /// Guild id.
    pub guild_id: String,
    /// Last observed display name.
    pub display_name: String,
    /// When the user was first seen in the guild.
    pub first_seen: String,
    /// When the user was last seen in the guild.
    pub last_seen: String,
    /// Lifetime message count; never decreases.
    pub message_count: i64,
}

/// Append-only audit entry for an admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AdminActionRecord {
    /// Auto-incrementing id.
    pub id: i64,
    /// Guild the action happened in.
    pub guild_id: String,
    /// User id of the acting admin.
    pub actor_id: String,
    /// Display name of the acting admin.
    pub actor_name: String,
    /// Action kind string (see [`ActionKind`]).
    pub action_kind: String,
    /// Target user/channel id, if the action had a target.
    pub target_id: Option<String>,
    /// Target display name, if the action had a target.
    pub target_name: Option<String>,
    /// Free-text detail (e.g. the stated reason).
    pub detail: Option<String>,
    /// When the action was performed.
    pub timestamp: String,
}
