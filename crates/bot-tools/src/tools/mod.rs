//! Tool handler implementations.

mod activity;
mod ban;
mod create_channel;
mod kick;
mod search;

pub use activity::ActivityTool;
pub use ban::BanTool;
pub use create_channel::CreateChannelTool;
pub use kick::KickTool;
pub use search::{SearchConfig, SearchHit, SearchTool, NOT_CONFIGURED_MESSAGE};

use bot_core::{GuildModerator, MemberInfo};

use crate::mention::parse_user_mention;

/// Resolve a moderation target from a mention string.
///
/// Returns the member on success, or the user-facing report string for the
/// early-exit path (unparseable mention, unknown member, platform failure).
pub(crate) async fn resolve_target(
    moderator: &dyn GuildModerator,
    guild_id: u64,
    user_mention: &str,
) -> Result<MemberInfo, String> {
    let Some(user_id) = parse_user_mention(user_mention) else {
        return Err(format!("❌ Could not identify user from: {}", user_mention));
    };

    match moderator.fetch_member(guild_id, user_id).await {
        Ok(member) => Ok(member),
        Err(bot_core::PlatformError::NotFound(_)) => {
            Err(format!("❌ Could not find user with ID: {}", user_id))
        }
        Err(e) => Err(format!("❌ Error looking up user {}: {}", user_id, e)),
    }
}

/// Refuse to act on members ranked at or above the bot.
///
/// Returns the refusal string when the target's highest role is greater than
/// or equal to the bot's own.
pub(crate) async fn guard_hierarchy(
    moderator: &dyn GuildModerator,
    guild_id: u64,
    target: &MemberInfo,
    verb: &str,
) -> Result<(), String> {
    let bot = match moderator.bot_member(guild_id).await {
        Ok(member) => member,
        Err(e) => return Err(format!("❌ Error checking role hierarchy: {}", e)),
    };

    if target.role_rank >= bot.role_rank {
        return Err(format!(
            "❌ Cannot {} {} - their role is higher than or equal to mine.",
            verb, target.display_name
        ));
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording mock of the platform traits for handler tests.

    use std::sync::Mutex;

    use bot_core::{
        async_trait, ChannelKind, CreatedChannel, GuildModerator, MemberInfo, PlatformError,
    };

    /// What the mock should do when an action is attempted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ActionBehavior {
        Succeed,
        DenyPermission,
    }

    /// A [`GuildModerator`] that records calls instead of talking to Discord.
    pub struct RecordingModerator {
        /// Members known to the mock, with their ranks.
        pub members: Vec<MemberInfo>,
        /// The bot's own rank.
        pub bot_rank: i64,
        /// Behavior of kick/ban/create_channel calls.
        pub behavior: ActionBehavior,
        /// Recorded (user_id, reason) kick calls.
        pub kicks: Mutex<Vec<(u64, String)>>,
        /// Recorded (user_id, reason) ban calls.
        pub bans: Mutex<Vec<(u64, String)>>,
        /// Recorded (name, kind) channel creations.
        pub created: Mutex<Vec<(String, ChannelKind)>>,
    }

    impl RecordingModerator {
        pub fn new(bot_rank: i64) -> Self {
            Self {
                members: Vec::new(),
                bot_rank,
                behavior: ActionBehavior::Succeed,
                kicks: Mutex::new(Vec::new()),
                bans: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
            }
        }

        pub fn with_member(mut self, user_id: u64, name: &str, rank: i64) -> Self {
            self.members.push(MemberInfo {
                user_id,
                display_name: name.to_string(),
                role_rank: rank,
            });
            self
        }

        pub fn denying(mut self) -> Self {
            self.behavior = ActionBehavior::DenyPermission;
            self
        }

        pub fn kick_count(&self) -> usize {
            self.kicks.lock().unwrap().len()
        }

        pub fn ban_count(&self) -> usize {
            self.bans.lock().unwrap().len()
        }

        fn gate(&self) -> Result<(), PlatformError> {
            match self.behavior {
                ActionBehavior::Succeed => Ok(()),
                ActionBehavior::DenyPermission => Err(PlatformError::PermissionDenied),
            }
        }
    }

    #[async_trait]
    impl GuildModerator for RecordingModerator {
        async fn fetch_member(
            &self,
            _guild_id: u64,
            user_id: u64,
        ) -> Result<MemberInfo, PlatformError> {
            self.members
                .iter()
                .find(|m| m.user_id == user_id)
                .cloned()
                .ok_or_else(|| PlatformError::NotFound(format!("member {}", user_id)))
        }

        async fn bot_member(&self, _guild_id: u64) -> Result<MemberInfo, PlatformError> {
            Ok(MemberInfo {
                user_id: 0,
                display_name: "Nimbus".to_string(),
                role_rank: self.bot_rank,
            })
        }

        async fn kick(
            &self,
            _guild_id: u64,
            user_id: u64,
            reason: &str,
        ) -> Result<(), PlatformError> {
            self.gate()?;
            self.kicks.lock().unwrap().push((user_id, reason.to_string()));
            Ok(())
        }

        async fn ban(
            &self,
            _guild_id: u64,
            user_id: u64,
            reason: &str,
        ) -> Result<(), PlatformError> {
            self.gate()?;
            self.bans.lock().unwrap().push((user_id, reason.to_string()));
            Ok(())
        }

        async fn create_channel(
            &self,
            _guild_id: u64,
            name: &str,
            category_name: Option<&str>,
            kind: ChannelKind,
        ) -> Result<CreatedChannel, PlatformError> {
            self.gate()?;
            if let Some(category) = category_name {
                if category != "General" {
                    return Err(PlatformError::NotFound(format!("category {}", category)));
                }
            }
            self.created.lock().unwrap().push((name.to_string(), kind));
            Ok(CreatedChannel {
                id: 777,
                name: name.to_string(),
                kind,
            })
        }
    }

    /// An in-memory database with migrations applied.
    pub async fn test_db() -> database::Database {
        let db = database::Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    /// A caller context with the given privilege.
    pub fn caller(is_admin: bool) -> bot_core::CallerContext {
        bot_core::CallerContext {
            guild_id: 10,
            channel_id: 20,
            caller_id: 30,
            caller_name: "Mod".to_string(),
            is_admin,
        }
    }
}
