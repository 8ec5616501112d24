//! Serenity-backed implementations of the platform traits.

use std::sync::Arc;

use serenity::builder::CreateChannel;
use serenity::http::Http;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::model::permissions::Permissions;
use tracing::debug;

use bot_core::{
    async_trait, ChannelKind, CreatedChannel, GuildModerator, MemberInfo, Messenger,
    PlatformError,
};

/// Discord implementation of [`Messenger`] and [`GuildModerator`].
///
/// Uses a standalone serenity HTTP client, independent of the gateway
/// connection, so moderation calls and the event loop never contend.
pub struct DiscordApi {
    http: Arc<Http>,
    bot_user_id: u64,
}

impl DiscordApi {
    /// Create an API wrapper over an HTTP client.
    pub fn new(http: Arc<Http>, bot_user_id: u64) -> Self {
        Self { http, bot_user_id }
    }

    /// The bot's own user id.
    pub fn bot_user_id(&self) -> u64 {
        self.bot_user_id
    }

    fn convert_error(err: serenity::Error) -> PlatformError {
        match err {
            serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response)) => {
                match response.status_code.as_u16() {
                    403 => PlatformError::PermissionDenied,
                    404 => PlatformError::NotFound(response.error.message),
                    _ => PlatformError::Api(response.error.message),
                }
            }
            other => PlatformError::Api(other.to_string()),
        }
    }

    /// Whether a member holds administrator privilege in the guild.
    ///
    /// Owners are always administrators; otherwise any role carrying the
    /// ADMINISTRATOR permission qualifies.
    pub async fn member_is_admin(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<bool, PlatformError> {
        let gid = GuildId::new(guild_id);

        let guild = gid
            .to_partial_guild(&self.http)
            .await
            .map_err(Self::convert_error)?;

        if guild.owner_id.get() == user_id {
            return Ok(true);
        }

        let member = gid
            .member(&self.http, UserId::new(user_id))
            .await
            .map_err(Self::convert_error)?;

        Ok(member
            .roles
            .iter()
            .filter_map(|role_id| guild.roles.get(role_id))
            .any(|role| role.permissions.contains(Permissions::ADMINISTRATOR)))
    }
}

#[async_trait]
impl Messenger for DiscordApi {
    async fn send(&self, channel_id: u64, text: &str) -> Result<(), PlatformError> {
        ChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(Self::convert_error)
    }
}

#[async_trait]
impl GuildModerator for DiscordApi {
    async fn fetch_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<MemberInfo, PlatformError> {
        let gid = GuildId::new(guild_id);

        let member = gid
            .member(&self.http, UserId::new(user_id))
            .await
            .map_err(Self::convert_error)?;
        let guild = gid
            .to_partial_guild(&self.http)
            .await
            .map_err(Self::convert_error)?;

        let role_rank = member
            .roles
            .iter()
            .filter_map(|role_id| guild.roles.get(role_id))
            .map(|role| i64::from(role.position))
            .max()
            .unwrap_or(0);

        let display_name = member
            .nick
            .clone()
            .or_else(|| member.user.global_name.clone())
            .unwrap_or_else(|| member.user.name.clone());

        Ok(MemberInfo {
            user_id,
            display_name,
            role_rank,
        })
    }

    async fn bot_member(&self, guild_id: u64) -> Result<MemberInfo, PlatformError> {
        self.fetch_member(guild_id, self.bot_user_id).await
    }

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), PlatformError> {
        debug!(guild_id, user_id, "Kicking member");
        GuildId::new(guild_id)
            .kick_with_reason(&self.http, UserId::new(user_id), reason)
            .await
            .map_err(Self::convert_error)
    }

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), PlatformError> {
        debug!(guild_id, user_id, "Banning member");
        GuildId::new(guild_id)
            .ban_with_reason(&self.http, UserId::new(user_id), 0, reason)
            .await
            .map_err(Self::convert_error)
    }

    async fn create_channel(
        &self,
        guild_id: u64,
        name: &str,
        category_name: Option<&str>,
        kind: ChannelKind,
    ) -> Result<CreatedChannel, PlatformError> {
        let gid = GuildId::new(guild_id);

        let channel_type = match kind {
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };
        let mut builder = CreateChannel::new(name).kind(channel_type);

        if let Some(category_name) = category_name {
            let channels = gid.channels(&self.http).await.map_err(Self::convert_error)?;
            let category = channels.values().find(|channel| {
                channel.kind == ChannelType::Category
                    && channel.name.eq_ignore_ascii_case(category_name)
            });
            match category {
                Some(category) => builder = builder.category(category.id),
                None => {
                    return Err(PlatformError::NotFound(format!(
                        "category {}",
                        category_name
                    )))
                }
            }
        }

        let channel = gid
            .create_channel(&self.http, builder)
            .await
            .map_err(Self::convert_error)?;

        debug!(guild_id, channel_id = channel.id.get(), "Created channel");

        Ok(CreatedChannel {
            id: channel.id.get(),
            name: channel.name.clone(),
            kind,
        })
    }
}
