//! Gateway event handler.

use std::sync::Arc;

use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::UserId;
use tracing::{error, info, warn};

use bot_core::{InboundMessage, QuotedMessage};
use orchestrator::Orchestrator;

use crate::actions::DiscordApi;
use crate::commands::AdminCommands;

/// Receives gateway events and feeds mentions into the orchestrator.
pub struct Handler {
    orchestrator: Arc<Orchestrator>,
    api: Arc<DiscordApi>,
    commands: AdminCommands,
    bot_user_id: u64,
}

impl Handler {
    /// Create the event handler.
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        api: Arc<DiscordApi>,
        commands: AdminCommands,
        bot_user_id: u64,
    ) -> Self {
        Self {
            orchestrator,
            api,
            commands,
            bot_user_id,
        }
    }

    async fn author_display_name(&self, ctx: &Context, msg: &Message) -> String {
        if let Some(nick) = msg.author_nick(&ctx.http).await {
            return nick;
        }
        msg.author
            .global_name
            .clone()
            .unwrap_or_else(|| msg.author.name.clone())
    }

    async fn to_inbound(&self, ctx: &Context, msg: &Message, guild_id: u64) -> InboundMessage {
        let author_name = self.author_display_name(ctx, msg).await;

        let is_admin = match self
            .api
            .member_is_admin(guild_id, msg.author.id.get())
            .await
        {
            Ok(admin) => admin,
            Err(e) => {
                warn!("Could not resolve admin status, assuming regular user: {}", e);
                false
            }
        };

        let image_count = msg
            .attachments
            .iter()
            .filter(|attachment| {
                attachment
                    .content_type
                    .as_deref()
                    .map_or(false, |kind| kind.starts_with("image/"))
            })
            .count();

        let replied_to = msg.referenced_message.as_ref().map(|quoted| QuotedMessage {
            author_name: quoted
                .author
                .global_name
                .clone()
                .unwrap_or_else(|| quoted.author.name.clone()),
            text: quoted.content.clone(),
        });

        InboundMessage {
            guild_id,
            channel_id: msg.channel_id.get(),
            author_id: msg.author.id.get(),
            author_name,
            text: msg.content.clone(),
            image_count,
            replied_to,
            is_admin,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} connected to Discord", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore our own and other bots' messages, and DMs
        if msg.author.bot {
            return;
        }
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        let guild_id = guild_id.get();

        // Prefix commands short-circuit the model path
        if msg.content.starts_with('!') {
            let is_admin = self
                .api
                .member_is_admin(guild_id, msg.author.id.get())
                .await
                .unwrap_or(false);
            if let Some(reply) = self
                .commands
                .handle(guild_id, msg.channel_id.get(), is_admin, &msg.content)
                .await
            {
                if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
                    error!("Failed to send command reply: {}", e);
                }
            }
            return;
        }

        // Conversation turns are only triggered by mention
        if !msg.mentions_user_id(UserId::new(self.bot_user_id)) {
            return;
        }

        let inbound = self.to_inbound(&ctx, &msg, guild_id).await;
        self.orchestrator.handle_message(&inbound).await;
    }
}
