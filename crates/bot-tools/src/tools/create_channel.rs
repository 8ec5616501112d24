//! Create a text or voice channel.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use bot_core::{CallerContext, ChannelKind, GuildModerator, PlatformError};
use database::{audit, ActionKind, Database};

use crate::error::ToolError;
use crate::tool::{Tool, ToolOutput};

fn default_channel_type() -> String {
    "text".to_string()
}

#[derive(Debug, Deserialize)]
struct CreateChannelArgs {
    channel_name: String,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(default = "default_channel_type")]
    channel_type: String,
}

/// Creates a channel, optionally under a named category.
pub struct CreateChannelTool {
    moderator: Arc<dyn GuildModerator>,
    db: Database,
}

impl CreateChannelTool {
    /// Create a channel-creation tool over the given platform and store.
    pub fn new(moderator: Arc<dyn GuildModerator>, db: Database) -> Self {
        Self { moderator, db }
    }
}

#[async_trait]
impl Tool for CreateChannelTool {
    fn name(&self) -> &str {
        "create_channel"
    }

    fn description(&self) -> &str {
        "Create a new channel in the server"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "channel_name": {
                    "type": "string",
                    "description": "Name of the channel to create"
                },
                "category_name": {
                    "type": "string",
                    "description": "Name of the category to create channel in (optional)"
                },
                "channel_type": {
                    "type": "string",
                    "enum": ["text", "voice"],
                    "description": "Type of channel: text or voice"
                }
            },
            "required": ["channel_name", "channel_type"]
        })
    }

    fn requires_admin(&self) -> bool {
        true
    }

    async fn execute(&self, caller: &CallerContext, args: Value) -> Result<ToolOutput, ToolError> {
        if !caller.is_admin {
            return Ok(ToolOutput::failure(
                "❌ You don't have permission to create channels.",
            ));
        }

        let args: CreateChannelArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let kind = ChannelKind::parse(&args.channel_type);

        let created = match self
            .moderator
            .create_channel(
                caller.guild_id,
                &args.channel_name,
                args.category_name.as_deref(),
                kind,
            )
            .await
        {
            Ok(channel) => channel,
            Err(PlatformError::NotFound(_)) => {
                return Ok(ToolOutput::failure(format!(
                    "❌ Could not find category: {}",
                    args.category_name.as_deref().unwrap_or("")
                )));
            }
            Err(PlatformError::PermissionDenied) => {
                return Ok(ToolOutput::failure(
                    "❌ I don't have permission to create channels.",
                ));
            }
            Err(e) => {
                return Ok(ToolOutput::failure(format!(
                    "❌ Error creating channel: {}",
                    e
                )));
            }
        };

        let mut detail = format!("Created {} channel: {}", kind.as_str(), created.name);
        if let Some(ref category) = args.category_name {
            detail.push_str(&format!(" in category: {}", category));
        }

        if let Err(e) = audit::insert_action(
            self.db.pool(),
            &caller.guild_id.to_string(),
            &caller.caller_id.to_string(),
            &caller.caller_name,
            ActionKind::CreateChannel,
            Some(&created.id.to_string()),
            Some(&created.name),
            Some(&detail),
        )
        .await
        {
            warn!("Failed to write create_channel audit record: {}", e);
        }

        Ok(ToolOutput::success(format!(
            "✅ Successfully created {} channel: {}",
            kind.as_str(),
            created.name
        )))
    }
}
