//! Ban a member from the server.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use bot_core::{CallerContext, GuildModerator, PlatformError};
use database::{audit, ActionKind, Database};

use crate::error::ToolError;
use crate::tool::{Tool, ToolOutput};
use crate::tools::{guard_hierarchy, resolve_target};

#[derive(Debug, Deserialize)]
struct BanArgs {
    user_mention: String,
    reason: String,
}

/// Bans a member, with the same checkpoints as [`crate::KickTool`].
pub struct BanTool {
    moderator: Arc<dyn GuildModerator>,
    db: Database,
}

impl BanTool {
    /// Create a ban tool over the given platform and store.
    pub fn new(moderator: Arc<dyn GuildModerator>, db: Database) -> Self {
        Self { moderator, db }
    }
}

#[async_trait]
impl Tool for BanTool {
    fn name(&self) -> &str {
        "ban_user"
    }

    fn description(&self) -> &str {
        "Ban a member from the server"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "user_mention": {
                    "type": "string",
                    "description": "The user mention (e.g., @username or user ID)"
                },
                "reason": {
                    "type": "string",
                    "description": "Reason for banning the user"
                }
            },
            "required": ["user_mention", "reason"]
        })
    }

    fn requires_admin(&self) -> bool {
        true
    }

    async fn execute(&self, caller: &CallerContext, args: Value) -> Result<ToolOutput, ToolError> {
        if !caller.is_admin {
            return Ok(ToolOutput::failure(
                "❌ You don't have permission to ban users.",
            ));
        }

        let args: BanArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let target =
            match resolve_target(self.moderator.as_ref(), caller.guild_id, &args.user_mention)
                .await
            {
                Ok(member) => member,
                Err(report) => return Ok(ToolOutput::failure(report)),
            };

        if let Err(report) =
            guard_hierarchy(self.moderator.as_ref(), caller.guild_id, &target, "ban").await
        {
            return Ok(ToolOutput::failure(report));
        }

        match self
            .moderator
            .ban(caller.guild_id, target.user_id, &args.reason)
            .await
        {
            Ok(()) => {}
            Err(PlatformError::PermissionDenied) => {
                return Ok(ToolOutput::failure(
                    "❌ I don't have permission to ban this user.",
                ));
            }
            Err(e) => {
                return Ok(ToolOutput::failure(format!("❌ Error banning user: {}", e)));
            }
        }

        if let Err(e) = audit::insert_action(
            self.db.pool(),
            &caller.guild_id.to_string(),
            &caller.caller_id.to_string(),
            &caller.caller_name,
            ActionKind::Ban,
            Some(&target.user_id.to_string()),
            Some(&target.display_name),
            Some(&args.reason),
        )
        .await
        {
            warn!("Failed to write ban audit record: {}", e);
        }

        Ok(ToolOutput::success(format!(
            "✅ Successfully banned **{}** (ID: {})\nReason: {}",
            target.display_name, target.user_id, args.reason
        )))
    }
}
