//! Kick a member from the server.

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
struct KickArgs {
    user_mention: String,
    reason: String,
}

/// Kicks a member, with privilege, target, and hierarchy checkpoints.
pub struct KickTool {
    moderator: Arc<dyn GuildModerator>,
    db: Database,
}

impl KickTool {
    /// Create a kick tool over the given platform and store.
    pub fn new(moderator: Arc<dyn GuildModerator>, db: Database) -> Self {
        Self { moderator, db }
    }
}

#[async_trait]
impl Tool for KickTool {
    fn name(&self) -> &str {
        "kick_user"
    }

    fn description(&self) -> &str {
        "Kick a member from the server"
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
                    "description": "Reason for kicking the user"
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
                "❌ You don't have permission to kick users.",
            ));
        }

        let args: KickArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let target =
            match resolve_target(self.moderator.as_ref(), caller.guild_id, &args.user_mention)
                .await
            {
                Ok(member) => member,
                Err(report) => return Ok(ToolOutput::failure(report)),
            };

        if let Err(report) =
            guard_hierarchy(self.moderator.as_ref(), caller.guild_id, &target, "kick").await
        {
            return Ok(ToolOutput::failure(report));
        }

        match self
            .moderator
            .kick(caller.guild_id, target.user_id, &args.reason)
            .await
        {
            Ok(()) => {}
            Err(PlatformError::PermissionDenied) => {
                return Ok(ToolOutput::failure(
                    "❌ I don't have permission to kick this user.",
                ));
            }
            Err(e) => {
                return Ok(ToolOutput::failure(format!("❌ Error kicking user: {}", e)));
            }
        }

        if let Err(e) = audit::insert_action(
            self.db.pool(),
            &caller.guild_id.to_string(),
            &caller.caller_id.to_string(),
            &caller.caller_name,
            ActionKind::Kick,
            Some(&target.user_id.to_string()),
            Some(&target.display_name),
            Some(&args.reason),
        )
        .await
        {
            warn!("Failed to write kick audit record: {}", e);
        }

        Ok(ToolOutput::success(format!(
            "✅ Successfully kicked **{}** (ID: {})\nReason: {}",
            target.display_name, target.user_id, args.reason
        )))
    }
}
