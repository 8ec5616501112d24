//! Check a user's stored activity profile.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use bot_core::CallerContext;
use database::{audit, conversation, profile, ActionKind, Database};

use crate::error::ToolError;
use crate::mention::parse_user_mention;
use crate::tool::{Tool, ToolOutput};

#[derive(Debug, Deserialize)]
struct ActivityArgs {
    user_mention: String,
}

/// Reports a user's first/last sighting and message counts from the store.
pub struct ActivityTool {
    db: Database,
}

impl ActivityTool {
    /// Create an activity tool over the given store.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for ActivityTool {
    fn name(&self) -> &str {
        "user_activity_check"
    }

    fn description(&self) -> &str {
        "Check activity history of a specific user"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "user_mention": {
                    "type": "string",
                    "description": "The user mention (e.g., @username or user ID)"
                }
            },
            "required": ["user_mention"]
        })
    }

    fn requires_admin(&self) -> bool {
        true
    }

    async fn execute(&self, caller: &CallerContext, args: Value) -> Result<ToolOutput, ToolError> {
        if !caller.is_admin {
            return Ok(ToolOutput::failure(
                "❌ You don't have permission to check user activity.",
            ));
        }

        let args: ActivityArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let Some(user_id) = parse_user_mention(&args.user_mention) else {
            return Ok(ToolOutput::failure(format!(
                "❌ Could not identify user from: {}",
                args.user_mention
            )));
        };

        let guild = caller.guild_id.to_string();
        let user = user_id.to_string();

        let Some(record) = profile::get_profile(self.db.pool(), &user, &guild).await? else {
            return Ok(ToolOutput::failure(format!(
                "❌ No activity data found for user ID: {}",
                user_id
            )));
        };

        let recent = conversation::recent_message_count(self.db.pool(), &guild, &user).await?;

        let report = format!(
            "📊 **Activity Report for {}**\n\n\
             👤 **User ID:** {}\n\
             📅 **First Seen:** {}\n\
             🕐 **Last Seen:** {}\n\
             💬 **Total Messages:** {}\n\
             📈 **Messages (Last 7 Days):** {}\n",
            record.display_name,
            user_id,
            record.first_seen,
            record.last_seen,
            record.message_count,
            recent
        );

        if let Err(e) = audit::insert_action(
            self.db.pool(),
            &guild,
            &caller.caller_id.to_string(),
            &caller.caller_name,
            ActionKind::ActivityCheck,
            Some(&user),
            Some(&record.display_name),
            Some("Checked user activity"),
        )
        .await
        {
            warn!("Failed to write activity audit record: {}", e);
        }

        Ok(ToolOutput::success(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{caller, test_db};

    fn args(mention: &str) -> Value {
        serde_json::json!({ "user_mention": mention })
    }

    #[tokio::test]
    async fn test_non_admin_denied() {
        let db = test_db().await;
        let tool = ActivityTool::new(db.clone());

        let output = tool.execute(&caller(false), args("<@42>")).await.unwrap();
        assert!(output.content.contains("don't have permission"));
        assert_eq!(audit::action_count(db.pool(), "10").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let tool = ActivityTool::new(test_db().await);
        let output = tool.execute(&caller(true), args("<@42>")).await.unwrap();
        assert!(output.content.contains("No activity data found for user ID: 42"));
    }

    #[tokio::test]
    async fn test_reports_profile() {
        let db = test_db().await;
        profile::upsert_profile(db.pool(), "42", "10", "Alice").await.unwrap();
        profile::upsert_profile(db.pool(), "42", "10", "Alice").await.unwrap();

        let tool = ActivityTool::new(db.clone());
        let output = tool.execute(&caller(true), args("<@42>")).await.unwrap();
        assert!(output.success);
        assert!(output.content.contains("Activity Report for Alice"));
        assert!(output.content.contains("**Total Messages:** 2"));

        let actions = audit::recent_actions(db.pool(), "10", 10).await.unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_kind, "user_activity_check");
    }
}
