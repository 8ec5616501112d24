//! Prefix commands for administrators.
//!
//! These bypass the model entirely: `!memory_stats`, `!reset_memory`, and
//! `!admin_logs [limit]` are answered directly from the store.

use std::sync::Arc;

use database::{audit, Database};
use memory::ConversationMemory;

/// Hard cap on `!admin_logs` output.
const MAX_LOG_ENTRIES: i64 = 50;

/// Handles admin prefix commands.
pub struct AdminCommands {
    memory: Arc<ConversationMemory>,
    db: Database,
}

impl AdminCommands {
    /// Create the command handler.
    pub fn new(memory: Arc<ConversationMemory>, db: Database) -> Self {
        Self { memory, db }
    }

    /// Handle `text` if it is a recognized prefix command.
    ///
    /// Returns `Some(reply)` when the message was a command (including
    /// denials), `None` when it is not command-shaped and should fall
    /// through to normal processing.
    pub async fn handle(
        &self,
        guild_id: u64,
        channel_id: u64,
        is_admin: bool,
        text: &str,
    ) -> Option<String> {
        let mut parts = text.trim().split_whitespace();
        let command = parts.next()?;

        match command {
            "!memory_stats" | "!reset_memory" | "!admin_logs" => {}
            _ => return None,
        }

        if !is_admin {
            return Some("❌ This command requires administrator permissions.".to_string());
        }

        match command {
            "!memory_stats" => Some(self.memory_stats(guild_id, channel_id).await),
            "!reset_memory" => Some(self.reset_memory(guild_id, channel_id).await),
            "!admin_logs" => {
                let limit = parts
                    .next()
                    .and_then(|v| v.parse::<i64>().ok())
                    .unwrap_or(10)
                    .clamp(1, MAX_LOG_ENTRIES);
                Some(self.admin_logs(guild_id, limit).await)
            }
            _ => None,
        }
    }

    async fn memory_stats(&self, guild_id: u64, channel_id: u64) -> String {
        match self.memory.usage(guild_id, channel_id).await {
            Ok(usage) => format!(
                "💾 **Memory Usage Statistics**\n\
                 Total Tokens Used: {}\n\
                 Tokens Remaining: {}\n\
                 Usage Percentage: {:.2}%\n\
                 Maximum Capacity: {} tokens",
                usage.total_tokens, usage.remaining, usage.percent_used, usage.ceiling
            ),
            Err(e) => format!("❌ Could not read memory statistics: {}", e),
        }
    }

    async fn reset_memory(&self, guild_id: u64, channel_id: u64) -> String {
        match self.memory.reset(guild_id, channel_id).await {
            Ok(_) => {
                "🔄 Conversation memory has been reset for this channel.".to_string()
            }
            Err(e) => format!("❌ Could not reset memory: {}", e),
        }
    }

    async fn admin_logs(&self, guild_id: u64, limit: i64) -> String {
        let actions =
            match audit::recent_actions(self.db.pool(), &guild_id.to_string(), limit).await {
                Ok(actions) => actions,
                Err(e) => return format!("❌ Could not read admin logs: {}", e),
            };

        if actions.is_empty() {
            return "No admin logs found.".to_string();
        }

        let mut text = "📋 **Admin Action Logs**\n".to_string();
        for (i, action) in actions.iter().enumerate() {
            text.push_str(&format!(
                "\n**{}. {}** - {}",
                i + 1,
                action.actor_name,
                action.action_kind
            ));
            if let Some(ref target) = action.target_name {
                text.push_str(&format!("\n   Target: {}", target));
            }
            if let Some(ref detail) = action.detail {
                text.push_str(&format!("\n   Details: {}", detail));
            }
            text.push_str(&format!("\n   Time: {}", action.timestamp));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::ActionKind;
    use memory::{TokenAccountant, TurnRole};

    async fn test_commands() -> AdminCommands {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let memory = Arc::new(ConversationMemory::new(
            db.clone(),
            TokenAccountant::without_tokenizer(1000),
        ));
        AdminCommands::new(memory, db)
    }

    #[tokio::test]
    async fn test_non_command_falls_through() {
        let commands = test_commands().await;
        assert!(commands.handle(1, 2, true, "hello there").await.is_none());
        assert!(commands.handle(1, 2, true, "!unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_non_admin_denied() {
        let commands = test_commands().await;
        let reply = commands.handle(1, 2, false, "!memory_stats").await.unwrap();
        assert!(reply.contains("administrator"));
    }

    #[tokio::test]
    async fn test_memory_stats_reports_usage() {
        let commands = test_commands().await;
        commands
            .memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, "x".repeat(40).as_str())
            .await
            .unwrap();

        let reply = commands.handle(1, 2, true, "!memory_stats").await.unwrap();
        assert!(reply.contains("Total Tokens Used: 10"));
        assert!(reply.contains("Maximum Capacity: 1000 tokens"));
    }

    #[tokio::test]
    async fn test_reset_memory_clears_channel() {
        let commands = test_commands().await;
        commands
            .memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, "hello")
            .await
            .unwrap();

        let reply = commands.handle(1, 2, true, "!reset_memory").await.unwrap();
        assert!(reply.contains("reset"));
        assert!(commands.memory.get_context(1, 2, 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_logs_lists_entries() {
        let commands = test_commands().await;
        audit::insert_action(
            commands.db.pool(),
            "1",
            "30",
            "Mod",
            ActionKind::Ban,
            Some("42"),
            Some("Troll"),
            Some("raiding"),
        )
        .await
        .unwrap();

        let reply = commands.handle(1, 2, true, "!admin_logs").await.unwrap();
        assert!(reply.contains("Admin Action Logs"));
        assert!(reply.contains("ban"));
        assert!(reply.contains("Troll"));

        let empty = test_commands().await;
        let reply = empty.handle(1, 2, true, "!admin_logs 5").await.unwrap();
        assert_eq!(reply, "No admin logs found.");
    }
}
