//! Conversation memory: recording, eviction, and context assembly.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use bot_core::ChatMessage;
use database::{conversation, profile, Database, DatabaseError, TurnRole};

use crate::tokens::TokenAccountant;

/// Default number of turns handed to the model.
pub(crate) const DEFAULT_CONTEXT_TURNS: i64 = 50;

/// Errors from memory operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Underlying store failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Result type for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Snapshot of a channel's token budget.
#[derive(Debug, Clone, Copy)]
pub struct MemoryUsage {
    /// Tokens currently stored for the channel.
    pub total_tokens: i64,
    /// Configured ceiling.
    pub ceiling: i64,
    /// Ceiling minus total.
    pub remaining: i64,
    /// Total as a percentage of the ceiling.
    pub percent_used: f64,
}

/// Reads and writes a channel's conversation history under the token ceiling.
///
/// Writes to one (guild, channel) pair are serialized through an async mutex
/// so the eviction check, the wipe, and the insert of `record_turn` form one
/// critical section even when turns for the same channel overlap.
pub struct ConversationMemory {
    db: Database,
    accountant: TokenAccountant,
    channel_locks: Mutex<HashMap<(u64, u64), Arc<Mutex<()>>>>,
}

impl ConversationMemory {
    /// Create a memory over `db` with the given accountant.
    pub fn new(db: Database, accountant: TokenAccountant) -> Self {
        Self {
            db,
            accountant,
            channel_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The accountant in use.
    pub fn accountant(&self) -> &TokenAccountant {
        &self.accountant
    }

    async fn lock_for(&self, guild_id: u64, channel_id: u64) -> Arc<Mutex<()>> {
        let mut locks = self.channel_locks.lock().await;
        locks
            .entry((guild_id, channel_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Record one turn in a channel's history.
    ///
    /// Counts tokens, wipes the channel if the pre-insert total plus the new
    /// count would exceed the ceiling, inserts the turn, and (for user-role
    /// turns) upserts the author's profile.
    pub async fn record_turn(
        &self,
        guild_id: u64,
        channel_id: u64,
        user_id: u64,
        display_name: &str,
        role: TurnRole,
        content: &str,
    ) -> Result<()> {
        let guild = guild_id.to_string();
        let channel = channel_id.to_string();
        let user = user_id.to_string();

        let token_count = self.accountant.count(content);

        let lock = self.lock_for(guild_id, channel_id).await;
        let _guard = lock.lock().await;

        let total = conversation::total_tokens(self.db.pool(), &guild, &channel).await?;
        if total + token_count > self.accountant.ceiling() {
            info!(
                guild_id = %guild,
                channel_id = %channel,
                total,
                incoming = token_count,
                ceiling = self.accountant.ceiling(),
                "Token ceiling reached, resetting channel history"
            );
            conversation::reset_channel(self.db.pool(), &guild, &channel).await?;
        }

        conversation::insert_turn(
            self.db.pool(),
            &guild,
            &channel,
            &user,
            display_name,
            role,
            content,
            token_count,
        )
        .await?;

        if role == TurnRole::User {
            profile::upsert_profile(self.db.pool(), &user, &guild, display_name).await?;
        }

        Ok(())
    }

    /// Assemble model-ready context: the most recent turns, oldest first.
    ///
    /// User turns are prefixed with the author's display name so the model
    /// can tell speakers apart in a shared channel; assistant turns pass
    /// through unchanged.
    pub async fn get_context(
        &self,
        guild_id: u64,
        channel_id: u64,
        max_turns: i64,
    ) -> Result<Vec<ChatMessage>> {
        let guild = guild_id.to_string();
        let channel = channel_id.to_string();

        let mut turns =
            conversation::recent_turns(self.db.pool(), &guild, &channel, max_turns).await?;
        // Store returns newest first
        turns.reverse();

        let messages = turns
            .into_iter()
            .map(|turn| {
                if turn.role == TurnRole::User.as_str() {
                    ChatMessage::user(format!("[{}]: {}", turn.display_name, turn.content))
                } else {
                    ChatMessage::assistant(turn.content)
                }
            })
            .collect();

        Ok(messages)
    }

    /// `get_context` with the default turn limit.
    pub async fn default_context(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Vec<ChatMessage>> {
        self.get_context(guild_id, channel_id, DEFAULT_CONTEXT_TURNS)
            .await
    }

    /// Current budget snapshot for a channel.
    pub async fn usage(&self, guild_id: u64, channel_id: u64) -> Result<MemoryUsage> {
        let guild = guild_id.to_string();
        let channel = channel_id.to_string();

        let total = conversation::total_tokens(self.db.pool(), &guild, &channel).await?;
        let ceiling = self.accountant.ceiling();

        Ok(MemoryUsage {
            total_tokens: total,
            ceiling,
            remaining: ceiling - total,
            percent_used: if ceiling > 0 {
                (total as f64 / ceiling as f64) * 100.0
            } else {
                0.0
            },
        })
    }

    /// Wipe a channel's history. Returns the number of deleted turns.
    pub async fn reset(&self, guild_id: u64, channel_id: u64) -> Result<u64> {
        let lock = self.lock_for(guild_id, channel_id).await;
        let _guard = lock.lock().await;

        let deleted = conversation::reset_channel(
            self.db.pool(),
            &guild_id.to_string(),
            &channel_id.to_string(),
        )
        .await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_memory(ceiling: i64) -> ConversationMemory {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        ConversationMemory::new(db, TokenAccountant::without_tokenizer(ceiling))
    }

    #[tokio::test]
    async fn test_record_and_context_formatting() {
        let memory = test_memory(10_000).await;

        memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, "hi")
            .await
            .unwrap();
        memory
            .record_turn(1, 2, 99, "Nimbus", TurnRole::Assistant, "Hello Alice!")
            .await
            .unwrap();

        let context = memory.get_context(1, 2, 50).await.unwrap();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, "user");
        assert_eq!(context[0].content, "[Alice]: hi");
        assert_eq!(context[1].role, "assistant");
        assert_eq!(context[1].content, "Hello Alice!");
    }

    #[tokio::test]
    async fn test_context_is_bounded_and_ordered() {
        let memory = test_memory(10_000).await;

        for i in 0..10 {
            memory
                .record_turn(1, 2, 3, "Alice", TurnRole::User, &format!("msg {}", i))
                .await
                .unwrap();
        }

        let context = memory.get_context(1, 2, 4).await.unwrap();
        assert_eq!(context.len(), 4);
        // Oldest of the window first, strictly increasing
        assert_eq!(context[0].content, "[Alice]: msg 6");
        assert_eq!(context[3].content, "[Alice]: msg 9");
    }

    #[tokio::test]
    async fn test_ceiling_never_exceeded() {
        // Fallback counter: 40 chars = 10 tokens per turn
        let memory = test_memory(25).await;
        let body = "x".repeat(40);

        for _ in 0..8 {
            memory
                .record_turn(1, 2, 3, "Alice", TurnRole::User, &body)
                .await
                .unwrap();

            let usage = memory.usage(1, 2).await.unwrap();
            assert!(
                usage.total_tokens <= usage.ceiling,
                "stored total {} exceeded ceiling {}",
                usage.total_tokens,
                usage.ceiling
            );
        }
    }

    #[tokio::test]
    async fn test_overflow_wipes_whole_channel() {
        let memory = test_memory(25).await;
        let body = "x".repeat(40); // 10 tokens

        memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, &body)
            .await
            .unwrap();
        memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, &body)
            .await
            .unwrap();
        // Third turn would reach 30 > 25: full reset, then insert
        memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, &body)
            .await
            .unwrap();

        let context = memory.get_context(1, 2, 50).await.unwrap();
        assert_eq!(context.len(), 1);
        let usage = memory.usage(1, 2).await.unwrap();
        assert_eq!(usage.total_tokens, 10);
    }

    #[tokio::test]
    async fn test_user_turn_updates_profile() {
        let memory = test_memory(10_000).await;

        memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, "hi")
            .await
            .unwrap();
        memory
            .record_turn(1, 2, 99, "Nimbus", TurnRole::Assistant, "hello")
            .await
            .unwrap();

        let profile = profile::get_profile(memory.db.pool(), "3", "1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.message_count, 1);
        // Assistant turns do not create profiles
        let bot_profile = profile::get_profile(memory.db.pool(), "99", "1").await.unwrap();
        assert!(bot_profile.is_none());
    }

    #[tokio::test]
    async fn test_reset_empties_channel() {
        let memory = test_memory(10_000).await;

        memory
            .record_turn(1, 2, 3, "Alice", TurnRole::User, "hi")
            .await
            .unwrap();
        let deleted = memory.reset(1, 2).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(memory.get_context(1, 2, 50).await.unwrap().is_empty());
    }
}
