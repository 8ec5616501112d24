//! Conversation history persistence.

use sqlx::SqlitePool;

use crate::models::{ConversationTurn, TurnRole};
use crate::Result;

/// Insert one turn into a channel's history.
#[allow(clippy::too_many_arguments)]
pub async fn insert_turn(
    pool: &SqlitePool,
    guild_id: &str,
    channel_id: &str,
    user_id: &str,
    display_name: &str,
    role: TurnRole,
    content: &str,
    token_count: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO conversation_history
            (guild_id, channel_id, user_id, display_name, role, content, token_count)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(guild_id)
    .bind(channel_id)
    .bind(user_id)
    .bind(display_name)
    .bind(role.as_str())
    .bind(content)
    .bind(token_count)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the most recent turns for a channel, newest first.
///
/// Ordering is by insertion id, not timestamp; callers wanting chronological
/// order must reverse.
pub async fn recent_turns(
    pool: &SqlitePool,
    guild_id: &str,
    channel_id: &str,
    limit: i64,
) -> Result<Vec<ConversationTurn>> {
    let rows = sqlx::query_as::<_, ConversationTurn>(
        r#"
        SELECT id, guild_id, channel_id, user_id, display_name, role, content,
               token_count, timestamp
        FROM conversation_history
        WHERE guild_id = ? AND channel_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(guild_id)
    .bind(channel_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Sum of stored token counts for a channel. Empty channels sum to zero.
pub async fn total_tokens(pool: &SqlitePool, guild_id: &str, channel_id: &str) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(token_count), 0)
        FROM conversation_history
        WHERE guild_id = ? AND channel_id = ?
        "#,
    )
    .bind(guild_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Delete a channel's entire history. Returns the number of deleted turns.
pub async fn reset_channel(pool: &SqlitePool, guild_id: &str, channel_id: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM conversation_history
        WHERE guild_id = ? AND channel_id = ?
        "#,
    )
    .bind(guild_id)
    .bind(channel_id)
    .execute(pool)
    .await?;

    tracing::info!(
        guild_id,
        channel_id,
        deleted = result.rows_affected(),
        "Conversation history reset"
    );

    Ok(result.rows_affected())
}

/// Count a user's turns in a guild over the trailing seven days.
pub async fn recent_message_count(
    pool: &SqlitePool,
    guild_id: &str,
    user_id: &str,
) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM conversation_history
        WHERE user_id = ? AND guild_id = ?
          AND timestamp > datetime('now', '-7 days')
        "#,
    )
    .bind(user_id)
    .bind(guild_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
