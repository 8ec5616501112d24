//! Admin-action audit log persistence.

use sqlx::SqlitePool;

use crate::models::{ActionKind, AdminActionRecord};
use crate::Result;

/// Append one audit entry. Entries are never updated or deleted.
#[allow(clippy::too_many_arguments)]
pub async fn insert_action(
    pool: &SqlitePool,
    guild_id: &str,
    actor_id: &str,
    actor_name: &str,
    action_kind: ActionKind,
    target_id: Option<&str>,
    target_name: Option<&str>,
    detail: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO admin_actions_log
            (guild_id, actor_id, actor_name, action_kind, target_id, target_name, detail)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(guild_id)
    .bind(actor_id)
    .bind(actor_name)
    .bind(action_kind.as_str())
    .bind(target_id)
    .bind(target_name)
    .bind(detail)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the most recent audit entries for a guild, newest first.
pub async fn recent_actions(
    pool: &SqlitePool,
    guild_id: &str,
    limit: i64,
) -> Result<Vec<AdminActionRecord>> {
    let rows = sqlx::query_as::<_, AdminActionRecord>(
        r#"
        SELECT id, guild_id, actor_id, actor_name, action_kind, target_id,
               target_name, detail, timestamp
        FROM admin_actions_log
        WHERE guild_id = ?
        ORDER BY timestamp DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(guild_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count audit entries for a guild. Used by tests and diagnostics.
pub async fn action_count(pool: &SqlitePool, guild_id: &str) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM admin_actions_log
        WHERE guild_id = ?
        "#,
    )
    .bind(guild_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_insert_and_list_actions() {
        let db = test_db().await;

        insert_action(
            db.pool(),
            "g1",
            "admin1",
            "Mod",
            ActionKind::Kick,
            Some("u9"),
            Some("Troll"),
            Some("spamming"),
        )
        .await
        .unwrap();
        insert_action(
            db.pool(),
            "g1",
            "admin1",
            "Mod",
            ActionKind::CreateChannel,
            Some("c5"),
            Some("general-2"),
            None,
        )
        .await
        .unwrap();

        let actions = recent_actions(db.pool(), "g1", 10).await.unwrap();
        assert_eq!(actions.len(), 2);
        // Newest first
        assert_eq!(actions[0].action_kind, "create_channel");
        assert_eq!(actions[1].action_kind, "kick");
        assert_eq!(actions[1].target_name.as_deref(), Some("Troll"));

        assert_eq!(action_count(db.pool(), "g1").await.unwrap(), 2);
        assert_eq!(action_count(db.pool(), "g2").await.unwrap(), 0);
    }
}
