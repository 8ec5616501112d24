//! User profile storage.

use sqlx::SqlitePool;

use crate::models::UserProfile;
use crate::Result;

/// Create or update a user's profile for a guild.
///
/// First sighting creates the row with a message count of one; every later
/// call bumps the count, refreshes `last_seen`, and adopts the latest
/// display name.
pub async fn upsert_profile(
    pool: &SqlitePool,
    user_id: &str,
    guild_id: &str,
    display_name: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, guild_id, display_name, message_count)
        VALUES (?, ?, ?, 1)
        ON CONFLICT(user_id, guild_id) DO UPDATE SET
            display_name = excluded.display_name,
            last_seen = datetime('now'),
            message_count = message_count + 1
        "#,
    )
    .bind(user_id)
    .bind(guild_id)
    .bind(display_name)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user's profile for a guild, if one exists.
pub async fn get_profile(
    pool: &SqlitePool,
    user_id: &str,
    guild_id: &str,
) -> Result<Option<UserProfile>> {
    let record = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT user_id, guild_id, display_name, first_seen, last_seen, message_count
        FROM user_profiles
        WHERE user_id = ? AND guild_id = ?
        "#,
    )
    .bind(user_id)
    .bind(guild_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}
