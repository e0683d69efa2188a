//! Database operations for the `users` table.

use chrono::{DateTime, Utc};
use depotgen_core::UserProfile;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub discord_id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            discord_id: row.discord_id,
            username: row.username,
            avatar: row.avatar,
        }
    }
}

/// Returns the user with `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no such user exists, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_user(pool: &PgPool, id: i64) -> Result<UserRow, DbError> {
    sqlx::query_as::<_, UserRow>(
        "SELECT id, discord_id, username, avatar, created_at, updated_at \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Returns the user linked to a Discord account, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_user_by_discord_id(
    pool: &PgPool,
    discord_id: &str,
) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, discord_id, username, avatar, created_at, updated_at \
         FROM users WHERE discord_id = $1",
    )
    .bind(discord_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a user for `discord_id`, or refreshes `username` and `avatar`
/// when one already exists. Returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_discord_user(
    pool: &PgPool,
    discord_id: &str,
    username: &str,
    avatar: Option<&str>,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (discord_id, username, avatar) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (discord_id) DO UPDATE \
         SET username = EXCLUDED.username, avatar = EXCLUDED.avatar, updated_at = NOW() \
         RETURNING id, discord_id, username, avatar, created_at, updated_at",
    )
    .bind(discord_id)
    .bind(username)
    .bind(avatar)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
