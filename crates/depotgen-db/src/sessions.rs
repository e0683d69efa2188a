//! Database operations for the `sessions` table.
//!
//! Callers pass the hashed session token; raw tokens never reach the database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::users::UserRow;
use crate::DbError;

/// A row from the `sessions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    pub token_hash: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Stores a new session for `user_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including a hash collision).
pub async fn create_session(
    pool: &PgPool,
    token_hash: &str,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<SessionRow, DbError> {
    let row = sqlx::query_as::<_, SessionRow>(
        "INSERT INTO sessions (token_hash, user_id, expires_at) \
         VALUES ($1, $2, $3) \
         RETURNING token_hash, user_id, created_at, expires_at",
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the user owning an unexpired session, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_session_user(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT u.id, u.discord_id, u.username, u.avatar, u.created_at, u.updated_at \
         FROM sessions s \
         JOIN users u ON u.id = s.user_id \
         WHERE s.token_hash = $1 AND s.expires_at > NOW()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Deletes a session. Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_session(pool: &PgPool, token_hash: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Removes every expired session. Returns the number deleted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_expired_sessions(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
