//! Database operations for the `depot_cache` table.
//!
//! `data` is opaque at this layer; the server decides its encoding.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `depot_cache` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DepotCacheRow {
    pub app_id: String,
    pub data: String,
    pub updated_at: DateTime<Utc>,
}

impl DepotCacheRow {
    /// `true` if the row was written less than `ttl_secs` seconds before `now`.
    #[must_use]
    pub fn is_fresh(&self, ttl_secs: u64, now: DateTime<Utc>) -> bool {
        let Ok(ttl) = i64::try_from(ttl_secs) else {
            return true;
        };
        ttl > 0 && now.signed_duration_since(self.updated_at).num_seconds() < ttl
    }
}

/// Returns the cached entry for `app_id`, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_depot_cache(pool: &PgPool, app_id: &str) -> Result<Option<DepotCacheRow>, DbError> {
    let row = sqlx::query_as::<_, DepotCacheRow>(
        "SELECT app_id, data, updated_at FROM depot_cache WHERE app_id = $1",
    )
    .bind(app_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts or replaces the cached entry for `app_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_depot_cache(
    pool: &PgPool,
    app_id: &str,
    data: &str,
) -> Result<DepotCacheRow, DbError> {
    let row = sqlx::query_as::<_, DepotCacheRow>(
        "INSERT INTO depot_cache (app_id, data) \
         VALUES ($1, $2) \
         ON CONFLICT (app_id) DO UPDATE \
         SET data = EXCLUDED.data, updated_at = NOW() \
         RETURNING app_id, data, updated_at",
    )
    .bind(app_id)
    .bind(data)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
