//! `GET /api/depots/{appid}`: cached depot lookup.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use depotgen_core::{is_integer_id, DepotRecord};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Returns the depots of `appid` as a bare JSON array.
///
/// A fresh cache row short-circuits the fetch. Cache failures are logged
/// and otherwise ignored.
pub(super) async fn get_depots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<String>,
) -> Result<Json<Vec<DepotRecord>>, ApiError> {
    let app_id = app_id.trim();
    if !is_integer_id(app_id) {
        return Err(ApiError::new(req_id.0, "bad_request", "invalid app id"));
    }

    if let Some(depots) = read_fresh_cache(&state, app_id).await {
        tracing::debug!(app_id, count = depots.len(), "serving depots from cache");
        return Ok(Json(depots));
    }

    let depots = state.steamdb.fetch_depots(app_id).await.map_err(|e| {
        tracing::error!(
            app_id,
            error = %e,
            parse_failure = e.is_parse_failure(),
            "depot lookup failed"
        );
        ApiError::new(req_id.0.clone(), "internal_error", "failed to fetch depots")
    })?;

    if !depots.is_empty() {
        write_cache(&state, app_id, &depots).await;
    }

    Ok(Json(depots))
}

async fn read_fresh_cache(state: &AppState, app_id: &str) -> Option<Vec<DepotRecord>> {
    if state.config.depot_cache_ttl_secs == 0 {
        return None;
    }

    let row = match depotgen_db::get_depot_cache(&state.pool, app_id).await {
        Ok(row) => row?,
        Err(e) => {
            tracing::warn!(app_id, error = %e, "depot cache read failed");
            return None;
        }
    };

    if !row.is_fresh(state.config.depot_cache_ttl_secs, Utc::now()) {
        return None;
    }

    match serde_json::from_str(&row.data) {
        Ok(depots) => Some(depots),
        Err(e) => {
            tracing::warn!(app_id, error = %e, "discarding undecodable depot cache row");
            None
        }
    }
}

async fn write_cache(state: &AppState, app_id: &str, depots: &[DepotRecord]) {
    let data = match serde_json::to_string(depots) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(app_id, error = %e, "failed to encode depots for cache");
            return;
        }
    };

    if let Err(e) = depotgen_db::upsert_depot_cache(&state.pool, app_id, &data).await {
        tracing::warn!(app_id, error = %e, "depot cache write failed");
    }
}
