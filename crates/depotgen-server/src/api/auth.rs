//! Discord login, logout and the current-user endpoint.

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Extension, Json,
};
use chrono::Utc;
use depotgen_core::UserProfile;
use serde::{Deserialize, Serialize};

use crate::middleware::{CurrentUser, RequestId};
use crate::session::{
    build_cookie, clear_cookie, generate_token, hash_token, read_cookie, state_matches,
    OAUTH_STATE_COOKIE, OAUTH_STATE_MAX_AGE_SECS, SESSION_COOKIE,
};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct LogoutResponse {
    message: &'static str,
}

fn login_unavailable(req_id: String) -> ApiError {
    ApiError::new(
        req_id,
        "service_unavailable",
        "Discord login is not configured",
    )
}

/// `GET /auth/discord`: redirect to Discord with a fresh `state`.
pub(super) async fn discord_login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let Some(discord) = state.discord.as_ref() else {
        return Err(login_unavailable(req_id.0));
    };

    let oauth_state = generate_token();
    let url = discord.authorize_url(&oauth_state).map_err(|e| {
        tracing::error!(error = %e, "failed to build discord authorize URL");
        ApiError::new(req_id.0.clone(), "internal_error", "failed to start login")
    })?;

    let cookie = build_cookie(
        OAUTH_STATE_COOKIE,
        &oauth_state,
        OAUTH_STATE_MAX_AGE_SECS,
        state.config.secure_cookies(),
    );
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(&url)).into_response())
}

/// `GET /auth/discord/callback`: finish the grant and open a session.
///
/// Every outcome ends in a redirect to `/`; only success sets a session.
pub(super) async fn discord_callback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
    if state.discord.is_none() {
        return Err(login_unavailable(req_id.0));
    }

    let secure = state.config.secure_cookies();
    let clear_state = clear_cookie(OAUTH_STATE_COOKIE, secure);

    match complete_login(&state, &headers, query).await {
        Ok(session_cookie) => Ok((
            AppendHeaders([(SET_COOKIE, clear_state), (SET_COOKIE, session_cookie)]),
            Redirect::to("/"),
        )
            .into_response()),
        Err(reason) => {
            tracing::warn!(reason = %reason, "discord login failed");
            Ok((AppendHeaders([(SET_COOKIE, clear_state)]), Redirect::to("/")).into_response())
        }
    }
}

/// Returns the `Set-Cookie` value for the new session.
async fn complete_login(
    state: &AppState,
    headers: &HeaderMap,
    query: CallbackQuery,
) -> Result<String, String> {
    let discord = state
        .discord
        .as_ref()
        .ok_or_else(|| "discord login disabled".to_owned())?;

    let expected = read_cookie(headers, OAUTH_STATE_COOKIE)
        .ok_or_else(|| "missing state cookie".to_owned())?;
    let received = query.state.unwrap_or_default();
    if !state_matches(&expected, &received) {
        return Err("state mismatch".to_owned());
    }
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| "missing authorization code".to_owned())?;

    let access_token = discord
        .exchange_code(&code)
        .await
        .map_err(|e| e.to_string())?;
    let profile = discord
        .fetch_user(&access_token)
        .await
        .map_err(|e| e.to_string())?;

    let user = depotgen_db::upsert_discord_user(
        &state.pool,
        &profile.id,
        &profile.username,
        profile.avatar.as_deref(),
    )
    .await
    .map_err(|e| e.to_string())?;

    let ttl_secs = state.config.session_ttl_hours.saturating_mul(3600);
    let expires_at = i64::try_from(ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| "session ttl out of range".to_owned())?;

    let token = generate_token();
    depotgen_db::create_session(&state.pool, &hash_token(&token), user.id, expires_at)
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!(user_id = user.id, "user signed in");
    Ok(build_cookie(
        SESSION_COOKIE,
        &token,
        ttl_secs,
        state.config.secure_cookies(),
    ))
}

/// `POST /auth/logout`: drop the session and expire the cookie.
pub(super) async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE) {
        if let Err(e) = depotgen_db::delete_session(&state.pool, &hash_token(&token)).await {
            tracing::warn!(error = %e, "failed to delete session on logout");
        }
    }

    (
        AppendHeaders([(
            SET_COOKIE,
            clear_cookie(SESSION_COOKIE, state.config.secure_cookies()),
        )]),
        Json(LogoutResponse {
            message: "Logged out",
        }),
    )
        .into_response()
}

/// `GET /api/user`: the signed-in profile, or `null`.
pub(super) async fn current_user(
    user: Option<Extension<CurrentUser>>,
) -> Json<Option<UserProfile>> {
    Json(user.map(|Extension(CurrentUser(profile))| profile))
}
