//! Shared fixtures for router tests.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use depotgen_core::{AppConfig, Environment};
use depotgen_db::UserRow;
use depotgen_scraper::SteamDbClient;
use tower::ServiceExt;

use super::{build_app, default_rate_limit_state, AppState};
use crate::discord::DiscordOAuth;
use crate::session::{generate_token, hash_token, SESSION_COOKIE};

pub(crate) fn test_config(discord: bool) -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
        log_level: "info".to_string(),
        public_base_url: "http://localhost:5000".to_string(),
        discord_client_id: discord.then(|| "client-1".to_string()),
        discord_client_secret: discord.then(|| "secret-1".to_string()),
        db_max_connections: 5,
        db_min_connections: 1,
        db_acquire_timeout_secs: 5,
        scraper_base_url: "http://127.0.0.1:9".to_string(),
        scraper_request_timeout_secs: 2,
        scraper_user_agent: "test-agent".to_string(),
        depot_cache_ttl_secs: 3600,
        session_ttl_hours: 1,
    }
}

pub(crate) fn test_state(pool: sqlx::PgPool, config: AppConfig) -> AppState {
    let steamdb = SteamDbClient::new(
        &config.scraper_base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )
    .expect("scraper client");
    let discord = DiscordOAuth::from_config(&config)
        .expect("discord client")
        .map(Arc::new);

    AppState {
        pool,
        config: Arc::new(config),
        steamdb: Arc::new(steamdb),
        discord,
    }
}

/// Router over `pool` whose depot fetches go to `scraper_base_url`.
pub(crate) fn test_app(pool: sqlx::PgPool, scraper_base_url: &str, discord: bool) -> Router {
    let mut config = test_config(discord);
    config.scraper_base_url = scraper_base_url.to_string();
    build_app(test_state(pool, config), default_rate_limit_state())
}

pub(crate) async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("response")
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

/// Creates a user with a live session. Returns the row and a `Cookie`
/// header value carrying the session token.
pub(crate) async fn sign_in(pool: &sqlx::PgPool, discord_id: &str) -> (UserRow, String) {
    let user = depotgen_db::upsert_discord_user(pool, discord_id, "tester", None)
        .await
        .expect("insert user");
    let token = generate_token();
    depotgen_db::create_session(
        pool,
        &hash_token(&token),
        user.id,
        Utc::now() + Duration::hours(1),
    )
    .await
    .expect("create session");
    (user, format!("{SESSION_COOKIE}={token}"))
}
