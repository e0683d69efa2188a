mod api;
mod discord;
mod middleware;
mod session;

use std::sync::Arc;

use depotgen_scraper::SteamDbClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    discord::DiscordOAuth,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(depotgen_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = depotgen_db::PoolConfig::from_app_config(&config);
    let pool = depotgen_db::connect_pool(&config.database_url, pool_config).await?;
    depotgen_db::run_migrations(&pool).await?;

    match depotgen_db::delete_expired_sessions(&pool).await {
        Ok(0) => {}
        Ok(purged) => tracing::info!(purged, "removed expired sessions"),
        Err(e) => tracing::warn!(error = %e, "failed to purge expired sessions"),
    }

    let steamdb = SteamDbClient::new(
        &config.scraper_base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?;

    let discord = DiscordOAuth::from_config(&config)?;
    if discord.is_none() {
        tracing::warn!("Discord credentials not provided; login routes will answer 503");
    }

    let state = AppState {
        pool,
        config: Arc::clone(&config),
        steamdb: Arc::new(steamdb),
        discord: discord.map(Arc::new),
    };
    let app = build_app(state, default_rate_limit_state());

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "depotgen-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
