use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Desktop Chrome identity sent to the depot listing source.
pub const DEFAULT_SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_SCRAPER_BASE_URL: &str = "https://steamdb.info";

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("DEPOTGEN_ENV", "development"))?;

    let bind_addr = parse_addr("DEPOTGEN_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("DEPOTGEN_LOG_LEVEL", "info");
    let public_base_url = resolve_public_base_url(
        optional("DEPOTGEN_PUBLIC_URL"),
        optional("VERCEL_URL"),
        optional("REPLIT_DEV_DOMAIN"),
    );

    let discord_client_id = optional("DISCORD_CLIENT_ID");
    let discord_client_secret = optional("DISCORD_CLIENT_SECRET");

    let db_max_connections = parse_u32("DEPOTGEN_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("DEPOTGEN_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEPOTGEN_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("DEPOTGEN_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let scraper_base_url = or_default("DEPOTGEN_SCRAPER_BASE_URL", DEFAULT_SCRAPER_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let scraper_request_timeout_secs = parse_u64("DEPOTGEN_SCRAPER_REQUEST_TIMEOUT_SECS", "10")?;
    if scraper_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEPOTGEN_SCRAPER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let scraper_user_agent = or_default("DEPOTGEN_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);

    let depot_cache_ttl_secs = parse_u64("DEPOTGEN_DEPOT_CACHE_TTL_SECS", "3600")?;
    let session_ttl_hours = parse_u64("DEPOTGEN_SESSION_TTL_HOURS", "168")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        public_base_url,
        discord_client_id,
        discord_client_secret,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        scraper_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        depot_cache_ttl_secs,
        session_ttl_hours,
    })
}

/// Picks the public base URL: explicit setting, then hosting-platform
/// hostnames, then the local default.
fn resolve_public_base_url(
    explicit: Option<String>,
    vercel_host: Option<String>,
    replit_host: Option<String>,
) -> String {
    if let Some(url) = explicit {
        return url.trim_end_matches('/').to_string();
    }
    if let Some(host) = vercel_host.or(replit_host) {
        return format!("https://{host}");
    }
    DEFAULT_PUBLIC_BASE_URL.to_string()
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DEPOTGEN_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
