use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Externally reachable base URL, used to build the OAuth callback.
    pub public_base_url: String,
    pub discord_client_id: Option<String>,
    pub discord_client_secret: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub scraper_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// `0` disables cache reads; successful lookups are still written.
    pub depot_cache_ttl_secs: u64,
    pub session_ttl_hours: u64,
}

impl AppConfig {
    /// Returns `true` when both Discord OAuth credentials are configured.
    #[must_use]
    pub fn discord_enabled(&self) -> bool {
        self.discord_client_id.is_some() && self.discord_client_secret.is_some()
    }

    #[must_use]
    pub fn discord_callback_url(&self) -> String {
        format!(
            "{}/auth/discord/callback",
            self.public_base_url.trim_end_matches('/')
        )
    }

    /// Session cookies carry `Secure` only in production.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.env == Environment::Production
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("public_base_url", &self.public_base_url)
            .field("database_url", &"[redacted]")
            .field("discord_client_id", &self.discord_client_id)
            .field(
                "discord_client_secret",
                &self.discord_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("scraper_base_url", &self.scraper_base_url)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("depot_cache_ttl_secs", &self.depot_cache_ttl_secs)
            .field("session_ttl_hours", &self.session_ttl_hours)
            .finish()
    }
}
