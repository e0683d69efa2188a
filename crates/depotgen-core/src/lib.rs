pub mod app_config;
pub mod config;
pub mod depots;
pub mod manifest;
pub mod users;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use depots::{is_integer_id, DepotRecord};
pub use manifest::{ManifestRequest, ManifestRequestError, DEFAULT_MANIFEST_ID};
pub use users::UserProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
