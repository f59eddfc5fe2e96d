//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a serde default, so an absent file yields a
//! working configuration pointed at the production backend.

pub mod api;
pub mod auth;
pub mod controller;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::auth::AuthConfig;
use self::controller::ControllerConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Credential storage and login settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// List controller defaults.
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the file at `path` with an optional `config/{env}` overlay
    /// and environment variables prefixed with `SCHOOLADMIN__`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SCHOOLADMIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
