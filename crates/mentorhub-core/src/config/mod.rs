//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section has defaults so an empty file is valid.

pub mod api;
pub mod logging;
pub mod routes;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::routes::RoutesConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "MENTORHUB";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `MENTORHUB__*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session store settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Redirect routes.
    #[serde(default)]
    pub routes: RoutesConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `MENTORHUB_`, using `__` as the
    /// section separator (e.g. `MENTORHUB__API__BASE_URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("routes.public_paths")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration("api.timeout_seconds must be positive"));
        }
        if !matches!(self.session.store.as_str(), "memory" | "file") {
            return Err(AppError::configuration(format!(
                "session.store must be 'memory' or 'file', got '{}'",
                self.session.store
            )));
        }
        if self.session.access_token_ttl_days == 0 {
            return Err(AppError::configuration(
                "session.access_token_ttl_days must be positive",
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(AppError::configuration(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}
