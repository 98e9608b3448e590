//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a serde default, so an empty configuration
//! source is valid.

pub mod app;
pub mod logging;
pub mod reporting;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::app::ServerConfig;
use self::logging::LoggingConfig;
use self::reporting::ReportingConfig;

use crate::error::AppError;

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "CURRICULA";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Remote error reporting settings.
    #[serde(default)]
    #[validate(nested)]
    pub reporting: ReportingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CURRICULA__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize::<Self>()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?
            .validated()
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize::<Self>()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?
            .validated()
    }

    fn validated(self) -> Result<Self, AppError> {
        self.validate()
            .map_err(|e| AppError::configuration(format!("Invalid configuration: {e}")))?;
        Ok(self)
    }
}
