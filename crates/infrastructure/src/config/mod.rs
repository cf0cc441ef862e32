//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `geocoding`: geocoding provider endpoint and key
//! - `catalogue`: stop dataset locations
//! - `telemetry`: log filter

mod catalogue;
mod geocoding;
mod server;
mod telemetry;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use catalogue::CatalogueConfig;
pub use geocoding::GeocodingAppConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryAppConfig;

/// Prefix for environment overrides, e.g. `STOPFINDER_GEOCODING__API_KEY`
pub const ENV_PREFIX: &str = "STOPFINDER";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Stop dataset locations
    #[serde(default)]
    pub catalogue: CatalogueConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.{toml,yaml,json}` in the working
    /// directory (if present) and `STOPFINDER_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default `config` file
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4567)?
            .add_source(file)
            // Override with environment variables (e.g., STOPFINDER_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive the service
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the geocoding endpoint is missing
    /// or malformed, the API key is empty, or the log format is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geocoding.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "geocoding.base_url must not be empty".to_string(),
            ));
        }

        self.geocoding
            .to_geocoding_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("geocoding: {e}")))?;

        if !matches!(self.server.log_format.to_ascii_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::Invalid(format!(
                "server.log_format must be 'text' or 'json', got '{}'",
                self.server.log_format
            )));
        }

        Ok(())
    }
}
