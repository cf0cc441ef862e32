//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the process
//! plumbing: configuration loading, stop catalogue files and logging setup.

pub mod adapters;
pub mod catalogue;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use catalogue::{CatalogueLoadError, LoadReport, load_catalogue};
pub use config::{
    AppConfig, CatalogueConfig, ConfigError, GeocodingAppConfig, ServerConfig, TelemetryAppConfig,
};
pub use telemetry::{LogFormat, TelemetryError, init_telemetry};
