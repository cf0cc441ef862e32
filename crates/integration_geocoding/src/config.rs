//! Geocoding service configuration

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::GeocodingError;

/// Configuration for the geocoding client
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding endpoint; `q` and `apiKey` are appended as query parameters
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://geocode.search.hereapi.com/v1/geocode".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeocodingConfig {
    /// Create a configuration for an endpoint and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: None,
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: Some(5),
            ..Default::default()
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Request timeout, if one is configured
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute http(s) URL, the
    /// API key is blank or the timeout is zero.
    pub fn validate(&self) -> Result<(), GeocodingError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            GeocodingError::ConfigurationError(format!("invalid base_url '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(GeocodingError::ConfigurationError(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(GeocodingError::ConfigurationError(
                "api_key must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(GeocodingError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
