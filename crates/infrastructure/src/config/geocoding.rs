//! Geocoding provider configuration.

use std::fmt;

use integration_geocoding::GeocodingConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Geocoding provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Geocoding endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key (sensitive - uses `SecretString`)
    #[serde(default = "empty_secret", skip_serializing)]
    pub api_key: SecretString,

    /// Request timeout in seconds (no timeout when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for GeocodingAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    GeocodingConfig::default().base_url
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: empty_secret(),
            timeout_secs: None,
        }
    }
}

impl GeocodingAppConfig {
    /// Whether an API key has been supplied
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    /// Convert to `integration_geocoding`'s `GeocodingConfig`
    #[must_use]
    pub fn to_geocoding_config(&self) -> GeocodingConfig {
        GeocodingConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.expose_secret().to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}
