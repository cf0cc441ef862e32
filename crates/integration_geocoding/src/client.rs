//! HERE geocoding client
//!
//! Sends one `GET <base_url>?q=<address>&apiKey=<key>` per lookup and takes
//! the first candidate of the `items` array.

use async_trait::async_trait;
use domain::GeoPoint;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{config::GeocodingConfig, error::GeocodingError, models::GeocodeResponse};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to geographic coordinates
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError>;
}

/// Geocoding client for the HERE Geocoding & Search API
#[derive(Debug)]
pub struct HereGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl HereGeocodingClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        config.validate()?;

        let mut builder =
            Client::builder().user_agent(concat!("stopfinder/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Endpoint this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl GeocodingClient for HereGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::InvalidAddress(
                "Address must not be empty".to_string(),
            ));
        }

        let params = [("q", address), ("apiKey", self.config.api_key.as_str())];

        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed {
                status: status.as_u16(),
            });
        }

        // Request URLs carry the API key; error text must not include them
        let body: GeocodeResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GeocodingError::Timeout
            } else {
                GeocodingError::ParseError(e.without_url().to_string())
            }
        })?;

        let position = body
            .first_item()
            .map_err(|e| GeocodingError::ParseError(format!("invalid first candidate: {e}")))?
            .ok_or_else(|| GeocodingError::NoResults(address.to_string()))?
            .position;

        debug!(%address, lat = position.lat, lng = position.lng, "Geocoded address");

        GeoPoint::new(position.lat, position.lng)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}
