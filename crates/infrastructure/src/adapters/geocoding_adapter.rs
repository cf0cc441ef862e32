//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{BoundingBox, GeoPoint};
use integration_geocoding::{GeocodingClient, GeocodingError, HereGeocodingClient};
use tracing::{debug, instrument, warn};

use crate::config::GeocodingAppConfig;

/// Adapter resolving addresses through a geocoding client and restricting
/// results to the service area
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
    service_area: BoundingBox,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("service_area", &self.service_area)
            .finish_non_exhaustive()
    }
}

impl GeocodingAdapter {
    /// Create an adapter around an existing client, limited to Milan
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self {
            client,
            service_area: BoundingBox::MILAN,
        }
    }

    /// Build the HERE client from application config
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the endpoint or key is
    /// unusable or the HTTP client cannot be created.
    pub fn from_config(config: &GeocodingAppConfig) -> Result<Self, ApplicationError> {
        let client = HereGeocodingClient::new(&config.to_geocoding_config())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Use a different service area
    #[must_use]
    pub const fn with_service_area(mut self, service_area: BoundingBox) -> Self {
        self.service_area = service_area;
        self
    }

    /// Convert a client error into the application error taxonomy
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::InvalidAddress(msg) => ApplicationError::InvalidInput(msg),
            GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::GeocodingFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoPoint, ApplicationError> {
        let point = self.client.geocode(address).await.map_err(|e| {
            warn!(error = %e, "Geocoding failed");
            Self::map_error(e)
        })?;

        if !self.service_area.contains_point(&point) {
            warn!(%point, "Geocoded point outside service area");
            return Err(ApplicationError::OutOfServiceArea {
                latitude: point.latitude(),
                longitude: point.longitude(),
            });
        }

        debug!(%point, "Geocoded point inside service area");
        Ok(point)
    }
}
