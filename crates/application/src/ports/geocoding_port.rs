//! Geocoding port
//!
//! Resolves a free-text address to a point inside the service area.
//! Adapters in the infrastructure layer implement this port on top of an
//! external geocoding provider.

use async_trait::async_trait;
use domain::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address geocoding
///
/// Implementations must report failures with the dedicated error kinds:
/// [`ApplicationError::InvalidInput`] for unusable addresses,
/// [`ApplicationError::GeocodingFailed`] when no coordinates can be obtained
/// and [`ApplicationError::OutOfServiceArea`] when the point lies outside the
/// service area.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address to a point inside the service area
    async fn geocode(&self, address: &str) -> Result<GeoPoint, ApplicationError>;
}
