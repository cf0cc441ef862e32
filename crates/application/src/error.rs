//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The geocoding outcomes are kept as distinct variants so the boundary can
/// map each of them to its own response.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The caller supplied unusable input (e.g. a blank address)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The address could not be turned into coordinates
    #[error("Geocoding failed: {0}")]
    GeocodingFailed(String),

    /// The address resolved to a point outside the service area
    #[error("Location ({latitude}, {longitude}) is outside the service area")]
    OutOfServiceArea { latitude: f64, longitude: f64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_converts() {
        let err: ApplicationError = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 9.0,
        }
        .into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert!(err.to_string().starts_with("Invalid coordinates"));
    }

    #[test]
    fn invalid_input_message() {
        let err = ApplicationError::InvalidInput("Address parameter is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: Address parameter is required");
    }

    #[test]
    fn geocoding_failed_message_keeps_cause() {
        let err = ApplicationError::GeocodingFailed("Request failed with HTTP 503".into());
        assert_eq!(err.to_string(), "Geocoding failed: Request failed with HTTP 503");
    }

    #[test]
    fn out_of_service_area_message_contains_point() {
        let err = ApplicationError::OutOfServiceArea {
            latitude: 41.9028,
            longitude: 12.4964,
        };
        assert!(err.to_string().contains("41.9028"));
        assert!(err.to_string().contains("outside the service area"));
    }
}
