//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The address is empty or otherwise unusable
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The geocoding service answered with a non-success status
    #[error("Request failed with HTTP {status}")]
    RequestFailed {
        /// HTTP status code returned by the provider
        status: u16,
    },

    /// Failed to parse the geocoding response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provider returned no candidate for the address
    #[error("No results found for address: {0}")]
    NoResults(String),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
