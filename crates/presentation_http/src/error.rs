//! API error handling
//!
//! Maps application outcomes to status-coded JSON bodies. Internal error
//! details are withheld unless explicitly enabled.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Body used for 422 responses when the address is outside the service area
pub const OUT_OF_AREA_MESSAGE: &str = "The requested address is not within Milan city limits";

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Configure whether internal error details should be included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// HTTP status code
    pub status: u16,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message, details) = match self {
            Self::BadRequest(msg) => ("bad_request", msg, None),
            Self::UnprocessableEntity(msg) => ("unprocessable_entity", msg, None),
            Self::NotFound(msg) => ("not_found", msg, None),
            Self::MethodNotAllowed(msg) => ("method_not_allowed", msg, None),
            Self::ServiceUnavailable(msg) => ("service_unavailable", msg, None),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal server error");
                let details = should_expose_details().then_some(msg);
                ("internal_error", "Internal Server Error".to_string(), details)
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            status: status.as_u16(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::InvalidInput(msg) => {
                Self::BadRequest(format!("Invalid address parameter: {msg}"))
            },
            ApplicationError::GeocodingFailed(msg) => {
                Self::UnprocessableEntity(format!("Unable to geocode address: {msg}"))
            },
            ApplicationError::OutOfServiceArea { .. } => {
                Self::UnprocessableEntity(OUT_OF_AREA_MESSAGE.to_string())
            },
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
