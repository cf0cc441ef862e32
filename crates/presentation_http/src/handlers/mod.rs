//! HTTP request handlers

pub mod health;
pub mod stops;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method Not Allowed".to_string())
}
