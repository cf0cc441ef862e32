//! Stop finder HTTP presentation layer
//!
//! This crate provides the HTTP API answering "which stops are near this
//! address".

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_app, create_router};
pub use state::AppState;
