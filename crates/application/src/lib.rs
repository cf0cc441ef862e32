//! Application layer - Use cases and orchestration
//!
//! Defines the geocoding port and the stop finder service that combines it
//! with the in-memory stop catalogue.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
