//! Domain layer for the stop finder
//!
//! Contains the stop model, the catalogue with its proximity search, the
//! service-area bounding box and the great-circle distance function.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{DomainError, RecordError};
pub use value_objects::*;
