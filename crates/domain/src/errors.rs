//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude ranges
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Why a single catalogue record could not be turned into a stop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// A field required by the mapping is not declared or has no value
    #[error("record {record}: missing field '{field}'")]
    MissingField { record: usize, field: &'static str },

    /// A field holds a value of the wrong shape (e.g. a coordinate that is not a number)
    #[error("record {record}: invalid value for field '{field}': {reason}")]
    InvalidField {
        record: usize,
        field: &'static str,
        reason: String,
    },
}

impl RecordError {
    /// Position of the offending record within its batch
    #[must_use]
    pub const fn record(&self) -> usize {
        match self {
            Self::MissingField { record, .. } | Self::InvalidField { record, .. } => *record,
        }
    }
}
