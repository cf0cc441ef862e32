//! Stop identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stop as published in the source dataset
///
/// Codes are expected to be unique within a catalogue but nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopCode(String);

impl StopCode {
    /// Create a stop code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for StopCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}
