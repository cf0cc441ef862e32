//! Transit stop entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, StopCode};

/// A single boarding point (surface or metro) with a fixed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Dataset identifier
    pub code: StopCode,
    /// Human-readable name or location
    pub description: String,
    /// Lines serving this stop, in source order
    pub available_lines: Vec<String>,
    /// Where the stop is
    pub position: GeoPoint,
}

impl Stop {
    /// Create a new stop
    pub fn new(
        code: impl Into<StopCode>,
        description: impl Into<String>,
        available_lines: Vec<String>,
        position: GeoPoint,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            available_lines,
            position,
        }
    }

    /// Split a comma-separated line field into line names
    ///
    /// Entries are kept verbatim: blanks survive and nothing is deduplicated.
    #[must_use]
    pub fn split_lines(field: &str) -> Vec<String> {
        field.split(',').map(str::to_string).collect()
    }

    /// Distance from this stop to a point in meters
    #[must_use]
    pub fn distance_to(&self, point: &GeoPoint) -> u64 {
        self.position.distance_to(point)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stop() -> Stop {
        Stop::new(
            "11390",
            "P.za Duomo",
            Stop::split_lines("1,2,12"),
            GeoPoint::new_unchecked(45.4642, 9.19),
        )
    }

    #[test]
    fn split_lines_keeps_order() {
        assert_eq!(Stop::split_lines("90,91,92"), vec!["90", "91", "92"]);
    }

    #[test]
    fn split_lines_keeps_blank_and_duplicate_entries() {
        assert_eq!(Stop::split_lines("1,,1"), vec!["1", "", "1"]);
        assert_eq!(Stop::split_lines(""), vec![""]);
    }

    #[test]
    fn split_lines_does_not_trim() {
        assert_eq!(Stop::split_lines("M1, M3"), vec!["M1", " M3"]);
    }

    #[test]
    fn display_shows_code_and_description() {
        assert_eq!(sample_stop().to_string(), "11390 P.za Duomo");
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(sample_stop()).unwrap();
        assert_eq!(json["code"], "11390");
        assert_eq!(json["availableLines"][2], "12");
        assert!((json["position"]["lat"].as_f64().unwrap() - 45.4642).abs() < 1e-9);
    }

    #[test]
    fn distance_to_own_position_is_zero() {
        let stop = sample_stop();
        assert_eq!(stop.distance_to(&stop.position), 0);
    }
}
