//! Geocoding API response models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level geocoding response
///
/// Candidates stay raw; only the first one is ever decoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Candidates ordered by relevance; absent when nothing matched
    #[serde(default)]
    pub items: Vec<Value>,
}

impl GeocodeResponse {
    /// Decode the best candidate, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the first candidate has no usable `position`.
    pub fn first_item(&self) -> Result<Option<GeocodeItem>, serde_json::Error> {
        self.items
            .first()
            .map(GeocodeItem::deserialize)
            .transpose()
    }
}

/// A single geocoding candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeItem {
    /// Display label of the match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Resolved coordinates
    pub position: Position,
}

/// WGS84 coordinates of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_here_response() {
        let response = parse(
            r#"{
            "items": [
                {
                    "title": "Piazza del Duomo, 20122 Milano MI, Italia",
                    "id": "here:af:street:abc",
                    "resultType": "street",
                    "position": { "lat": 45.46416, "lng": 9.19199 },
                    "mapView": { "west": 9.19, "south": 45.46, "east": 9.2, "north": 45.47 }
                },
                {
                    "position": { "lat": 45.0, "lng": 9.0 }
                }
            ]
        }"#,
        );
        assert_eq!(response.items.len(), 2);

        let item = response.first_item().unwrap().unwrap();
        assert_eq!(
            item.position,
            Position {
                lat: 45.46416,
                lng: 9.19199
            }
        );
        assert!(item.title.as_deref().unwrap().contains("Duomo"));
    }

    #[test]
    fn test_empty_items() {
        assert!(parse(r#"{"items": []}"#).first_item().unwrap().is_none());
    }

    #[test]
    fn test_missing_items_is_empty() {
        let response = parse("{}");
        assert!(response.items.is_empty());
        assert!(response.first_item().unwrap().is_none());
    }

    #[test]
    fn test_later_candidates_are_not_decoded() {
        let response = parse(
            r#"{"items": [
                {"position": {"lat": 45.47, "lng": 9.18}},
                {"title": "area without position"},
                {"position": {"lat": "north", "lng": null}}
            ]}"#,
        );
        let item = response.first_item().unwrap().unwrap();
        assert_eq!(item.position, Position { lat: 45.47, lng: 9.18 });
    }

    #[test]
    fn test_first_candidate_without_position_rejected() {
        let response = parse(r#"{"items": [{"title": "area without position"}]}"#);
        assert!(response.first_item().is_err());
    }

    #[test]
    fn test_non_numeric_position_rejected() {
        let response = parse(r#"{"items": [{"position": {"lat": "north", "lng": 9.19}}]}"#);
        assert!(response.first_item().is_err());
    }
}
