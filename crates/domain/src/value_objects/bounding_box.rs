//! Rectangular service area

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A latitude/longitude rectangle, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge (minimum latitude)
    pub south: f64,
    /// Northern edge (maximum latitude)
    pub north: f64,
    /// Western edge (minimum longitude)
    pub west: f64,
    /// Eastern edge (maximum longitude)
    pub east: f64,
}

impl BoundingBox {
    /// Milan city limits as served by the stop catalogue
    pub const MILAN: Self = Self {
        south: 45.390,
        north: 45.535,
        west: 9.070,
        east: 9.280,
    };

    /// Check whether a coordinate pair lies inside the box
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }

    /// Check whether a point lies inside the box
    #[must_use]
    pub fn contains_point(&self, point: &GeoPoint) -> bool {
        self.contains(point.latitude(), point.longitude())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::MILAN
    }
}
