//! Geographic point value object and great-circle distance

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Mean Earth radius in meters used for haversine distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A geographic point with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat")]
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lng")]
    longitude: f64,
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is not finite,
    /// latitude is not in [-90, 90] or longitude is not in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without validation (for trusted constants)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180].
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Distance to another point in whole meters
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> u64 {
        haversine_distance(self, other)
    }

    /// Piazza del Duomo, Milan
    #[must_use]
    pub const fn milan_duomo() -> Self {
        Self::new_unchecked(45.4640, 9.1896)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two points in meters, rounded to the nearest meter
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// Halfway cases round away from zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> u64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (lat1.cos() * lat2.cos()).mul_add(
        (delta_lon / 2.0).sin().powi(2),
        (delta_lat / 2.0).sin().powi(2),
    );
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    // c is never negative, so the cast only drops the fractional part left by round()
    (EARTH_RADIUS_METERS * c).round() as u64
}
