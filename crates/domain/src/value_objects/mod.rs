//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geo_point;
mod stop_code;

pub use bounding_box::BoundingBox;
pub use geo_point::{EARTH_RADIUS_METERS, GeoPoint, haversine_distance};
pub use stop_code::StopCode;
