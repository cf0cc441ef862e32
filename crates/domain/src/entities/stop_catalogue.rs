//! Stop catalogue and proximity search
//!
//! The catalogue is built once at startup from one or more stop batches and is
//! read-only afterwards. Searches never mutate it, so a single instance can be
//! shared between concurrent requests without locking.

use serde::Serialize;

use super::Stop;
use crate::value_objects::GeoPoint;

/// Radius and result cap for a proximity search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestQuery {
    /// Maximum distance from the query point, inclusive
    pub max_distance_meters: u64,
    /// Maximum number of stops returned
    pub max_results: usize,
}

impl NearestQuery {
    /// Default search radius
    pub const DEFAULT_MAX_DISTANCE_METERS: u64 = 200;
    /// Default result cap
    pub const DEFAULT_MAX_RESULTS: usize = 10;

    /// Create a query with explicit limits
    #[must_use]
    pub const fn new(max_distance_meters: u64, max_results: usize) -> Self {
        Self {
            max_distance_meters,
            max_results,
        }
    }

    /// Set the search radius
    #[must_use]
    pub const fn with_max_distance(mut self, meters: u64) -> Self {
        self.max_distance_meters = meters;
        self
    }

    /// Set the result cap
    #[must_use]
    pub const fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

impl Default for NearestQuery {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DISTANCE_METERS, Self::DEFAULT_MAX_RESULTS)
    }
}

/// A stop returned by a proximity search together with its distance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStop {
    /// The matching stop
    #[serde(flatten)]
    pub stop: Stop,
    /// Distance from the query point in meters
    pub distance_meters: u64,
}

/// In-memory, load-once collection of stops
#[derive(Debug, Clone, Default)]
pub struct StopCatalogue {
    stops: Vec<Stop>,
}

impl StopCatalogue {
    /// Create a catalogue from stops in load order
    #[must_use]
    pub const fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Merge batches into one catalogue, keeping batch order then record order
    #[must_use]
    pub fn merge<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Stop>>,
    {
        Self {
            stops: batches.into_iter().flatten().collect(),
        }
    }

    /// Number of stops
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the catalogue holds no stops
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops in load order
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Find the stops within `max_distance_meters` of `point`
    ///
    /// Results are sorted by ascending distance and truncated to `max_results`.
    /// Stops at the same (rounded) distance keep their catalogue order.
    #[must_use]
    pub fn find_nearest(
        &self,
        point: &GeoPoint,
        max_distance_meters: u64,
        max_results: usize,
    ) -> Vec<NearbyStop> {
        let mut candidates: Vec<(u64, &Stop)> = self
            .stops
            .iter()
            .map(|stop| (stop.distance_to(point), stop))
            .filter(|(distance, _)| *distance <= max_distance_meters)
            .collect();

        // sort_by_key is stable, which gives the load-order tie break
        candidates.sort_by_key(|(distance, _)| *distance);
        candidates.truncate(max_results);

        candidates
            .into_iter()
            .map(|(distance_meters, stop)| NearbyStop {
                stop: stop.clone(),
                distance_meters,
            })
            .collect()
    }

    /// Run a proximity search with the limits from `query`
    #[must_use]
    pub fn search(&self, point: &GeoPoint, query: &NearestQuery) -> Vec<NearbyStop> {
        self.find_nearest(point, query.max_distance_meters, query.max_results)
    }
}

impl FromIterator<Stop> for StopCatalogue {
    fn from_iter<T: IntoIterator<Item = Stop>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
