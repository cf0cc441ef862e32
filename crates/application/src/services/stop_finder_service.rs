//! Stop finder service
//!
//! Answers "which stops are near this address": geocodes the address through
//! the [`GeocodingPort`] and runs a proximity search on the stop catalogue.

use std::{fmt, sync::Arc};

use domain::{GeoPoint, NearbyStop, NearestQuery, StopCatalogue};
use tracing::{debug, info, instrument};

use crate::{error::ApplicationError, ports::GeocodingPort};

/// Message used when the address is missing or blank
pub const ADDRESS_REQUIRED: &str = "Address parameter is required";

/// Stop finder service composing geocoding and the stop catalogue
pub struct StopFinderService {
    geocoder: Arc<dyn GeocodingPort>,
    catalogue: Arc<StopCatalogue>,
    query: NearestQuery,
}

impl fmt::Debug for StopFinderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopFinderService")
            .field("stops", &self.catalogue.len())
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl StopFinderService {
    /// Create a service using the default search radius and result cap
    pub fn new(geocoder: Arc<dyn GeocodingPort>, catalogue: Arc<StopCatalogue>) -> Self {
        Self {
            geocoder,
            catalogue,
            query: NearestQuery::default(),
        }
    }

    /// Override the search limits
    #[must_use]
    pub const fn with_query(mut self, query: NearestQuery) -> Self {
        self.query = query;
        self
    }

    /// The catalogue searched by this service
    pub fn catalogue(&self) -> &StopCatalogue {
        &self.catalogue
    }

    /// Find the stops near a free-text address
    ///
    /// A blank address is rejected before any geocoding request is made. An
    /// empty result is a success, not an error.
    #[instrument(skip(self))]
    pub async fn stops_near_address(
        &self,
        address: &str,
    ) -> Result<Vec<NearbyStop>, ApplicationError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ApplicationError::InvalidInput(ADDRESS_REQUIRED.to_string()));
        }

        let point = self.geocoder.geocode(address).await?;
        debug!(%point, "Address geocoded");

        let stops = self.stops_near_point(&point);
        info!(found = stops.len(), "Stop search completed");
        Ok(stops)
    }

    /// Find the stops near a known point using the configured limits
    pub fn stops_near_point(&self, point: &GeoPoint) -> Vec<NearbyStop> {
        self.catalogue.search(point, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use domain::Stop;

    use super::*;
    use crate::ports::MockGeocodingPort;

    fn catalogue() -> Arc<StopCatalogue> {
        Arc::new(StopCatalogue::new(vec![
            Stop::new(
                "D1",
                "Duomo",
                vec!["M1".to_string(), "M3".to_string()],
                GeoPoint::new_unchecked(45.4642, 9.1900),
            ),
            Stop::new(
                "FAR",
                "Far away",
                vec!["90".to_string()],
                GeoPoint::new_unchecked(45.50, 9.30),
            ),
        ]))
    }

    fn service(mock: MockGeocodingPort) -> StopFinderService {
        StopFinderService::new(Arc::new(mock), catalogue())
    }

    #[tokio::test]
    async fn stops_near_duomo() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_geocode()
            .withf(|address| address == "Piazza del Duomo, Milano")
            .times(1)
            .returning(|_| Ok(GeoPoint::milan_duomo()));

        let stops = service(mock)
            .stops_near_address("Piazza del Duomo, Milano")
            .await
            .unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].stop.code.as_str(), "D1");
        assert_eq!(stops[0].distance_meters, 38);
    }

    #[tokio::test]
    async fn address_is_trimmed_before_geocoding() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_geocode()
            .withf(|address| address == "Via Dante")
            .times(1)
            .returning(|_| Ok(GeoPoint::milan_duomo()));

        let result = service(mock).stops_near_address("  Via Dante \n").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn blank_address_rejected_without_geocoding() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_geocode().never();
        let service = service(mock);

        for address in ["", "   ", "\t\n"] {
            let err = service.stops_near_address(address).await.unwrap_err();
            assert!(
                matches!(err, ApplicationError::InvalidInput(ref msg) if msg == ADDRESS_REQUIRED)
            );
        }
    }

    #[tokio::test]
    async fn geocoding_failure_propagates_unchanged() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_geocode()
            .returning(|_| Err(ApplicationError::GeocodingFailed("no results".to_string())));

        let err = service(mock).stops_near_address("nowhere").await.unwrap_err();
        assert!(matches!(err, ApplicationError::GeocodingFailed(_)));
    }

    #[tokio::test]
    async fn out_of_area_propagates_unchanged() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_geocode().returning(|_| {
            Err(ApplicationError::OutOfServiceArea {
                latitude: 41.9,
                longitude: 12.5,
            })
        });

        let err = service(mock).stops_near_address("Roma").await.unwrap_err();
        assert!(matches!(err, ApplicationError::OutOfServiceArea { .. }));
    }

    #[tokio::test]
    async fn no_nearby_stops_is_empty_success() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_geocode()
            .returning(|_| Ok(GeoPoint::new_unchecked(45.40, 9.10)));

        let stops = service(mock).stops_near_address("Rozzano").await.unwrap();
        assert!(stops.is_empty());
    }

    #[test]
    fn custom_query_widens_search() {
        let service = service(MockGeocodingPort::new())
            .with_query(NearestQuery::default().with_max_distance(20_000));
        let stops = service.stops_near_point(&GeoPoint::milan_duomo());
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[1].stop.code.as_str(), "FAR");
    }

    #[test]
    fn custom_query_caps_results() {
        let service = service(MockGeocodingPort::new()).with_query(NearestQuery::new(20_000, 1));
        let stops = service.stops_near_point(&GeoPoint::milan_duomo());
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].stop.code.as_str(), "D1");
    }

    #[test]
    fn debug_shows_catalogue_size() {
        let service = service(MockGeocodingPort::new());
        assert!(format!("{service:?}").contains("stops: 2"));
    }
}
