//! Stop lookup handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::NearbyStop;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Message returned alongside an empty result
pub const NO_STOPS_MESSAGE: &str = "No stops found near the given address";

/// Query string of `GET /atm/stops`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopsQuery {
    /// Free-text address to search around
    #[serde(default)]
    pub address: Option<String>,
}

/// Body of a successful stop lookup
#[derive(Debug, Clone, Serialize)]
pub struct StopsResponse {
    /// Set only when no stops were found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Stops ordered by ascending distance
    pub stops: Vec<NearbyStop>,
}

impl From<Vec<NearbyStop>> for StopsResponse {
    fn from(stops: Vec<NearbyStop>) -> Self {
        let message = stops.is_empty().then(|| NO_STOPS_MESSAGE.to_string());
        Self { message, stops }
    }
}

/// Find the stops near an address
#[instrument(skip(state))]
pub async fn stops_near_address(
    State(state): State<AppState>,
    Query(query): Query<StopsQuery>,
) -> Result<Json<StopsResponse>, ApiError> {
    let address = query.address.unwrap_or_default();
    let stops = state.stop_finder.stops_near_address(&address).await?;
    info!(found = stops.len(), "Stop lookup answered");
    Ok(Json(stops.into()))
}
