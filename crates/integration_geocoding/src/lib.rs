//! Address geocoding for the stop finder
//!
//! Resolves free-form addresses to coordinates via the
//! [HERE Geocoding & Search API](https://www.here.com/docs/category/geocoding-search-v7)
//! or any endpoint answering with the same `items[].position` shape.
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines the interface, implemented by
//! [`HereGeocodingClient`]. The client only reports what the provider said;
//! service-area checks belong to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, GeocodingConfig, HereGeocodingClient};
//!
//! let config = GeocodingConfig::new("https://geocode.search.hereapi.com/v1/geocode", api_key);
//! let client = HereGeocodingClient::new(&config)?;
//!
//! let point = client.geocode("Piazza del Duomo, Milano").await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, HereGeocodingClient};
pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use models::{GeocodeItem, GeocodeResponse, Position};
