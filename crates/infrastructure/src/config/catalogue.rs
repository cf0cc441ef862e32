//! Stop catalogue data sources.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Locations of the two stop datasets merged into the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueConfig {
    /// Surface (bus/tram) stops, loaded first
    #[serde(default = "default_surface_stops_path")]
    pub surface_stops_path: PathBuf,

    /// Metro stops, loaded second
    #[serde(default = "default_metro_stops_path")]
    pub metro_stops_path: PathBuf,
}

fn default_surface_stops_path() -> PathBuf {
    PathBuf::from("data/ds534_tpl_fermate.json")
}

fn default_metro_stops_path() -> PathBuf {
    PathBuf::from("data/ds535_tpl_metrofermate.json")
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            surface_stops_path: default_surface_stops_path(),
            metro_stops_path: default_metro_stops_path(),
        }
    }
}

impl CatalogueConfig {
    /// Named sources in load order
    #[must_use]
    pub fn sources(&self) -> [(&'static str, PathBuf); 2] {
        [
            ("surface", self.surface_stops_path.clone()),
            ("metro", self.metro_stops_path.clone()),
        ]
    }
}
