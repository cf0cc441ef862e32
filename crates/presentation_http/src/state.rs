//! Application state shared across handlers

use std::sync::Arc;

use application::StopFinderService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stop lookup service
    pub stop_finder: Arc<StopFinderService>,
}
