//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Stop lookup
        .route("/atm/stops", get(handlers::stops::stops_near_address))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        // Attach state
        .with_state(state)
}

/// Router with tracing and CORS applied per server config
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    let app = create_router(state).layer(TraceLayer::new_for_http());
    match cors_layer(server) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// Build the CORS layer, or `None` when CORS is disabled
pub fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    let layer = if server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };
    Some(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_disabled_yields_no_layer() {
        let server = ServerConfig {
            cors_enabled: false,
            ..ServerConfig::default()
        };
        assert!(cors_layer(&server).is_none());
    }

    #[test]
    fn cors_enabled_by_default() {
        assert!(cors_layer(&ServerConfig::default()).is_some());
    }
}
