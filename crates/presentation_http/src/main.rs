//! Stop finder HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::Context;
use application::StopFinderService;
use infrastructure::{AppConfig, GeocodingAdapter, LogFormat, init_telemetry, load_catalogue};
use presentation_http::{error::set_expose_internal_errors, routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration problems are fatal: there is no useful default API key
    let config = AppConfig::load_validated(None).context("Failed to load configuration")?;

    let log_format: LogFormat = config.server.log_format.parse()?;
    init_telemetry(&config.telemetry.log_filter, log_format)?;

    info!("Stop finder v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        geocoding = %config.geocoding.base_url,
        "Configuration loaded"
    );

    set_expose_internal_errors(config.server.expose_internal_errors);

    // Load the catalogue once; it is read-only for the rest of the process
    let catalogue_config = config.catalogue.clone();
    let (catalogue, report) =
        tokio::task::spawn_blocking(move || load_catalogue(&catalogue_config)).await?;
    if catalogue.is_empty() {
        warn!("Stop catalogue is empty; every lookup will return no stops");
    }
    if report.has_failures() {
        warn!(
            loaded = report.total_loaded(),
            "Some stop batches failed to load"
        );
    }

    let geocoder = GeocodingAdapter::from_config(&config.geocoding)
        .context("Failed to initialize geocoding")?;

    let stop_finder = StopFinderService::new(Arc::new(geocoder), Arc::new(catalogue));

    let state = AppState {
        stop_finder: Arc::new(stop_finder),
    };

    let app = routes::create_app(state, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let shutdown_started = Arc::new(Notify::new());

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&shutdown_started), shutdown_timeout))
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            shutdown_started.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!("Shutdown timeout elapsed, dropping open connections");
        }
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(started: Arc<Notify>, timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    started.notify_one();
}
