//! Stop finder CLI
//!
//! Command-line interface for offline lookups, configuration checks and
//! checking a running server.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::StopFinderService;
use clap::{Parser, Subcommand};
use domain::{GeoPoint, NearbyStop, NearestQuery, StopCatalogue};
use infrastructure::{AppConfig, GeocodingAdapter, LoadReport, LogFormat, init_telemetry};

/// Stop finder CLI
#[derive(Parser)]
#[command(name = "stopfinder-cli")]
#[command(author, version, about = "Find Milan public transport stops near an address", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stops near a coordinate, without geocoding
    Nearby {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,

        /// Search radius in meters
        #[arg(short, long, default_value_t = NearestQuery::DEFAULT_MAX_DISTANCE_METERS)]
        radius: u64,

        /// Maximum number of stops
        #[arg(short, long, default_value_t = NearestQuery::DEFAULT_MAX_RESULTS)]
        limit: usize,
    },

    /// Geocode an address and list the stops near it
    Stops {
        /// Free-text address
        address: String,

        /// Search radius in meters
        #[arg(short, long, default_value_t = NearestQuery::DEFAULT_MAX_DISTANCE_METERS)]
        radius: u64,

        /// Maximum number of stops
        #[arg(short, long, default_value_t = NearestQuery::DEFAULT_MAX_RESULTS)]
        limit: usize,
    },

    /// Load and validate the configuration and stop datasets
    CheckConfig,

    /// Check a running server (exit code reflects readiness)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:4567")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Render one result line
fn format_stop(nearby: &NearbyStop) -> String {
    let stop = &nearby.stop;
    format!(
        "{:>5} m  {:<10} {}  [{}]",
        nearby.distance_meters,
        stop.code.as_str(),
        stop.description,
        stop.available_lines.join(",")
    )
}

fn print_stops(stops: &[NearbyStop]) {
    if stops.is_empty() {
        println!("No stops found near the given address");
        return;
    }
    for nearby in stops {
        println!("{}", format_stop(nearby));
    }
}

fn print_report(report: &LoadReport) {
    for batch in &report.batches {
        match &batch.error {
            Some(error) => println!("  {:<8} FAILED {} ({error})", batch.name, batch.path.display()),
            None => println!(
                "  {:<8} {} stops, {} rejected ({})",
                batch.name,
                batch.loaded,
                batch.rejected,
                batch.path.display()
            ),
        }
    }
    println!("  total    {} stops", report.total_loaded());
}

async fn load_catalogue(config: &AppConfig) -> anyhow::Result<(StopCatalogue, LoadReport)> {
    let catalogue_config = config.catalogue.clone();
    tokio::task::spawn_blocking(move || infrastructure::load_catalogue(&catalogue_config))
        .await
        .context("catalogue loading task failed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(log_filter_from_verbosity(cli.verbose), LogFormat::Text)?;

    match cli.command {
        Commands::Nearby {
            lat,
            lng,
            radius,
            limit,
        } => {
            let point = GeoPoint::new(lat, lng)?;
            let config = AppConfig::load_from(cli.config.as_deref())?;
            let (catalogue, _) = load_catalogue(&config).await?;
            let query = NearestQuery::new(radius, limit);

            print_stops(&catalogue.search(&point, &query));
        },

        Commands::Stops {
            address,
            radius,
            limit,
        } => {
            let config = AppConfig::load_validated(cli.config.as_deref())?;
            let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
            let (catalogue, _) = load_catalogue(&config).await?;
            let service = StopFinderService::new(Arc::new(geocoder), Arc::new(catalogue))
                .with_query(NearestQuery::new(radius, limit));

            let stops = service.stops_near_address(&address).await?;
            print_stops(&stops);
        },

        Commands::CheckConfig => {
            let config = AppConfig::load_validated(cli.config.as_deref())?;
            println!("Configuration OK");
            println!("  server     {}", config.server.bind_address());
            println!("  geocoding  {}", config.geocoding.base_url);

            let (_, report) = load_catalogue(&config).await?;
            println!("Stop datasets:");
            print_report(&report);

            if report.has_failures() {
                anyhow::bail!("one or more stop datasets failed to load");
            }
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(&url, "/ready")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("Ready");
                },
                Ok(resp) => {
                    println!("Not ready: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unreachable: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::Stop;

    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn log_filter_verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        assert_eq!(
            endpoint_url("http://localhost:4567/", "/ready"),
            "http://localhost:4567/ready"
        );
        assert_eq!(
            endpoint_url("https://stops.example.com", "/ready"),
            "https://stops.example.com/ready"
        );
    }

    #[test]
    fn nearby_uses_default_radius_and_limit() {
        let cli = parse_args(&["stopfinder-cli", "nearby", "45.4640", "9.1896"]).unwrap();
        let Commands::Nearby {
            lat,
            lng,
            radius,
            limit,
        } = cli.command
        else {
            panic!("expected nearby");
        };
        assert!((lat - 45.4640).abs() < 1e-9);
        assert!((lng - 9.1896).abs() < 1e-9);
        assert_eq!(radius, 200);
        assert_eq!(limit, 10);
    }

    #[test]
    fn nearby_accepts_overrides_and_negative_longitude() {
        let cli = parse_args(&[
            "stopfinder-cli",
            "nearby",
            "40.7",
            "-74.0",
            "--radius",
            "500",
            "--limit",
            "3",
        ])
        .unwrap();
        let Commands::Nearby {
            lng, radius, limit, ..
        } = cli.command
        else {
            panic!("expected nearby");
        };
        assert!((lng + 74.0).abs() < 1e-9);
        assert_eq!(radius, 500);
        assert_eq!(limit, 3);
    }

    #[test]
    fn nearby_rejects_non_numeric_coordinates() {
        assert!(parse_args(&["stopfinder-cli", "nearby", "north", "9.19"]).is_err());
    }

    #[test]
    fn stops_takes_address() {
        let cli = parse_args(&["stopfinder-cli", "-vv", "stops", "Piazza del Duomo"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Stops {
            address,
            radius,
            limit,
        } = cli.command
        else {
            panic!("expected stops");
        };
        assert_eq!(address, "Piazza del Duomo");
        assert_eq!(radius, 200);
        assert_eq!(limit, 10);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = parse_args(&["stopfinder-cli", "check-config", "--config", "/etc/stops.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/stops.toml")));
    }

    #[test]
    fn health_default_url() {
        let cli = parse_args(&["stopfinder-cli", "health"]).unwrap();
        assert!(matches!(cli.command, Commands::Health { ref url } if url == "http://localhost:4567"));
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(parse_args(&["stopfinder-cli"]).is_err());
    }

    #[test]
    fn format_stop_shows_distance_code_and_lines() {
        let nearby = NearbyStop {
            stop: Stop::new(
                "11390",
                "P.za Duomo",
                vec!["1".to_string(), "12".to_string()],
                GeoPoint::milan_duomo(),
            ),
            distance_meters: 38,
        };
        assert_eq!(format_stop(&nearby), "   38 m  11390      P.za Duomo  [1,12]");
    }
}
