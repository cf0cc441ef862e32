//! File-based stop batch loader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use domain::{Stop, StopBatch, StopCatalogue};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::config::CatalogueConfig;

/// Why a whole batch could not be loaded
#[derive(Debug, Error)]
pub enum CatalogueLoadError {
    /// The batch file could not be opened or read
    #[error("Failed to read stop batch {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The batch is not a `{fields, records}` document
    #[error("Failed to parse stop batch {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of loading one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Batch name (e.g. "surface")
    pub name: String,
    /// Source file
    pub path: PathBuf,
    /// Stops added to the catalogue
    pub loaded: usize,
    /// Records skipped
    pub rejected: usize,
    /// Batch-level failure, if the batch could not be loaded at all
    pub error: Option<String>,
}

/// Outcome of loading every batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// One entry per batch, in load order
    pub batches: Vec<BatchReport>,
}

impl LoadReport {
    /// Total stops loaded across batches
    #[must_use]
    pub fn total_loaded(&self) -> usize {
        self.batches.iter().map(|b| b.loaded).sum()
    }

    /// Whether any batch failed outright
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.batches.iter().any(|b| b.error.is_some())
    }
}

/// Parse a batch from any JSON reader
pub fn parse_batch(reader: impl Read) -> Result<StopBatch, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Load one batch file and map its records into stops
///
/// Records that cannot be mapped are logged and skipped. The second tuple
/// element is the number of skipped records.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_batch(name: &str, path: &Path) -> Result<(Vec<Stop>, usize), CatalogueLoadError> {
    let file = File::open(path).map_err(|source| CatalogueLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let batch = parse_batch(BufReader::new(file)).map_err(|source| CatalogueLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = batch.into_outcome();

    if !outcome.has_description_field {
        warn!(
            batch = name,
            "Batch declares neither 'nome' nor 'ubicazione'; descriptions set to 'Unknown'"
        );
    }

    for rejected in &outcome.rejected {
        warn!(batch = name, error = %rejected, "Skipping stop record");
    }

    info!(
        batch = name,
        loaded = outcome.stops.len(),
        rejected = outcome.rejected.len(),
        "Stop batch loaded"
    );

    Ok((outcome.stops, outcome.rejected.len()))
}

/// Load the configured surface and metro batches into one catalogue
pub fn load_catalogue(config: &CatalogueConfig) -> (StopCatalogue, LoadReport) {
    load_catalogue_from(config.sources())
}

/// Load named batches in order, isolating failures per batch
pub fn load_catalogue_from<I, N, P>(sources: I) -> (StopCatalogue, LoadReport)
where
    I: IntoIterator<Item = (N, P)>,
    N: Into<String>,
    P: Into<PathBuf>,
{
    let mut batches = Vec::new();
    let mut report = LoadReport::default();

    for (name, path) in sources {
        let name = name.into();
        let path = path.into();

        match load_batch(&name, &path) {
            Ok((stops, rejected)) => {
                report.batches.push(BatchReport {
                    name,
                    path,
                    loaded: stops.len(),
                    rejected,
                    error: None,
                });
                batches.push(stops);
            },
            Err(e) => {
                error!(batch = %name, error = %e, "Stop batch failed to load; continuing without it");
                report.batches.push(BatchReport {
                    name,
                    path,
                    loaded: 0,
                    rejected: 0,
                    error: Some(e.to_string()),
                });
            },
        }
    }

    let catalogue = StopCatalogue::merge(batches);
    info!(stops = catalogue.len(), "Stop catalogue ready");
    (catalogue, report)
}
