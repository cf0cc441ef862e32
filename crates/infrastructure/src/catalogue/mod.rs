//! Stop catalogue loading
//!
//! Reads the published stop batches from disk and merges them into a
//! [`domain::StopCatalogue`]. Every batch is isolated: a batch that cannot be
//! read contributes no stops but never prevents the others from loading.

mod loader;

pub use loader::{
    BatchReport, CatalogueLoadError, LoadReport, load_batch, load_catalogue, load_catalogue_from,
    parse_batch,
};
