//! Domain entities - Stops and the catalogue that owns them

mod stop;
mod stop_batch;
mod stop_catalogue;

pub use stop::Stop;
pub use stop_batch::{
    BatchOutcome, FieldDeclaration, FieldMapping, StopBatch, UNKNOWN_DESCRIPTION, columns,
};
pub use stop_catalogue::{NearbyStop, NearestQuery, StopCatalogue};
