//! Application services

mod stop_finder_service;

pub use stop_finder_service::{ADDRESS_REQUIRED, StopFinderService};
