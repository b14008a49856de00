pub mod app;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::{AggregateMode, NewtonFilter, StationExtractor, TripAggregator, TripCleaner};
pub use core::etl::EtlEngine;
pub use domain::ports::{Pipeline, RunSummary};
pub use utils::error::{EtlError, Result};
