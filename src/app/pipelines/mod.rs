pub mod newton_filter;
pub mod station_extractor;
pub mod trip_aggregator;
pub mod trip_cleaner;

pub use newton_filter::NewtonFilter;
pub use station_extractor::StationExtractor;
pub use trip_aggregator::{AggregateMode, TripAggregator};
pub use trip_cleaner::TripCleaner;
