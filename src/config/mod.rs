pub mod cli;

pub use cli::{AggregateArgs, CleanTripsArgs, ExtractStationsArgs, FilterNewtonArgs};
