pub mod etl;
pub mod schema;

pub use crate::domain::ports::{Pipeline, RunSummary};
pub use crate::utils::error::Result;
