use crate::utils::error::Result;
use std::io;

/// Row counts reported by a finished pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
}

/// A single-pass stdin-to-stdout transformation over trip records. The engine
/// owns reader/writer construction; a pipeline writes its own header row.
pub trait Pipeline {
    fn name(&self) -> &str;

    fn run<R: io::Read, W: io::Write>(
        &self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary>;
}
