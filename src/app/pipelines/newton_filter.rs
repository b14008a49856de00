use crate::core::etl::read_byte_headers;
use crate::core::{Pipeline, Result, RunSummary};
use crate::domain::municipality::is_newton_station;
use csv::ByteRecord;
use std::io;

/// Keeps only trips that start or end at a Newton station. Rows pass through
/// as raw bytes with the input's column order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonFilter;

impl NewtonFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn matches(&self, start_station_id: &[u8], end_station_id: &[u8]) -> bool {
        is_newton_station(start_station_id) || is_newton_station(end_station_id)
    }
}

fn byte_column_index(headers: &ByteRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == name.as_bytes())
        .map(|(idx, _)| idx)
        .last()
}

fn byte_field(row: &ByteRecord, idx: Option<usize>) -> &[u8] {
    idx.and_then(|i| row.get(i)).unwrap_or(b"")
}

impl Pipeline for NewtonFilter {
    fn name(&self) -> &str {
        "filter-newton"
    }

    fn run<R: io::Read, W: io::Write>(
        &self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary> {
        let headers = read_byte_headers(reader)?;
        writer.write_byte_record(&headers)?;

        let start_idx = byte_column_index(&headers, "start_station_id");
        let end_idx = byte_column_index(&headers, "end_station_id");
        if start_idx.is_none() && end_idx.is_none() {
            tracing::warn!("⚠️ Input has no station id columns, no rows will match");
        }

        let mut summary = RunSummary::default();
        let mut row = ByteRecord::new();
        while reader.read_byte_record(&mut row)? {
            summary.rows_read += 1;
            if self.matches(byte_field(&row, start_idx), byte_field(&row, end_idx)) {
                writer.write_byte_record(&row)?;
                summary.rows_written += 1;
            }
        }

        Ok(summary)
    }
}
