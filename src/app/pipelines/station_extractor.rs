use crate::core::etl::read_headers;
use crate::core::schema::{field, Role, RoleColumns, TripSchema};
use crate::core::{Pipeline, Result, RunSummary};
use crate::domain::model::{StationAttribute, StationDirectory};
use csv::StringRecord;
use std::io;

/// Builds a deduplicated station directory from trip records and writes it
/// sorted by station id.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationExtractor;

impl StationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 讀完整個輸入並建立站點目錄，回傳目錄與讀取列數
    pub fn collect<R: io::Read>(
        &self,
        reader: &mut csv::Reader<R>,
    ) -> Result<(StationDirectory, usize)> {
        let headers = read_headers(reader)?;
        let schema = TripSchema::from_headers(&headers);

        let mut directory = StationDirectory::new();
        let mut rows_read = 0;
        let mut filled = 0;
        for record in reader.records() {
            let row = record?;
            rows_read += 1;
            for role in Role::ALL {
                filled += fold_role(&mut directory, schema.role(role), &row);
            }
        }

        tracing::debug!(
            "Collected {} stations ({} attribute values) from {} trip rows",
            directory.len(),
            filled,
            rows_read
        );
        Ok((directory, rows_read))
    }

    pub fn write<W: io::Write>(
        &self,
        directory: &StationDirectory,
        writer: &mut csv::Writer<W>,
    ) -> Result<usize> {
        // 沒有任何站點時連表頭都不輸出
        if directory.is_empty() {
            tracing::warn!("⚠️ No stations found in input, nothing to write");
            return Ok(0);
        }

        let columns = directory.columns();
        writer.write_record(&columns)?;

        for (station_id, station) in directory.iter() {
            let row = std::iter::once(station_id).chain(
                columns[1..]
                    .iter()
                    .map(|column| station.get(column).unwrap_or("")),
            );
            writer.write_record(row)?;
        }

        Ok(directory.len())
    }
}

/// Start-role and end-role columns of one row feed the same directory:
/// attribute columns first, then the coordinate columns. Returns how many
/// empty slots were filled.
fn fold_role(directory: &mut StationDirectory, columns: &RoleColumns, row: &StringRecord) -> usize {
    let Some(station_id) = columns.station_id(row) else {
        return 0;
    };

    let station = directory.observe(station_id);
    let mut filled = 0;
    for (idx, attribute) in &columns.attributes {
        filled += usize::from(station.record(attribute, field(row, Some(*idx))));
    }
    filled += usize::from(station.record(&StationAttribute::Latitude, field(row, columns.latitude)));
    filled += usize::from(station.record(&StationAttribute::Longitude, field(row, columns.longitude)));
    filled
}

impl Pipeline for StationExtractor {
    fn name(&self) -> &str {
        "extract-stations"
    }

    fn run<R: io::Read, W: io::Write>(
        &self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary> {
        let (directory, rows_read) = self.collect(reader)?;
        let rows_written = self.write(&directory, writer)?;
        Ok(RunSummary {
            rows_read,
            rows_written,
        })
    }
}
