use crate::core::etl::read_headers;
use crate::core::schema::column_index;
use crate::core::{Pipeline, Result, RunSummary};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::io;

pub const DURATION_COLUMN: &str = "duration_minutes";
pub const COORDINATE_COLUMNS: [&str; 4] = ["start_lat", "start_lng", "end_lat", "end_lng"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO-8601 local date-time, with either `T` or a space as separator. A bare
/// date is read as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// 以分鐘計的行程時間，四捨六入五成雙
pub fn duration_minutes(started_at: NaiveDateTime, ended_at: NaiveDateTime) -> Option<i64> {
    let micros = (ended_at - started_at).num_microseconds()?;
    let minutes = micros as f64 / 1_000_000.0 / 60.0;
    Some(minutes.round_ties_even() as i64)
}

/// 座標統一為小數點後五位，無法解析時保留原值
pub fn format_coordinate(value: &str) -> Option<String> {
    let parsed: f64 = value.trim().parse().ok()?;
    parsed.is_finite().then(|| format!("{:.5}", parsed))
}

#[derive(Debug, Clone, Default)]
struct CleanerColumns {
    started_at: Option<usize>,
    ended_at: Option<usize>,
    /// Existing column to overwrite; `None` means the value is appended.
    duration: Option<usize>,
    coordinates: Vec<usize>,
}

/// Normalizes raw trip exports: timestamps, a derived `duration_minutes`
/// column and five-decimal coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripCleaner;

impl TripCleaner {
    pub fn new() -> Self {
        Self
    }

    fn resolve(headers: &StringRecord) -> CleanerColumns {
        CleanerColumns {
            started_at: column_index(headers, "started_at"),
            ended_at: column_index(headers, "ended_at"),
            duration: column_index(headers, DURATION_COLUMN),
            coordinates: COORDINATE_COLUMNS
                .iter()
                .filter_map(|name| column_index(headers, name))
                .collect(),
        }
    }

    /// 整理單列資料，回傳新的欄位值
    fn clean_row(columns: &CleanerColumns, row: &StringRecord) -> Vec<String> {
        let mut fields: Vec<String> = row.iter().map(str::to_string).collect();

        let mut normalize = |idx: Option<usize>| -> Option<NaiveDateTime> {
            let idx = idx?;
            let parsed = parse_timestamp(&fields[idx])?;
            fields[idx] = parsed.format(TIMESTAMP_FORMAT).to_string();
            Some(parsed)
        };
        let started_at = normalize(columns.started_at);
        let ended_at = normalize(columns.ended_at);

        let duration = match (started_at, ended_at) {
            (Some(start), Some(end)) => duration_minutes(start, end)
                .map(|m| m.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        match columns.duration {
            Some(idx) => fields[idx] = duration,
            None => fields.push(duration),
        }

        for &idx in &columns.coordinates {
            if let Some(formatted) = format_coordinate(&fields[idx]) {
                fields[idx] = formatted;
            }
        }

        fields
    }
}

impl Pipeline for TripCleaner {
    fn name(&self) -> &str {
        "clean-trips"
    }

    fn run<R: io::Read, W: io::Write>(
        &self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary> {
        let headers = read_headers(reader)?;
        let columns = Self::resolve(&headers);

        if columns.duration.is_some() {
            writer.write_record(&headers)?;
        } else {
            writer.write_record(headers.iter().chain(std::iter::once(DURATION_COLUMN)))?;
        }

        let mut summary = RunSummary::default();
        let mut row = StringRecord::new();
        while reader.read_record(&mut row)? {
            summary.rows_read += 1;
            writer.write_record(Self::clean_row(&columns, &row))?;
            summary.rows_written += 1;
        }

        Ok(summary)
    }
}
