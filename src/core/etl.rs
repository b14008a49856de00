use crate::core::{Pipeline, RunSummary};
use crate::utils::error::{EtlError, Result};
use csv::{ByteRecord, StringRecord};
use std::io;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run<R: io::Read, W: io::Write>(&self, input: R, output: W) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::debug!("🚀 Starting {} pipeline", self.pipeline.name());

        let mut reader = csv_reader(input);
        let mut writer = csv_writer(output);

        // 失敗前已寫出的資料列仍要送出，回報最先發生的錯誤
        let outcome = self.pipeline.run(&mut reader, &mut writer);
        let flushed = writer.flush();
        let summary = outcome?;
        flushed?;

        tracing::info!(
            "✅ {} finished: {} rows read, {} rows written in {:?}",
            self.pipeline.name(),
            summary.rows_read,
            summary.rows_written,
            started.elapsed()
        );
        Ok(summary)
    }

    pub fn run_stdio(&self) -> Result<RunSummary> {
        self.run(io::stdin().lock(), io::stdout().lock())
    }
}

/// 嚴格模式：每列欄位數必須與表頭相同
pub fn csv_reader<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input)
}

/// Header rows are written explicitly by each pipeline.
pub fn csv_writer<W: io::Write>(output: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(output)
}

pub fn read_headers<R: io::Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord> {
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(EtlError::MissingHeaderError);
    }
    Ok(headers)
}

pub fn read_byte_headers<R: io::Read>(reader: &mut csv::Reader<R>) -> Result<ByteRecord> {
    let headers = reader.byte_headers()?.clone();
    if headers.is_empty() {
        return Err(EtlError::MissingHeaderError);
    }
    Ok(headers)
}
