//! @ai:module:intent Report generation for round-trip results
//! @ai:module:layer infrastructure
//! @ai:module:public_api Reporter, ReportFormat, RunReport

pub mod json_report;
pub mod text;

pub use json_report::{FileReport, RunReport};
pub use text::{format_file, format_overall, format_rate};

use crate::metrics::{OverallReport, PerFileMetrics};
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// @ai:intent Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// @ai:intent Streams text results per file, or collects them for one JSON document
pub struct Reporter<W: Write> {
    out: W,
    format: ReportFormat,
    executable: PathBuf,
    files: Vec<PerFileMetrics>,
}

impl<W: Write> Reporter<W> {
    /// @ai:effects pure
    pub fn new(out: W, format: ReportFormat, executable: PathBuf) -> Self {
        Self {
            out,
            format,
            executable,
            files: Vec::new(),
        }
    }

    /// @ai:intent Report one finished file
    /// @ai:effects io
    pub fn file_done(&mut self, metrics: &PerFileMetrics) -> Result<()> {
        match self.format {
            ReportFormat::Text => {
                self.out.write_all(format_file(metrics).as_bytes())?;
                self.out.flush()?;
            }
            ReportFormat::Json => self.files.push(metrics.clone()),
        }
        Ok(())
    }

    /// @ai:intent Report the end of the batch; text prints nothing for an empty batch
    /// @ai:effects io
    pub fn finish(mut self, overall: Option<OverallReport>) -> Result<W> {
        match self.format {
            ReportFormat::Text => {
                if let Some(report) = &overall {
                    self.out.write_all(format_overall(report).as_bytes())?;
                }
            }
            ReportFormat::Json => {
                let report = RunReport::new(self.executable.clone(), &self.files, overall);
                writeln!(self.out, "{}", report.to_json()?)?;
            }
        }
        self.out.flush()?;
        Ok(self.out)
    }

    /// @ai:intent Close a batch stopped by a failure
    /// @ai:post JSON still gets one document holding the files finished so far
    /// @ai:effects io
    pub fn abort(mut self) -> Result<W> {
        if self.format == ReportFormat::Json {
            let report = RunReport::partial(self.executable.clone(), &self.files);
            writeln!(self.out, "{}", report.to_json()?)?;
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AggregateMetrics;
    use std::time::Duration;

    fn metrics(raw: u64) -> PerFileMetrics {
        PerFileMetrics {
            path: PathBuf::from(format!("f{raw}")),
            raw_size: raw,
            compressed_size: raw / 2,
            compress_time: Duration::from_millis(10),
            decompress_time: Duration::from_millis(5),
            round_trip_equal: true,
        }
    }

    #[test]
    fn test_text_empty_batch_prints_nothing() {
        let reporter = Reporter::new(Vec::new(), ReportFormat::Text, PathBuf::from("x"));
        let out = reporter.finish(AggregateMetrics::new().summarize()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_text_streams_files_then_overall() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Text, PathBuf::from("x"));
        let mut aggregate = AggregateMetrics::new();

        for m in [metrics(100), metrics(400)] {
            aggregate.accumulate(&m);
            reporter.file_done(&m).unwrap();
        }

        let out = String::from_utf8(reporter.finish(aggregate.summarize()).unwrap()).unwrap();
        let first = out.find("f100").unwrap();
        let second = out.find("f400").unwrap();
        let overall = out.find("Overall").unwrap();
        assert!(first < second && second < overall);
    }

    #[test]
    fn test_json_is_single_document() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Json, PathBuf::from("x"));
        let m = metrics(100);
        reporter.file_done(&m).unwrap();
        let mut aggregate = AggregateMetrics::new();
        aggregate.accumulate(&m);

        let out = reporter.finish(aggregate.summarize()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["files"][0]["raw_size"], 100);
        assert_eq!(value["overall"]["total_compressed_bytes"], 50);
    }

    #[test]
    fn test_json_abort_emits_finished_files() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Json, PathBuf::from("x"));
        reporter.file_done(&metrics(100)).unwrap();

        let out = reporter.abort().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["files"].as_array().unwrap().len(), 1);
        assert_eq!(value["completed"], false);
        assert!(value["overall"].is_null());
    }

    #[test]
    fn test_text_abort_adds_nothing() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Text, PathBuf::from("x"));
        reporter.file_done(&metrics(100)).unwrap();

        let out = String::from_utf8(reporter.abort().unwrap()).unwrap();
        assert!(out.contains("f100"));
        assert!(!out.contains("Overall"));
    }
}
