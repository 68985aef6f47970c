//! @ai:module:intent JSON rendering of a finished batch
//! @ai:module:layer infrastructure
//! @ai:module:public_api RunReport, FileReport
//! @ai:module:stateless true

use crate::metrics::{OverallReport, PerFileMetrics};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

/// @ai:intent One file's figures with durations in seconds
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub raw_size: u64,
    pub compressed_size: u64,
    pub compress_secs: f64,
    pub decompress_secs: f64,
    pub compress_throughput_mbps: Option<f64>,
    pub decompress_throughput_mbps: Option<f64>,
    pub ratio: Option<f64>,
    pub round_trip_equal: bool,
}

impl From<&PerFileMetrics> for FileReport {
    fn from(m: &PerFileMetrics) -> Self {
        Self {
            path: m.path.clone(),
            raw_size: m.raw_size,
            compressed_size: m.compressed_size,
            compress_secs: m.compress_time.as_secs_f64(),
            decompress_secs: m.decompress_time.as_secs_f64(),
            compress_throughput_mbps: m.compress_throughput(),
            decompress_throughput_mbps: m.decompress_throughput(),
            ratio: m.ratio(),
            round_trip_equal: m.round_trip_equal,
        }
    }
}

/// @ai:intent Complete batch results
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub executable: PathBuf,
    pub files: Vec<FileReport>,
    /// Absent for an empty or aborted batch
    pub overall: Option<OverallReport>,
    /// False when a failure stopped the batch after `files`
    pub completed: bool,
}

impl RunReport {
    /// @ai:effects pure
    pub fn new(
        executable: PathBuf,
        files: &[PerFileMetrics],
        overall: Option<OverallReport>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            executable,
            files: files.iter().map(FileReport::from).collect(),
            overall,
            completed: true,
        }
    }

    /// @ai:intent Report for a batch a failure cut short; no overall figures
    /// @ai:effects pure
    pub fn partial(executable: PathBuf, files: &[PerFileMetrics]) -> Self {
        Self {
            completed: false,
            ..Self::new(executable, files, None)
        }
    }

    /// @ai:effects pure
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AggregateMetrics;
    use std::time::Duration;

    #[test]
    fn test_empty_batch_serializes_null_overall() {
        let report = RunReport::new(PathBuf::from("build/main"), &[], None);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert!(value["overall"].is_null());
        assert_eq!(value["files"].as_array().unwrap().len(), 0);
        assert_eq!(value["executable"], "build/main");
        assert_eq!(value["completed"], true);
    }

    #[test]
    fn test_partial_report_keeps_finished_files() {
        let metrics = PerFileMetrics {
            path: PathBuf::from("done.bin"),
            raw_size: 8,
            compressed_size: 4,
            compress_time: Duration::from_millis(2),
            decompress_time: Duration::from_millis(1),
            round_trip_equal: true,
        };

        let report = RunReport::partial(PathBuf::from("x"), &[metrics]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["completed"], false);
        assert!(value["overall"].is_null());
        assert_eq!(value["files"][0]["path"], "done.bin");
    }

    #[test]
    fn test_unbounded_throughput_is_null() {
        let metrics = PerFileMetrics {
            path: PathBuf::from("a"),
            raw_size: 10,
            compressed_size: 5,
            compress_time: Duration::ZERO,
            decompress_time: Duration::from_secs(1),
            round_trip_equal: true,
        };
        let mut aggregate = AggregateMetrics::new();
        aggregate.accumulate(&metrics);

        let report = RunReport::new(PathBuf::from("x"), &[metrics], aggregate.summarize());
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert!(value["files"][0]["compress_throughput_mbps"].is_null());
        assert_eq!(value["files"][0]["ratio"], 2.0);
        assert_eq!(value["overall"]["file_count"], 1);
    }
}
