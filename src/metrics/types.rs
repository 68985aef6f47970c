//! @ai:module:intent Metric types for round-trip results
//! @ai:module:layer domain
//! @ai:module:public_api PerFileMetrics, OverallReport, BYTES_PER_MEGABYTE, throughput, ratio
//! @ai:module:stateless true

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// One megabyte for throughput figures (2^20 bytes).
pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// @ai:intent Throughput in MB/s, or None when the duration is zero
/// @ai:effects pure
pub fn throughput(bytes: u64, elapsed: Duration) -> Option<f64> {
    let seconds = elapsed.as_secs_f64();

    if seconds > 0.0 {
        Some(bytes as f64 / seconds / BYTES_PER_MEGABYTE)
    } else {
        None
    }
}

/// @ai:intent Raw size over compressed size, or None for an empty artifact
/// @ai:effects pure
pub fn ratio(raw_bytes: u64, compressed_bytes: u64) -> Option<f64> {
    if compressed_bytes > 0 {
        Some(raw_bytes as f64 / compressed_bytes as f64)
    } else {
        None
    }
}

/// @ai:intent Metrics for a single round-tripped file
#[derive(Debug, Clone, PartialEq)]
pub struct PerFileMetrics {
    pub path: PathBuf,
    pub raw_size: u64,
    pub compressed_size: u64,
    pub compress_time: Duration,
    pub decompress_time: Duration,
    pub round_trip_equal: bool,
}

impl PerFileMetrics {
    /// @ai:effects pure
    pub fn compress_throughput(&self) -> Option<f64> {
        throughput(self.raw_size, self.compress_time)
    }

    /// @ai:effects pure
    pub fn decompress_throughput(&self) -> Option<f64> {
        throughput(self.raw_size, self.decompress_time)
    }

    /// @ai:effects pure
    pub fn ratio(&self) -> Option<f64> {
        ratio(self.raw_size, self.compressed_size)
    }
}

/// @ai:intent Overall figures for a batch, computed from exact sums
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallReport {
    pub file_count: u32,
    pub total_raw_bytes: u64,
    pub total_compressed_bytes: u64,
    pub total_compress_secs: f64,
    pub total_decompress_secs: f64,
    pub compress_throughput_mbps: Option<f64>,
    pub decompress_throughput_mbps: Option<f64>,
    pub ratio: Option<f64>,
}
