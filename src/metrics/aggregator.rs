//! @ai:module:intent Running totals across a batch of round-tripped files
//! @ai:module:layer application
//! @ai:module:public_api AggregateMetrics
//! @ai:module:stateless false

use crate::metrics::types::{ratio, throughput, OverallReport, PerFileMetrics};
use std::time::Duration;

/// @ai:intent Exact sums of per-file metrics, folded in as each file finishes
/// @ai:invariant overall ratio comes from these sums, never from averaging per-file ratios
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateMetrics {
    pub file_count: u32,
    pub raw_bytes: u64,
    pub compressed_bytes: u64,
    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl AggregateMetrics {
    /// @ai:intent Create an empty aggregate
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Add one file's metrics to the running totals
    /// @ai:effects mutates self
    pub fn accumulate(&mut self, metrics: &PerFileMetrics) {
        self.file_count += 1;
        self.raw_bytes += metrics.raw_size;
        self.compressed_bytes += metrics.compressed_size;
        self.compress_time += metrics.compress_time;
        self.decompress_time += metrics.decompress_time;
    }

    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// @ai:intent Overall throughput and ratio, or None for an empty batch
    /// @ai:effects pure
    pub fn summarize(&self) -> Option<OverallReport> {
        if self.is_empty() {
            return None;
        }

        Some(OverallReport {
            file_count: self.file_count,
            total_raw_bytes: self.raw_bytes,
            total_compressed_bytes: self.compressed_bytes,
            total_compress_secs: self.compress_time.as_secs_f64(),
            total_decompress_secs: self.decompress_time.as_secs_f64(),
            compress_throughput_mbps: throughput(self.raw_bytes, self.compress_time),
            decompress_throughput_mbps: throughput(self.raw_bytes, self.decompress_time),
            ratio: ratio(self.raw_bytes, self.compressed_bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(raw: u64, compressed: u64, compress_ms: u64, decompress_ms: u64) -> PerFileMetrics {
        PerFileMetrics {
            path: PathBuf::from("f"),
            raw_size: raw,
            compressed_size: compressed,
            compress_time: Duration::from_millis(compress_ms),
            decompress_time: Duration::from_millis(decompress_ms),
            round_trip_equal: true,
        }
    }

    #[test]
    fn test_empty_batch_has_no_summary() {
        assert!(AggregateMetrics::new().summarize().is_none());
    }

    #[test]
    fn test_ratio_from_sums_not_mean_of_ratios() {
        let small = file(100, 10, 1, 1);
        let large = file(10_000, 5_000, 10, 10);

        let mut aggregate = AggregateMetrics::new();
        aggregate.accumulate(&small);
        aggregate.accumulate(&large);

        let report = aggregate.summarize().unwrap();
        let from_sums = 10_100.0 / 5_010.0;
        let mean_of_ratios = (small.ratio().unwrap() + large.ratio().unwrap()) / 2.0;

        assert!((report.ratio.unwrap() - from_sums).abs() < 1e-9);
        assert!((report.ratio.unwrap() - mean_of_ratios).abs() > 1.0);
    }

    #[test]
    fn test_accumulate_sums_durations() {
        let mut aggregate = AggregateMetrics::new();
        aggregate.accumulate(&file(1_048_576, 1, 250, 100));
        aggregate.accumulate(&file(1_048_576, 1, 750, 400));

        assert_eq!(aggregate.file_count, 2);
        assert_eq!(aggregate.compress_time, Duration::from_secs(1));
        let report = aggregate.summarize().unwrap();
        assert!((report.compress_throughput_mbps.unwrap() - 2.0).abs() < 1e-9);
        assert!((report.decompress_throughput_mbps.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_time_reports_unbounded() {
        let mut aggregate = AggregateMetrics::new();
        aggregate.accumulate(&file(64, 32, 0, 0));

        let report = aggregate.summarize().unwrap();
        assert_eq!(report.compress_throughput_mbps, None);
        assert_eq!(report.decompress_throughput_mbps, None);
        assert_eq!(report.ratio, Some(2.0));
    }
}
