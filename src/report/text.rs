//! @ai:module:intent Human-readable per-file and overall statistics
//! @ai:module:layer presentation
//! @ai:module:public_api format_file, format_overall, format_rate
//! @ai:module:stateless true

use crate::metrics::{OverallReport, PerFileMetrics};
use std::fmt::Write as FmtWrite;

/// @ai:intent Render an optional figure with three decimals, N/A when unbounded
/// @ai:effects pure
pub fn format_rate(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.3}{}", v, unit),
        None => "N/A".to_string(),
    }
}

/// @ai:intent Statistics block printed as soon as a file finishes
/// @ai:effects pure
pub fn format_file(metrics: &PerFileMetrics) -> String {
    let mut output = String::new();

    writeln!(output, "{}", metrics.path.display()).unwrap();
    writeln!(output, "  Compression took {:.3}s", metrics.compress_time.as_secs_f64()).unwrap();
    writeln!(
        output,
        "  Compression throughput: {}",
        format_rate(metrics.compress_throughput(), "MB/s")
    )
    .unwrap();
    writeln!(output, "  Decompression took {:.3}s", metrics.decompress_time.as_secs_f64()).unwrap();
    writeln!(
        output,
        "  Decompression throughput: {}",
        format_rate(metrics.decompress_throughput(), "MB/s")
    )
    .unwrap();
    writeln!(output, "  Ratio: {}", format_rate(metrics.ratio(), "")).unwrap();

    output
}

/// @ai:intent Summary section for a non-empty batch
/// @ai:effects pure
pub fn format_overall(report: &OverallReport) -> String {
    let mut output = String::new();

    writeln!(output).unwrap();
    writeln!(output, "Overall").unwrap();
    writeln!(output, "=======").unwrap();
    writeln!(output, "{:<28} {:>14}", "Files:", report.file_count).unwrap();
    writeln!(output, "{:<28} {:>14}", "Raw bytes:", report.total_raw_bytes).unwrap();
    writeln!(output, "{:<28} {:>14}", "Compressed bytes:", report.total_compressed_bytes).unwrap();
    writeln!(output, "{:<28} {:>13.3}s", "Compression time:", report.total_compress_secs).unwrap();
    writeln!(
        output,
        "{:<28} {:>13.3}s",
        "Decompression time:", report.total_decompress_secs
    )
    .unwrap();
    writeln!(
        output,
        "{:<28} {:>14}",
        "Compression throughput:",
        format_rate(report.compress_throughput_mbps, "MB/s")
    )
    .unwrap();
    writeln!(
        output,
        "{:<28} {:>14}",
        "Decompression throughput:",
        format_rate(report.decompress_throughput_mbps, "MB/s")
    )
    .unwrap();
    writeln!(output, "{:<28} {:>14}", "Ratio:", format_rate(report.ratio, "")).unwrap();

    output
}
