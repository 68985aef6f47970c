//! @ai:module:intent Metrics collection and aggregation
//! @ai:module:layer application
//! @ai:module:public_api PerFileMetrics, AggregateMetrics, OverallReport

pub mod aggregator;
pub mod types;

pub use aggregator::AggregateMetrics;
pub use types::{ratio, throughput, OverallReport, PerFileMetrics, BYTES_PER_MEGABYTE};
