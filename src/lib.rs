//! @ai:module:intent Round-trip benchmark harness for external compressors
//! @ai:module:layer application
//! @ai:module:public_api build, config, engine, error, metrics, process, report, target

pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod process;
pub mod report;
pub mod target;

pub use build::BuildTrigger;
pub use config::BenchConfig;
pub use engine::RoundTripEngine;
pub use error::{Error, Phase, Result};
pub use metrics::{AggregateMetrics, OverallReport, PerFileMetrics};
pub use process::{ProcessRunner, ProcessRunnerTrait, RunResult};
pub use report::{ReportFormat, Reporter};
pub use target::{collect_targets, ArtifactNaming, BenchmarkTarget};
