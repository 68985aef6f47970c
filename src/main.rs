//! @ai:module:intent CLI for the round-trip benchmark harness
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roundtrip_bench::{
    collect_targets, AggregateMetrics, ArtifactNaming, BenchConfig, BuildTrigger, Error,
    ProcessRunner, ReportFormat, Reporter, RoundTripEngine,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "roundtrip-bench")]
#[command(about = "Round-trip correctness and throughput benchmark for external compressors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build (optionally) and round-trip the given files through the codec
    Run {
        /// Generate build files before building
        #[arg(short = 'G', long)]
        generate: bool,

        /// Build the codec executable before benchmarking
        #[arg(short = 'B', long)]
        build: bool,

        /// Input file or directory (repeatable)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Codec executable, overriding the configuration
        #[arg(short, long)]
        executable: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write the default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "roundtrip.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            generate,
            build,
            files,
            config,
            executable,
            format,
        } => run(RunArgs {
            generate,
            build,
            files,
            config,
            executable,
            format: format.into(),
        }),
        Commands::Init { output } => init_config(&output),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

/// @ai:intent Send logs to stderr so stdout carries only the report
/// @ai:effects io
fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roundtrip_bench=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

/// @ai:intent Print the stage message and details, and pick the exit code
/// @ai:effects io
fn report_failure(e: &anyhow::Error) -> ExitCode {
    let harness_error = e.chain().find_map(|cause| cause.downcast_ref::<Error>());

    tracing::error!("{:#}", e);

    match harness_error {
        Some(err) => {
            eprintln!("{}", err.stage_message());
            eprintln!("Error: {:#}", e);
            ExitCode::from(err.exit_code())
        }
        None => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

struct RunArgs {
    generate: bool,
    build: bool,
    files: Vec<PathBuf>,
    config: Option<PathBuf>,
    executable: Option<PathBuf>,
    format: ReportFormat,
}

/// @ai:intent Run the optional build steps, then round-trip every target
/// @ai:effects fs:read, fs:write, io
fn run(args: RunArgs) -> Result<()> {
    let mut config = BenchConfig::load_or_default(args.config.as_deref())?;

    if let Some(executable) = args.executable {
        config.codec.executable = executable;
    }
    config.validate(args.config.as_deref().unwrap_or(Path::new("<command line>")))?;

    let runner = ProcessRunner::new();
    BuildTrigger::new(&runner, &config.build).run(args.generate, args.build)?;

    let naming = ArtifactNaming::from(&config.artifacts);
    let targets = collect_targets(&args.files, &naming)?;

    if targets.is_empty() {
        tracing::info!("No input files given; nothing to benchmark");
    } else {
        tracing::info!(
            "Benchmarking {} files with {}",
            targets.len(),
            config.codec.executable.display()
        );
    }

    let executable = config.codec.executable.clone();
    let engine = RoundTripEngine::new(runner, config.codec, naming);
    let mut reporter = Reporter::new(std::io::stdout().lock(), args.format, executable);
    let mut aggregate = AggregateMetrics::new();

    let outcome = engine.run_batch(&targets, &mut aggregate, |metrics| {
        if let Err(e) = reporter.file_done(metrics) {
            tracing::warn!("Failed to write report for {}: {}", metrics.path.display(), e);
        }
    });

    if let Err(e) = outcome {
        if let Err(report_err) = reporter.abort() {
            tracing::warn!("Failed to write partial report: {}", report_err);
        }
        return Err(e.into());
    }

    reporter
        .finish(aggregate.summarize())
        .context("Failed to write summary")?;

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<()> {
    BenchConfig::default().save(output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}
