//! @ai:module:intent Run external commands with inherited stdio and time them
//! @ai:module:layer infrastructure
//! @ai:module:public_api ProcessRunner, ProcessRunnerTrait, RunResult
//! @ai:module:stateless true

use crate::error::{Error, Phase, Result};
use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// @ai:intent Outcome of one external command
#[derive(Debug, Clone, Copy)]
pub struct RunResult {
    pub status: ExitStatus,
    pub elapsed: Duration,
}

impl RunResult {
    /// @ai:effects pure
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// @ai:intent Turn a non-zero exit into an error naming the phase
    /// @ai:effects pure
    pub fn check(self, phase: Phase, program: &OsStr) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::Subprocess {
                phase,
                program: program.to_string_lossy().into_owned(),
                status: self.status,
            })
        }
    }
}

/// @ai:intent Trait for running external commands
pub trait ProcessRunnerTrait {
    /// @ai:intent Run a command to completion, streaming its output to ours
    /// @ai:post Err only when the process could not be started
    fn run(&self, program: &OsStr, args: &[&OsStr]) -> std::io::Result<RunResult>;

    /// @ai:intent Run a command for a phase, failing on spawn errors and non-zero exits
    fn run_phase(&self, phase: Phase, program: &OsStr, args: &[&OsStr]) -> Result<RunResult> {
        let result = self.run(program, args).map_err(|source| Error::Spawn {
            phase,
            program: program.to_string_lossy().into_owned(),
            source,
        })?;
        result.check(phase, program)
    }
}

/// @ai:intent Runs commands as child processes sharing our stdout and stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// @ai:intent Create a new process runner
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunnerTrait for ProcessRunner {
    /// @ai:effects io
    fn run(&self, program: &OsStr, args: &[&OsStr]) -> std::io::Result<RunResult> {
        tracing::debug!("Running {}", format_command(program, args));

        let start = Instant::now();
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        let elapsed = start.elapsed();

        tracing::debug!("{} finished with {} in {:?}", program.to_string_lossy(), status, elapsed);

        Ok(RunResult { status, elapsed })
    }
}

/// @ai:intent Render a command line for logs
/// @ai:effects pure
pub fn format_command(program: &OsStr, args: &[&OsStr]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
