//! @ai:module:intent Optional build pre-steps run before benchmarking
//! @ai:module:layer infrastructure
//! @ai:module:public_api BuildTrigger
//! @ai:module:stateless true

use crate::config::BuildConfig;
use crate::error::{Error, Phase, Result};
use crate::process::ProcessRunnerTrait;
use std::ffi::OsStr;
use std::path::PathBuf;

/// @ai:intent Runs the configured generate and build commands
pub struct BuildTrigger<'a, R: ProcessRunnerTrait> {
    runner: &'a R,
    config: &'a BuildConfig,
}

impl<'a, R: ProcessRunnerTrait> BuildTrigger<'a, R> {
    pub fn new(runner: &'a R, config: &'a BuildConfig) -> Self {
        Self { runner, config }
    }

    /// @ai:intent Run the enabled steps, generate first
    /// @ai:post on Err no later step has run
    /// @ai:effects io
    pub fn run(&self, generate: bool, build: bool) -> Result<()> {
        if generate {
            self.step(Phase::Generate, &self.config.generate)?;
        }

        if build {
            self.step(Phase::Build, &self.config.build)?;
        }

        Ok(())
    }

    fn step(&self, phase: Phase, command: &[String]) -> Result<()> {
        let (program, args) = command.split_first().ok_or_else(|| Error::Config {
            path: PathBuf::from("[build]"),
            message: format!("{phase} command is empty"),
        })?;

        tracing::info!("Running {} step: {}", phase, command.join(" "));

        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
        self.runner.run_phase(phase, OsStr::new(program), &args)?;
        Ok(())
    }
}
