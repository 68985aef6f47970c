//! @ai:module:intent Define error types for the round-trip harness
//! @ai:module:layer domain
//! @ai:module:public_api Error, Phase, Result
//! @ai:module:stateless true

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// @ai:intent Stage of a run that invokes an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generate,
    Build,
    Compress,
    Decompress,
}

impl Phase {
    /// @ai:intent Get string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generate => "generate",
            Phase::Build => "build",
            Phase::Compress => "compress",
            Phase::Decompress => "decompress",
        }
    }

    /// @ai:intent User-facing message printed when this stage fails
    /// @ai:effects pure
    pub fn failure_message(&self) -> &'static str {
        match self {
            Phase::Generate => "Failed to generate build files.",
            Phase::Build => "Failed to build the executable.",
            Phase::Compress => "Failed to compress the file.",
            Phase::Decompress => "Failed to decompress the compressed file.",
        }
    }

    /// @ai:effects pure
    pub fn exit_code(&self) -> u8 {
        match self {
            Phase::Generate => 10,
            Phase::Build => 11,
            Phase::Compress => 12,
            Phase::Decompress => 13,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MISMATCH_MESSAGE: &str = "The decompressed file is not identical to the original file.";

/// @ai:intent Unified error type for all harness operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to start {phase} command `{program}`: {source}")]
    Spawn {
        phase: Phase,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{phase} command `{program}` failed with {status}")]
    Subprocess {
        phase: Phase,
        program: String,
        status: ExitStatus,
    },

    #[error(
        "Round-trip mismatch: {} differs from {} at byte {offset}",
        .decompressed.display(),
        .original.display()
    )]
    Mismatch {
        original: PathBuf,
        decompressed: PathBuf,
        offset: u64,
    },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// @ai:intent Build a filesystem error identifying the offending path
    /// @ai:effects pure
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// @ai:intent Phase that failed, if the error came from an external command
    /// @ai:effects pure
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Error::Spawn { phase, .. } | Error::Subprocess { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// @ai:effects pure
    pub fn is_build_failure(&self) -> bool {
        matches!(self.phase(), Some(Phase::Generate | Phase::Build))
    }

    /// @ai:effects pure
    pub fn is_correctness_failure(&self) -> bool {
        matches!(self, Error::Mismatch { .. })
    }

    /// @ai:intent Short stage-specific message for the error stream
    /// @ai:effects pure
    pub fn stage_message(&self) -> &'static str {
        match self {
            Error::Spawn { phase, .. } | Error::Subprocess { phase, .. } => phase.failure_message(),
            Error::Mismatch { .. } => MISMATCH_MESSAGE,
            Error::Filesystem { .. } => "A filesystem operation failed.",
            Error::Config { .. } => "The configuration is invalid.",
        }
    }

    /// @ai:intent Process exit code identifying the failing stage
    /// @ai:effects pure
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Spawn { phase, .. } | Error::Subprocess { phase, .. } => phase.exit_code(),
            Error::Mismatch { .. } => 14,
            Error::Filesystem { .. } => 15,
            Error::Config { .. } => 16,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_stage() {
        let codes = [
            Phase::Generate.exit_code(),
            Phase::Build.exit_code(),
            Phase::Compress.exit_code(),
            Phase::Decompress.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_mismatch_classification() {
        let err = Error::Mismatch {
            original: PathBuf::from("a.bin"),
            decompressed: PathBuf::from("a.bin.decompressed"),
            offset: 7,
        };
        assert!(err.is_correctness_failure());
        assert!(!err.is_build_failure());
        assert_eq!(err.exit_code(), 14);
        assert_eq!(err.stage_message(), MISMATCH_MESSAGE);
        assert!(err.to_string().contains("at byte 7"));
    }

    #[test]
    fn test_spawn_failure_reports_phase() {
        let err = Error::Spawn {
            phase: Phase::Build,
            program: "cmake".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_build_failure());
        assert_eq!(err.phase(), Some(Phase::Build));
        assert_eq!(err.stage_message(), "Failed to build the executable.");
        assert!(err.to_string().contains("cmake"));
    }

    #[test]
    fn test_filesystem_error_names_path() {
        let err = Error::fs(
            "read metadata of",
            "missing.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.exit_code(), 15);
        assert!(err.to_string().contains("missing.bin"));
    }
}
