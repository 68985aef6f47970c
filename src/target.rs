//! @ai:module:intent Benchmark inputs and the artifact paths derived from them
//! @ai:module:layer domain
//! @ai:module:public_api BenchmarkTarget, ArtifactNaming, collect_targets

use crate::config::ArtifactConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent An input file to round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkTarget {
    path: PathBuf,
}

impl BenchmarkTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// @ai:intent Current byte size, read from the filesystem on each call
    /// @ai:effects fs:read
    pub fn size(&self) -> Result<u64> {
        file_size(&self.path)
    }
}

/// @ai:intent Names artifacts by appending a suffix to the input's full path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    compressed_suffix: String,
    decompressed_suffix: String,
}

impl ArtifactNaming {
    /// @ai:pre suffixes are non-empty and differ
    pub fn new(
        compressed_suffix: impl Into<String>,
        decompressed_suffix: impl Into<String>,
    ) -> Self {
        Self {
            compressed_suffix: compressed_suffix.into(),
            decompressed_suffix: decompressed_suffix.into(),
        }
    }

    /// @ai:effects pure
    pub fn compressed_path(&self, input: &Path) -> PathBuf {
        append_suffix(input, &self.compressed_suffix)
    }

    /// @ai:effects pure
    pub fn decompressed_path(&self, input: &Path) -> PathBuf {
        append_suffix(input, &self.decompressed_suffix)
    }

    /// @ai:intent Whether a path looks like an artifact of some other input
    /// @ai:effects pure
    pub fn is_artifact(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                let name = name.to_string_lossy();
                name.ends_with(&self.compressed_suffix) || name.ends_with(&self.decompressed_suffix)
            })
            .unwrap_or(false)
    }
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self::from(&ArtifactConfig::default())
    }
}

impl From<&ArtifactConfig> for ArtifactNaming {
    fn from(config: &ArtifactConfig) -> Self {
        Self::new(&config.compressed_suffix, &config.decompressed_suffix)
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// @ai:effects fs:read
pub(crate) fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| Error::fs("read metadata of", path, e))
}

/// @ai:intent Expand CLI paths into targets, walking directories in name order
/// @ai:pre every path exists
/// @ai:post order of the given paths is preserved; no target is another target's artifact
/// @ai:effects fs:read
pub fn collect_targets(
    paths: &[PathBuf],
    naming: &ArtifactNaming,
) -> Result<Vec<BenchmarkTarget>> {
    let mut targets = Vec::new();

    for path in paths {
        let metadata =
            std::fs::metadata(path).map_err(|e| Error::fs("read metadata of", path, e))?;

        if !metadata.is_dir() {
            targets.push(BenchmarkTarget::new(path));
            continue;
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let failed = e.path().unwrap_or(path.as_path()).to_path_buf();
                Error::fs("walk", failed, e.into())
            })?;

            // Follows symlinks, unlike entry.file_type()
            if !entry.path().is_file() {
                if !entry.file_type().is_dir() {
                    tracing::debug!("Skipping {}: not a regular file", entry.path().display());
                }
                continue;
            }

            if naming.is_artifact(entry.path()) {
                tracing::debug!("Skipping artifact {}", entry.path().display());
            } else {
                targets.push(BenchmarkTarget::new(entry.path()));
            }
        }
    }

    check_artifact_collisions(&targets, naming)?;

    tracing::debug!("Collected {} targets from {} paths", targets.len(), paths.len());
    Ok(targets)
}

/// @ai:intent Reject a batch where one input sits at another input's artifact path
/// @ai:post on Ok, removing stale artifacts can never delete an input
/// @ai:effects fs:read
fn check_artifact_collisions(targets: &[BenchmarkTarget], naming: &ArtifactNaming) -> Result<()> {
    let mut artifacts: HashMap<PathBuf, &Path> = HashMap::new();

    for target in targets {
        let input = normalize(target.path())?;
        artifacts.insert(naming.compressed_path(&input), target.path());
        artifacts.insert(naming.decompressed_path(&input), target.path());
    }

    for target in targets {
        if let Some(owner) = artifacts.get(&normalize(target.path())?) {
            return Err(Error::Config {
                path: target.path().to_path_buf(),
                message: format!(
                    "input is an artifact path of {}; rename it or change the artifact suffixes",
                    owner.display()
                ),
            });
        }
    }

    Ok(())
}

/// Canonical parent directory joined with the file name, so `./a` and `a` compare equal.
fn normalize(path: &Path) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let dir = parent
        .canonicalize()
        .map_err(|e| Error::fs("resolve", parent, e))?;

    Ok(match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    })
}
