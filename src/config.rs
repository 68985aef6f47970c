//! @ai:module:intent Configuration structs for the round-trip harness
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchConfig, CodecConfig, ArtifactConfig, BuildConfig
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "roundtrip.toml";

/// @ai:intent Main configuration for the harness
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

/// @ai:intent How to invoke the external compressor/decompressor
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default = "default_executable")]
    pub executable: PathBuf,
    #[serde(default = "default_compress_mode")]
    pub compress_mode: String,
    #[serde(default = "default_decompress_mode")]
    pub decompress_mode: String,
}

/// @ai:intent Suffixes appended to an input path to name its artifacts
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_compressed_suffix")]
    pub compressed_suffix: String,
    #[serde(default = "default_decompressed_suffix")]
    pub decompressed_suffix: String,
}

/// @ai:intent Command lines for the optional build pre-steps
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_generate_command")]
    pub generate: Vec<String>,
    #[serde(default = "default_build_command")]
    pub build: Vec<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            compress_mode: default_compress_mode(),
            decompress_mode: default_decompress_mode(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            compressed_suffix: default_compressed_suffix(),
            decompressed_suffix: default_decompressed_suffix(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            generate: default_generate_command(),
            build: default_build_command(),
        }
    }
}

fn default_executable() -> PathBuf {
    PathBuf::from("build/main")
}

fn default_compress_mode() -> String {
    "c".to_string()
}

fn default_decompress_mode() -> String {
    "d".to_string()
}

fn default_compressed_suffix() -> String {
    ".compressed".to_string()
}

fn default_decompressed_suffix() -> String {
    ".decompressed".to_string()
}

fn default_generate_command() -> Vec<String> {
    ["cmake", "-G", "Ninja", "-B", "build", ".", "-DCMAKE_BUILD_TYPE=Release"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_build_command() -> Vec<String> {
    ["cmake", "--build", "build", "--target", "main"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl BenchConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::fs("read config", path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| Error::fs("write config", path, e))?;
        Ok(())
    }

    /// @ai:intent Load the given config, or the default file if present, or defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// @ai:intent Reject settings that would make artifact naming or invocation ambiguous
    /// @ai:effects pure
    pub fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |message: &str| Error::Config {
            path: origin.to_path_buf(),
            message: message.to_string(),
        };

        if self.codec.executable.as_os_str().is_empty() {
            return Err(invalid("codec.executable must not be empty"));
        }

        if self.codec.compress_mode.is_empty() || self.codec.decompress_mode.is_empty() {
            return Err(invalid("codec modes must not be empty"));
        }

        if self.artifacts.compressed_suffix.is_empty()
            || self.artifacts.decompressed_suffix.is_empty()
        {
            return Err(invalid("artifact suffixes must not be empty"));
        }

        if self.artifacts.compressed_suffix == self.artifacts.decompressed_suffix {
            return Err(invalid("artifact suffixes must differ"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_reference_harness() {
        let config = BenchConfig::default();
        assert_eq!(config.codec.executable, PathBuf::from("build/main"));
        assert_eq!(config.codec.compress_mode, "c");
        assert_eq!(config.codec.decompress_mode, "d");
        assert_eq!(config.build.build, vec!["cmake", "--build", "build", "--target", "main"]);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("roundtrip.toml");
        std::fs::write(&path, "[codec]\nexecutable = \"bin/zz\"\n").unwrap();

        let config = BenchConfig::load(&path).unwrap();
        assert_eq!(config.codec.executable, PathBuf::from("bin/zz"));
        assert_eq!(config.codec.compress_mode, "c");
        assert_eq!(config.artifacts, ArtifactConfig::default());
    }

    #[test]
    fn test_save_then_load_preserves_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.toml");
        let mut config = BenchConfig::default();
        config.codec.compress_mode = "compress".to_string();

        config.save(&path).unwrap();
        assert_eq!(BenchConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_identical_suffixes_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(
            &path,
            "[artifacts]\ncompressed_suffix = \".x\"\ndecompressed_suffix = \".x\"\n",
        )
        .unwrap();

        let err = BenchConfig::load(&path).unwrap_err();
        assert_eq!(err.exit_code(), 16);
    }

    #[test]
    fn test_missing_explicit_config_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = BenchConfig::load_or_default(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
