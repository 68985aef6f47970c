//! @ai:module:intent Round-trip each target through the external codec and verify it
//! @ai:module:layer application
//! @ai:module:public_api RoundTripEngine, first_difference
//! @ai:module:depends_on process, target, metrics
//! @ai:module:stateless true

use crate::config::CodecConfig;
use crate::error::{Error, Phase, Result};
use crate::metrics::{AggregateMetrics, PerFileMetrics};
use crate::process::ProcessRunnerTrait;
use crate::target::{file_size, ArtifactNaming, BenchmarkTarget};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use std::time::Duration;

const COMPARE_CHUNK: usize = 64 * 1024;

/// @ai:intent Drives compress, decompress and comparison for each target, one at a time
pub struct RoundTripEngine<R: ProcessRunnerTrait> {
    runner: R,
    codec: CodecConfig,
    naming: ArtifactNaming,
}

impl<R: ProcessRunnerTrait> RoundTripEngine<R> {
    /// @ai:intent Create an engine over a runner and codec invocation
    /// @ai:effects pure
    pub fn new(runner: R, codec: CodecConfig, naming: ArtifactNaming) -> Self {
        Self {
            runner,
            codec,
            naming,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// @ai:intent Round-trip every target in order, stopping at the first failure
    /// @ai:post aggregate holds the sums of every file that completed
    /// @ai:effects fs:read, fs:write, io
    pub fn run_batch<F>(
        &self,
        targets: &[BenchmarkTarget],
        aggregate: &mut AggregateMetrics,
        mut on_file: F,
    ) -> Result<()>
    where
        F: FnMut(&PerFileMetrics),
    {
        let total = targets.len();

        for (i, target) in targets.iter().enumerate() {
            tracing::info!("[{}/{}] Round-tripping {}", i + 1, total, target.path().display());

            let metrics = self.run_file(target)?;
            aggregate.accumulate(&metrics);
            on_file(&metrics);
        }

        Ok(())
    }

    /// @ai:intent Compress, decompress and byte-compare one target
    /// @ai:pre target exists
    /// @ai:post returned metrics always have round_trip_equal set
    /// @ai:effects fs:read, fs:write, io
    pub fn run_file(&self, target: &BenchmarkTarget) -> Result<PerFileMetrics> {
        let input = target.path();
        let compressed = self.naming.compressed_path(input);
        let decompressed = self.naming.decompressed_path(input);

        remove_stale(&compressed)?;
        remove_stale(&decompressed)?;

        let compress_time =
            self.invoke(Phase::Compress, &self.codec.compress_mode, input, &compressed)?;
        let compressed_size = file_size(&compressed)?;

        let decompress_time = self.invoke(
            Phase::Decompress,
            &self.codec.decompress_mode,
            &compressed,
            &decompressed,
        )?;

        if let Some(offset) = first_difference(input, &decompressed)? {
            return Err(Error::Mismatch {
                original: input.to_path_buf(),
                decompressed,
                offset,
            });
        }

        let raw_size = target.size()?;

        tracing::info!(
            "{}: {} -> {} bytes, compress {:?}, decompress {:?}",
            input.display(),
            raw_size,
            compressed_size,
            compress_time,
            decompress_time
        );

        Ok(PerFileMetrics {
            path: input.to_path_buf(),
            raw_size,
            compressed_size,
            compress_time,
            decompress_time,
            round_trip_equal: true,
        })
    }

    /// @ai:intent Run the codec as `executable <mode> <input> <output>` and time it
    /// @ai:effects io
    fn invoke(&self, phase: Phase, mode: &str, input: &Path, output: &Path) -> Result<Duration> {
        let args = [OsStr::new(mode), input.as_os_str(), output.as_os_str()];
        let result = self
            .runner
            .run_phase(phase, self.codec.executable.as_os_str(), &args)?;
        Ok(result.elapsed)
    }
}

/// @ai:intent Delete an artifact left by an earlier run
/// @ai:effects fs:write
fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::warn!("Removed stale artifact {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::fs("remove stale artifact", path, e)),
    }
}

/// @ai:intent Offset of the first differing byte, or None if the files are identical
/// @ai:post a length difference reports the length of the shorter file
/// @ai:effects fs:read
pub fn first_difference(a: &Path, b: &Path) -> Result<Option<u64>> {
    let mut left = open(a)?;
    let mut right = open(b)?;
    let mut left_buf = vec![0u8; COMPARE_CHUNK];
    let mut right_buf = vec![0u8; COMPARE_CHUNK];
    let mut offset = 0u64;

    loop {
        let left_len = fill(&mut left, &mut left_buf).map_err(|e| Error::fs("read", a, e))?;
        let right_len = fill(&mut right, &mut right_buf).map_err(|e| Error::fs("read", b, e))?;
        let common = left_len.min(right_len);

        if let Some(pos) = left_buf[..common]
            .iter()
            .zip(&right_buf[..common])
            .position(|(x, y)| x != y)
        {
            return Ok(Some(offset + pos as u64));
        }

        if left_len != right_len {
            return Ok(Some(offset + common as u64));
        }

        if left_len == 0 {
            return Ok(None);
        }

        offset += left_len as u64;
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::fs("open", path, e))
}

/// Reads until `buf` is full or EOF, so chunks from both files line up.
fn fill<T: Read>(reader: &mut T, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
