//! File-to-file encode and decode.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use haagenti_core::CompressionStats;
use haagenti_huffman::{compress_stream, decompress_stream};
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::report::Report;

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Encode SOURCE into DEST.
    Compress,
    /// Decode SOURCE into DEST.
    Decompress,
}

impl Mode {
    /// Lowercase name used in logs and JSON reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Compress => "compress",
            Mode::Decompress => "decompress",
        }
    }
}

/// Run one encode or decode from `source` to `dest`.
///
/// DEST is created (or truncated) only after the size check passes. On a
/// decode error DEST is left empty.
pub fn run(mode: Mode, source: &Path, dest: &Path, config: &CliConfig) -> CliResult<Report> {
    let size = fs::metadata(source)
        .map_err(|e| CliError::io(source, e))?
        .len();
    config.check_input_size(size)?;

    let reader = BufReader::new(File::open(source).map_err(|e| CliError::io(source, e))?);
    let writer = BufWriter::new(File::create(dest).map_err(|e| CliError::io(dest, e))?);

    debug!(mode = mode.as_str(), source = %source.display(), dest = %dest.display(), size, "starting");

    let start = Instant::now();
    let (summary, tree) = match mode {
        Mode::Compress => compress_stream(reader, writer)?,
        Mode::Decompress => decompress_stream(reader, writer)?,
    };
    let time_us = start.elapsed().as_micros() as u64;

    let stats = CompressionStats::from_operation(
        summary.original_size,
        summary.total_size(),
        summary.table_size,
        time_us,
    );

    info!(
        mode = mode.as_str(),
        original = stats.original_size,
        compressed = stats.compressed_size,
        savings_percent = stats.savings_percent(),
        "done in {} us",
        time_us
    );

    Ok(Report {
        mode,
        summary,
        tree,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_compress_then_decompress() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("input.txt");
        let packed = dir.path().join("input.huf");
        let restored = dir.path().join("restored.txt");
        fs::write(&source, b"abracadabra, abracadabra").unwrap();

        let config = CliConfig::default();
        let report = run(Mode::Compress, &source, &packed, &config).unwrap();
        assert_eq!(report.summary.original_size, 24);
        assert_eq!(
            report.summary.total_size() as u64,
            fs::metadata(&packed).unwrap().len()
        );

        let report = run(Mode::Decompress, &packed, &restored, &config).unwrap();
        assert_eq!(report.summary.original_size, 24);
        assert_eq!(fs::read(&restored).unwrap(), b"abracadabra, abracadabra");
    }

    #[test]
    fn test_empty_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("empty");
        let dest = dir.path().join("empty.huf");
        fs::write(&source, b"").unwrap();

        let report = run(Mode::Compress, &source, &dest, &CliConfig::default()).unwrap();
        assert_eq!(report.summary.total_size(), 0);
        assert!(report.tree.is_none());
        assert!(fs::read(&dest).unwrap().is_empty());
    }

    #[test]
    fn test_size_limit_leaves_dest_untouched() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("big");
        let dest = dir.path().join("big.huf");
        fs::write(&source, vec![7u8; 100]).unwrap();

        let config = CliConfig {
            max_input_bytes: Some(50),
            ..CliConfig::default()
        };
        let err = run(Mode::Compress, &source, &dest, &config).unwrap_err();
        assert!(matches!(err, CliError::InputTooLarge { size: 100, limit: 50 }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_missing_source() {
        let dir = tempdir().unwrap();
        let err = run(
            Mode::Compress,
            &dir.path().join("nope"),
            &dir.path().join("out"),
            &CliConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_corrupt_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("bad.huf");
        let dest = dir.path().join("bad.out");
        fs::write(&source, [0x10, 1, 2]).unwrap();

        let err = run(Mode::Decompress, &source, &dest, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Codec(_)));
        assert!(fs::read(&dest).unwrap().is_empty());
    }
}
