//! Command-line errors.

use std::path::PathBuf;

/// Errors surfaced by the command-line tool.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] haagenti_core::Error),

    #[error("Invalid configuration file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short category for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Io { .. } => "io_error",
            CliError::Codec(e) => e.category(),
            CliError::Config { .. } => "config_error",
            CliError::InputTooLarge { .. } => "input_too_large",
            CliError::Report(_) => "report_error",
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io { .. } => 2,
            CliError::Codec(_) => 3,
            CliError::Config { .. } => 4,
            CliError::InputTooLarge { .. } => 5,
            CliError::Report(_) => 1,
        }
    }
}

/// Result type for command-line operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_passes_through() {
        let err: CliError = haagenti_core::Error::truncated_tree(10, 3).into();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.category(), "truncated_tree");
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CliError::io(
            "missing.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.bin"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_input_too_large_message() {
        let err = CliError::InputTooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(err.to_string(), "Input is 2048 bytes, limit is 1024");
    }
}
