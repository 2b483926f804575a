//! Error types for compression operations.

use thiserror::Error;

/// Result type alias for compression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Compression error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialized code tree ends before its header, symbols or shape bits.
    #[error("truncated tree: need {required} bytes, got {available}")]
    TruncatedTree { required: usize, available: usize },

    /// Payload is shorter than its significant-bit accounting requires.
    #[error("truncated payload: {message}")]
    TruncatedPayload { message: String },

    /// Input data is corrupted or invalid.
    #[error("corrupted data: {message}")]
    CorruptedData {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Bit cursor ran past the end of its input.
    #[error("unexpected EOF after {bits_read} bits")]
    UnexpectedEof { bits_read: usize },

    /// I/O error from underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a truncated tree error.
    pub fn truncated_tree(required: usize, available: usize) -> Self {
        Error::TruncatedTree {
            required,
            available,
        }
    }

    /// Create a truncated payload error.
    pub fn truncated_payload(message: impl Into<String>) -> Self {
        Error::TruncatedPayload {
            message: message.into(),
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::CorruptedData {
            message: message.into(),
            source: None,
        }
    }

    /// Create a corrupted data error with offset context.
    pub fn corrupted_at(message: impl Into<String>, offset: usize) -> Self {
        Error::CorruptedData {
            message: format!("{} at offset {}", message.into(), offset),
            source: None,
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bits_read: usize) -> Self {
        Error::UnexpectedEof { bits_read }
    }

    /// Check if the error was caused by input that ended too early.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Error::TruncatedTree { .. } | Error::TruncatedPayload { .. } | Error::UnexpectedEof { .. }
        )
    }

    /// Get error category for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            Error::TruncatedTree { .. } => "truncated_tree",
            Error::TruncatedPayload { .. } => "truncated_payload",
            Error::CorruptedData { .. } => "corrupted_data",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::UnexpectedEof { .. } => "unexpected_eof",
            Error::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_tree_message() {
        let err = Error::truncated_tree(5, 3);
        assert_eq!(err.to_string(), "truncated tree: need 5 bytes, got 3");
        assert_eq!(err.category(), "truncated_tree");
        assert!(err.is_truncation());
    }

    #[test]
    fn test_corrupted_at_includes_offset() {
        let err = Error::corrupted_at("repeated symbol 0x41", 7);
        assert_eq!(
            err.to_string(),
            "corrupted data: repeated symbol 0x41 at offset 7"
        );
        assert!(!err.is_truncation());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.category(), "io_error");
    }
}
