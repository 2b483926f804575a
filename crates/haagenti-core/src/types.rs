//! Core type definitions for compression operations.

use serde::Serialize;

/// Compression ratio metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionRatio {
    /// Original uncompressed size in bytes.
    pub original_size: usize,
    /// Compressed size in bytes.
    pub compressed_size: usize,
}

impl CompressionRatio {
    /// Create new ratio from sizes.
    pub fn new(original: usize, compressed: usize) -> Self {
        CompressionRatio {
            original_size: original,
            compressed_size: compressed,
        }
    }

    /// Calculate ratio (original / compressed).
    /// Higher is better (more compression).
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Calculate space savings as percentage (0-100).
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - (self.compressed_size as f64 / self.original_size as f64)) * 100.0
    }

    /// Calculate bytes saved.
    pub fn bytes_saved(&self) -> isize {
        self.original_size as isize - self.compressed_size as isize
    }

    /// Check if compression was effective (saved space).
    pub fn is_effective(&self) -> bool {
        self.compressed_size < self.original_size
    }
}
