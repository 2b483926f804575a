//! Statistics for compression operations.

use serde::Serialize;

use crate::types::CompressionRatio;

/// Statistics from a compression/decompression operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompressionStats {
    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Compressed size in bytes, including any header.
    pub compressed_size: usize,

    /// Bytes of the compressed size spent on the code table header.
    pub table_size: usize,

    /// Time taken in microseconds.
    pub time_us: u64,

    /// Number of operations merged into these stats.
    pub operations: usize,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create stats from a completed operation.
    pub fn from_operation(
        original_size: usize,
        compressed_size: usize,
        table_size: usize,
        time_us: u64,
    ) -> Self {
        CompressionStats {
            original_size,
            compressed_size,
            table_size,
            time_us,
            operations: 1,
        }
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }

    /// Get space savings as percentage.
    pub fn savings_percent(&self) -> f64 {
        self.ratio().savings_percent()
    }

    /// Merge stats from multiple operations.
    pub fn merge(&mut self, other: &CompressionStats) {
        self.original_size += other.original_size;
        self.compressed_size += other.compressed_size;
        self.table_size += other.table_size;
        self.time_us += other.time_us;
        self.operations += other.operations;
    }
}
