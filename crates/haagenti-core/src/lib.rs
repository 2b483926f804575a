//! # Haagenti Core
//!
//! Shared vocabulary for the Huffman codec crates: the error type, the
//! one-shot codec traits, and size/timing statistics.
//!
//! ## Traits
//!
//! - [`Compressor`] / [`Decompressor`]: buffer in, buffer out
//! - [`Codec`]: both directions plus round-trip and ratio helpers
//!
//! ## Example
//!
//! ```ignore
//! use haagenti_core::{Codec, Compressor, Decompressor};
//! use haagenti_huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let packed = codec.compress(b"abracadabra")?;
//! assert_eq!(codec.decompress(&packed)?, b"abracadabra");
//! println!("{:.2}x", codec.measure_ratio(b"abracadabra")?.ratio());
//! ```

pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use stats::CompressionStats;
pub use traits::{Codec, Compressor, Decompressor};
pub use types::CompressionRatio;
