//! # Haagenti Huffman
//!
//! Lossless whole-file Huffman compression.
//!
//! The input's byte frequencies build an optimal prefix-code tree. The tree
//! is written as a compact self-describing header, followed by the input
//! packed with the tree's codes.
//!
//! ## Stream Layout
//!
//! ```text
//! [leaf_count - 1][symbols (preorder)][shape bits][packed codes][trailer]
//! ```
//!
//! See [`tree_codec`] for the tree header and [`payload`] for the packed
//! codes and the trailing significant-bit byte. There is no version field
//! and no checksum; decoding malformed input fails with an error.
//!
//! ## Example
//!
//! ```
//! use haagenti_huffman::{decode, encode};
//!
//! let data = b"abracadabra";
//! let compressed = encode(data)?;
//! assert_eq!(decode(&compressed)?, data);
//! # Ok::<(), haagenti_core::Error>(())
//! ```

pub mod bits;
pub mod codec;
pub mod frequency;
pub mod io;
pub mod payload;
pub mod table;
pub mod tree;
pub mod tree_codec;

// Re-export main types
pub use bits::{BitReader, BitSequence, BitWriter};
pub use codec::{
    decode, decode_with_summary, encode, encode_with_summary, inspect, CodecSummary, FrameLayout,
    HuffmanCodec, HuffmanCompressor, HuffmanDecompressor, Transcoded,
};
pub use frequency::FrequencyTable;
pub use io::{compress_stream, decompress_stream};
pub use table::CodeTable;
pub use tree::{CodeTree, Node, NodeId};
