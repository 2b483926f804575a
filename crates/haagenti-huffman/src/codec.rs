//! Huffman codec: the full encode/decode pipeline and its trait implementations.
//!
//! Encode: frequencies → tree → serialized tree, then packed payload.
//! Decode: serialized tree → tree, then payload walk.
//!
//! Output is `[serialized tree][payload]`. Empty input maps to empty output in
//! both directions.

use haagenti_core::{Codec, Compressor, Decompressor, Result};
use serde::Serialize;
use tracing::debug;

use crate::payload::{decode_payload, encode_payload};
use crate::tree::CodeTree;
use crate::tree_codec::{deserialize_tree, serialize_tree};

/// Largest possible serialized tree: header, 256 symbols, 511 shape bits.
pub const MAX_TREE_SIZE: usize = 1 + 256 + 64;

/// Longest code any tree can assign (256 leaves in a chain).
const MAX_CODE_LEN: usize = 255;

/// Size report in the layout printed by the command-line tool.
///
/// `encoded_size` counts payload bytes without the trailing significant-bit
/// byte; that byte is accounted to `table_size` together with the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CodecSummary {
    /// Uncompressed size (input on encode, output on decode).
    pub original_size: usize,
    /// Packed payload bytes.
    pub encoded_size: usize,
    /// Serialized tree plus trailing byte.
    pub table_size: usize,
}

impl CodecSummary {
    fn from_parts(original_size: usize, tree_len: usize, payload_len: usize) -> Self {
        Self {
            original_size,
            encoded_size: payload_len.saturating_sub(1),
            table_size: tree_len + 1,
        }
    }

    /// Total encoded stream size.
    pub fn total_size(&self) -> usize {
        self.encoded_size + self.table_size
    }
}

/// Result of a codec call with its diagnostics.
#[derive(Debug, Clone)]
pub struct Transcoded {
    /// Output bytes.
    pub data: Vec<u8>,
    /// Size report.
    pub summary: CodecSummary,
    /// Tree used, `None` for empty input.
    pub tree: Option<CodeTree>,
}

/// Position of the tree and payload inside an encoded stream.
#[derive(Debug, Clone)]
pub struct FrameLayout {
    /// Decoded tree.
    pub tree: CodeTree,
    /// Bytes taken by the serialized tree.
    pub tree_size: usize,
    /// Bytes taken by the payload, trailing byte included.
    pub payload_size: usize,
}

/// Encode `input` into `[tree][payload]`.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    encode_with_summary(input).map(|t| t.data)
}

/// Decode a stream produced by [`encode`].
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    decode_with_summary(input).map(|t| t.data)
}

/// Encode and report sizes and the tree used.
pub fn encode_with_summary(input: &[u8]) -> Result<Transcoded> {
    let Some(tree) = CodeTree::from_bytes(input) else {
        debug!("empty input, nothing to encode");
        return Ok(Transcoded {
            data: Vec::new(),
            summary: CodecSummary::default(),
            tree: None,
        });
    };

    let tree_bytes = serialize_tree(&tree);
    let payload = encode_payload(input, &tree.code_table())?;
    let summary = CodecSummary::from_parts(input.len(), tree_bytes.len(), payload.len());

    let mut data = tree_bytes;
    data.extend_from_slice(&payload);

    debug!(
        original = input.len(),
        encoded = data.len(),
        symbols = tree.leaf_count(),
        "huffman encode"
    );

    Ok(Transcoded {
        data,
        summary,
        tree: Some(tree),
    })
}

/// Decode and report sizes and the tree found.
pub fn decode_with_summary(input: &[u8]) -> Result<Transcoded> {
    let Some(layout) = inspect(input)? else {
        debug!("empty input, nothing to decode");
        return Ok(Transcoded {
            data: Vec::new(),
            summary: CodecSummary::default(),
            tree: None,
        });
    };

    let payload = &input[layout.tree_size..];
    let data = decode_payload(payload, &layout.tree)?;
    let summary = CodecSummary::from_parts(data.len(), layout.tree_size, payload.len());

    debug!(
        encoded = input.len(),
        decoded = data.len(),
        symbols = layout.tree.leaf_count(),
        "huffman decode"
    );

    Ok(Transcoded {
        data,
        summary,
        tree: Some(layout.tree),
    })
}

/// Parse only the tree of an encoded stream. Returns `None` for empty input.
pub fn inspect(input: &[u8]) -> Result<Option<FrameLayout>> {
    if input.is_empty() {
        return Ok(None);
    }
    let (tree, tree_size) = deserialize_tree(input)?;
    Ok(Some(FrameLayout {
        tree,
        tree_size,
        payload_size: input.len() - tree_size,
    }))
}

/// Upper bound on the code length for an input of `input_len` bytes.
///
/// A code of depth `d` needs a total weight of at least `F(d + 2)`
/// (Fibonacci), which caps depth well below 255 for most inputs.
fn max_code_len(input_len: usize) -> usize {
    let (mut prev, mut cur) = (1usize, 2usize);
    let mut depth = 1;
    while depth < MAX_CODE_LEN {
        let next = prev.saturating_add(cur);
        if next > input_len {
            break;
        }
        prev = cur;
        cur = next;
        depth += 1;
    }
    depth
}

// ============================================================================
// Trait implementations
// ============================================================================

/// Huffman compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCompressor;

impl HuffmanCompressor {
    /// Create a new Huffman compressor.
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for HuffmanCompressor {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        encode(input)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        if input_len == 0 {
            return 0;
        }
        let payload_bits = input_len.saturating_mul(max_code_len(input_len));
        MAX_TREE_SIZE + payload_bits.div_ceil(8) + 1
    }
}

/// Huffman decompressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanDecompressor;

impl HuffmanDecompressor {
    /// Create a new Huffman decompressor.
    pub fn new() -> Self {
        Self
    }
}

impl Decompressor for HuffmanDecompressor {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}

/// Huffman codec combining compression and decompression.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec {
    compressor: HuffmanCompressor,
    decompressor: HuffmanDecompressor,
}

impl HuffmanCodec {
    /// Create a new Huffman codec.
    pub fn new() -> Self {
        Self {
            compressor: HuffmanCompressor::new(),
            decompressor: HuffmanDecompressor::new(),
        }
    }

    /// Compress and report sizes and the tree used.
    pub fn compress_with_summary(&self, input: &[u8]) -> Result<Transcoded> {
        encode_with_summary(input)
    }

    /// Decompress and report sizes and the tree found.
    pub fn decompress_with_summary(&self, input: &[u8]) -> Result<Transcoded> {
        decode_with_summary(input)
    }
}

impl Compressor for HuffmanCodec {
    fn name(&self) -> &'static str {
        Compressor::name(&self.compressor)
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compressor.compress(input)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        self.compressor.max_compressed_size(input_len)
    }
}

impl Decompressor for HuffmanCodec {
    fn name(&self) -> &'static str {
        Decompressor::name(&self.decompressor)
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompressor.decompress(input)
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        HuffmanCodec::new()
    }
}
