//! Code tree serialization.
//!
//! ## Format
//!
//! ```text
//! +--------+---------------------+------------------------+
//! | header | symbols             | shape bits             |
//! | 1 byte | leaf_count bytes    | ceil(nodes / 8) bytes  |
//! +--------+---------------------+------------------------+
//! ```
//!
//! - `header` is `leaf_count - 1`, so 1 to 256 symbols fit in one byte.
//! - `symbols` lists leaf byte values in preorder (zero branch first).
//! - `shape` has one bit per node in the same preorder: `1` for an internal
//!   node, `0` for a leaf. MSB-first, zero-padded to a whole byte.
//!
//! A single-leaf tree is `[0x00, symbol, 0x00]`.

use haagenti_core::{Error, Result};

use crate::bits::{BitReader, BitSequence};
use crate::frequency::SYMBOL_COUNT;
use crate::tree::{CodeTree, Node, NodeId, TreeBuilder};

/// Serialize `tree` into its header, symbol list and shape bits.
pub fn serialize_tree(tree: &CodeTree) -> Vec<u8> {
    let leaf_count = tree.leaf_count();
    let mut out = Vec::with_capacity(serialized_len(tree));
    out.push((leaf_count - 1) as u8);

    let mut shape = BitSequence::new();
    for id in tree.preorder() {
        match *tree.node(id) {
            Node::Leaf { symbol, .. } => {
                out.push(symbol);
                shape.append(false);
            }
            Node::Internal { .. } => shape.append(true),
        }
    }

    out.extend_from_slice(shape.as_bytes());
    out
}

/// Size in bytes of the serialized form of `tree`.
pub fn serialized_len(tree: &CodeTree) -> usize {
    1 + tree.leaf_count() + tree.node_count().div_ceil(8)
}

/// Deserialize a tree from the start of `input`.
///
/// Returns the tree and the number of bytes it occupied; the shape section is
/// rounded up to a whole byte.
pub fn deserialize_tree(input: &[u8]) -> Result<(CodeTree, usize)> {
    let Some(&header) = input.first() else {
        return Err(Error::truncated_tree(1, 0));
    };

    let leaf_count = header as usize + 1;
    let shape_start = 1 + leaf_count;
    if input.len() <= shape_start {
        // Symbols plus at least one shape byte.
        return Err(Error::truncated_tree(shape_start + 1, input.len()));
    }

    let mut reader = BitReader::new(&input[shape_start..]);
    let mut decoder = ShapeDecoder {
        symbols: &input[1..shape_start],
        next_symbol: 0,
        internal_left: leaf_count - 1,
        seen: [false; SYMBOL_COUNT],
        available: input.len(),
        builder: TreeBuilder::with_capacity(2 * leaf_count - 1),
    };

    let root = decoder.decode_node(&mut reader)?;
    if decoder.next_symbol != leaf_count {
        return Err(Error::corrupted(format!(
            "tree shape uses {} of {} symbols",
            decoder.next_symbol, leaf_count
        )));
    }

    let consumed = shape_start + reader.bytes_consumed();
    Ok((decoder.builder.finish(root), consumed))
}

/// Recursive shape walk state.
struct ShapeDecoder<'a> {
    symbols: &'a [u8],
    next_symbol: usize,
    internal_left: usize,
    seen: [bool; SYMBOL_COUNT],
    available: usize,
    builder: TreeBuilder,
}

impl ShapeDecoder<'_> {
    // Depth is bounded by `internal_left`, at most 255.
    fn decode_node(&mut self, reader: &mut BitReader<'_>) -> Result<NodeId> {
        let is_internal = reader
            .read_bit()
            .map_err(|_| Error::truncated_tree(self.available + 1, self.available))?;

        if is_internal {
            if self.internal_left == 0 {
                return Err(Error::corrupted(
                    "tree shape has more internal nodes than the header allows",
                ));
            }
            self.internal_left -= 1;
            let zero = self.decode_node(reader)?;
            let one = self.decode_node(reader)?;
            return Ok(self.builder.push_internal(zero, one));
        }

        let Some(&symbol) = self.symbols.get(self.next_symbol) else {
            return Err(Error::corrupted("tree shape has more leaves than symbols"));
        };
        if std::mem::replace(&mut self.seen[symbol as usize], true) {
            return Err(Error::corrupted_at(
                format!("repeated symbol 0x{:02x}", symbol),
                1 + self.next_symbol,
            ));
        }
        self.next_symbol += 1;
        Ok(self.builder.push_leaf(symbol))
    }
}
