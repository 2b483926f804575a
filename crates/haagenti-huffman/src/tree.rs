//! Huffman code tree.
//!
//! Nodes live in an arena and refer to their children by index, so the tree
//! has no recursive ownership. The root is a designated index.
//!
//! ## Construction
//!
//! Every present symbol becomes a leaf. The two lightest nodes are merged
//! under a new internal node (first extracted on the `zero` branch, second on
//! the `one` branch) until a single root remains.
//!
//! Equal weights are ordered by arena index. Leaves are allocated in
//! ascending symbol order and internal nodes as they are created, so ties
//! resolve first-in first-out. The output bytes depend on this rule.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::bits::BitSequence;
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// A tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// One byte value. Weight is only meaningful during construction.
    Leaf { symbol: u8, weight: u64 },
    /// Exactly two children; weight is the sum of theirs.
    Internal {
        zero: NodeId,
        one: NodeId,
        weight: u64,
    },
}

impl Node {
    /// Weight of this node.
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    /// Check if this is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Binary prefix-code tree stored as an arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl CodeTree {
    /// Build the tree for `data`. Returns `None` for empty input.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Build a tree by greedy pairwise merging of the lightest nodes.
    ///
    /// Returns `None` when no symbol is present.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Option<Self> {
        let mut builder = TreeBuilder::with_capacity(2 * freqs.distinct());
        let mut heap = BinaryHeap::new();

        for (symbol, count) in freqs.present() {
            let id = builder.push_leaf_weighted(symbol, count);
            heap.push(Reverse((count, id)));
        }

        while heap.len() > 1 {
            let (Some(Reverse((w0, zero))), Some(Reverse((w1, one)))) = (heap.pop(), heap.pop())
            else {
                break;
            };
            let id = builder.push_internal_weighted(zero, one, w0 + w1);
            heap.push(Reverse((w0 + w1, id)));
        }

        let Reverse((_, root)) = heap.pop()?;
        let tree = builder.finish(root);
        trace!(
            leaves = tree.leaf_count(),
            internal = tree.internal_count(),
            weight = tree.weight(),
            "built code tree"
        );
        Some(tree)
    }

    /// Root node index.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of internal nodes.
    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Check if the tree is a single leaf with no branches.
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Weight of the root (total symbol count for a built tree).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Symbol of a leaf node, `None` for internal nodes.
    #[inline]
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.nodes[id] {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child of `id` on the branch selected by `bit`, `None` for leaves.
    #[inline]
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { zero, one, .. } => Some(if bit { one } else { zero }),
            Node::Leaf { .. } => None,
        }
    }

    /// Node indices in preorder, zero branch before one branch.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Node::Internal { zero, one, .. } = self.nodes[id] {
                stack.push(one);
                stack.push(zero);
            }
        }
        order
    }

    /// Leaf symbols in preorder.
    pub fn symbols_preorder(&self) -> Vec<u8> {
        self.preorder()
            .into_iter()
            .filter_map(|id| self.symbol(id))
            .collect()
    }

    /// Derive the code of every leaf.
    ///
    /// A single-leaf tree gives its symbol the one-bit code `0`.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut code = BitSequence::new();

        if let Some(symbol) = self.symbol(self.root) {
            code.append(false);
            table.insert(symbol, code);
            return table;
        }

        self.fill_table(self.root, &mut code, &mut table);
        table
    }

    fn fill_table(&self, id: NodeId, code: &mut BitSequence, table: &mut CodeTable) {
        match self.nodes[id] {
            Node::Leaf { symbol, .. } => table.insert(symbol, code.clone()),
            Node::Internal { zero, one, .. } => {
                code.append(false);
                self.fill_table(zero, code, table);
                code.set_last_bit();
                self.fill_table(one, code, table);
                code.remove_last();
            }
        }
    }
}

/// Incremental arena construction, shared by frequency-based building and
/// tree deserialization.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a leaf carrying no construction weight.
    pub(crate) fn push_leaf(&mut self, symbol: u8) -> NodeId {
        self.push_leaf_weighted(symbol, 0)
    }

    pub(crate) fn push_leaf_weighted(&mut self, symbol: u8, weight: u64) -> NodeId {
        self.nodes.push(Node::Leaf { symbol, weight });
        self.nodes.len() - 1
    }

    /// Add an internal node over two existing nodes.
    pub(crate) fn push_internal(&mut self, zero: NodeId, one: NodeId) -> NodeId {
        let weight = self.nodes[zero].weight() + self.nodes[one].weight();
        self.push_internal_weighted(zero, one, weight)
    }

    fn push_internal_weighted(&mut self, zero: NodeId, one: NodeId, weight: u64) -> NodeId {
        self.nodes.push(Node::Internal { zero, one, weight });
        self.nodes.len() - 1
    }

    pub(crate) fn finish(self, root: NodeId) -> CodeTree {
        CodeTree {
            nodes: self.nodes,
            root,
        }
    }
}
