use std::cmp::Ordering;
use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::engine::frequency::FrequencyTable;
use crate::engine::min_heap::MinHeap;
use crate::error::{CodecError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        weight: usize,
        symbol: char,
    },
    Internal {
        weight: usize,
        left: Option<Box<HuffmanNode>>,
        right: Option<Box<HuffmanNode>>,
    },
}

impl HuffmanNode {
    pub fn weight(&self) -> usize {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    /// `None` for internal nodes.
    pub fn symbol(&self) -> Option<char> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    pub fn left(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { left, .. } => left.as_deref(),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { right, .. } => right.as_deref(),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    /// Child reached by following `bit` (false = left, true = right).
    pub fn child(&self, bit: bool) -> Option<&HuffmanNode> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }

    pub fn descriptor(&self) -> NodeDescriptor {
        NodeDescriptor {
            weight: self.weight(),
            symbol: self.symbol(),
        }
    }
}

/// Flattened view of one node: weight and symbol (absent for internal nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeDescriptor {
    pub weight: usize,
    pub symbol: Option<char>,
}

impl NodeDescriptor {
    pub fn leaf(weight: usize, symbol: char) -> Self {
        Self { weight, symbol: Some(symbol) }
    }

    pub fn internal(weight: usize) -> Self {
        Self { weight, symbol: None }
    }
}

/// Heap entry compared by `(weight, symbol)`. Internal nodes carry no symbol
/// and so sort before leaves of equal weight. Two internal nodes of equal
/// weight compare equal; the heap's sift order then decides between them.
struct Pending(HuffmanNode);

impl Pending {
    fn key(&self) -> (usize, Option<char>) {
        (self.0.weight(), self.0.symbol())
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.key().cmp(&other.key()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Leaves are seeded in the table's first-occurrence order.
    pub fn build(freq: &FrequencyTable) -> Result<Self> {
        let leaves = freq
            .iter()
            .map(|(symbol, weight)| Pending(HuffmanNode::Leaf { weight, symbol }))
            .collect();
        let mut heap = MinHeap::build(leaves);

        if heap.len() == 1 {
            let Some(Pending(only)) = heap.pop() else {
                return Err(CodecError::MalformedTree("empty heap".to_string()));
            };
            debug!(symbol = ?only.symbol(), weight = only.weight(), "single-symbol tree");
            let root = HuffmanNode::Internal {
                weight: only.weight(),
                left: Some(Box::new(only)),
                right: None,
            };
            return Ok(Self { root });
        }

        while heap.len() > 1 {
            let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
                break;
            };
            trace!(first = ?first.key(), second = ?second.key(), "merging nodes");

            // lesser-or-equal goes left
            let (left, right) = if second < first { (second, first) } else { (first, second) };
            heap.push(Pending(HuffmanNode::Internal {
                weight: left.0.weight() + right.0.weight(),
                left: Some(Box::new(left.0)),
                right: Some(Box::new(right.0)),
            }));
        }

        let root = heap
            .pop()
            .map(|p| p.0)
            .ok_or_else(|| CodecError::MalformedTree("no symbols to build from".to_string()))?;
        debug!(weight = root.weight(), symbols = freq.len(), "built huffman tree");
        Ok(Self { root })
    }

    /// Wraps an existing node. Used when a tree is assembled by hand.
    pub fn from_root(root: HuffmanNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    /// Breadth-first flattening. Every missing child slot shows up as `None`,
    /// so positions in the output pin down the exact shape.
    pub fn flatten(&self) -> Vec<Option<NodeDescriptor>> {
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(Some(&self.root));

        while let Some(slot) = queue.pop_front() {
            let Some(node) = slot else {
                out.push(None);
                continue;
            };
            out.push(Some(node.descriptor()));
            queue.push_back(node.left());
            queue.push_back(node.right());
        }

        out
    }
}
