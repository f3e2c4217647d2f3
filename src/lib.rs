//! Huffman codec: frequency counting, deterministic tree construction,
//! prefix-free code tables, and a bit-by-bit decoder with configurable
//! handling of truncated bitstreams.

pub mod config;
pub mod engine;
pub mod error;

pub use engine::codes::CodeTable;
pub use engine::huffman::{HuffmanNode, HuffmanTree, NodeDescriptor};
pub use engine::stats::CodecStats;
pub use engine::{DecodeWarning, Decoded, HuffmanCodec, SumCheck};
pub use error::{CodecError, Result};
