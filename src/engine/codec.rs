use serde_json::Value;
use tracing::debug;

use crate::engine::codes::CodeTable;
use crate::engine::config::EngineLimits;
use crate::engine::decompressor::Decoded;
use crate::engine::frequency::{self, FrequencyTable};
use crate::engine::huffman::{HuffmanTree, NodeDescriptor};
use crate::engine::policy::SumCheck;
use crate::engine::stats::CodecStats;
use crate::engine::{compressor, decompressor};
use crate::error::Result;

/// A Huffman codec built from one input sequence.
///
/// The tree and code table are derived once at construction and never change,
/// so a codec can be shared across threads for encoding and decoding.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    input: String,
    freq: FrequencyTable,
    tree: HuffmanTree,
    table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(text: &str) -> Result<Self> {
        Self::with_limits(text, &EngineLimits::default())
    }

    pub fn with_limits(text: &str, limits: &EngineLimits) -> Result<Self> {
        frequency::check_limit(text.chars().count(), limits)?;
        let symbols: Vec<char> = text.chars().collect();
        Self::from_chars(symbols, limits)
    }

    /// Builds from a list of tokens, each of which must be a single symbol.
    pub fn from_symbols<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let symbols = frequency::symbols_from_tokens(tokens)?;
        Self::from_chars(symbols, &EngineLimits::default())
    }

    /// Builds from a JSON string or an array of one-character strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        let symbols = frequency::symbols_from_json(value)?;
        Self::from_chars(symbols, &EngineLimits::default())
    }

    fn from_chars(symbols: Vec<char>, limits: &EngineLimits) -> Result<Self> {
        let freq = frequency::count_symbols(&symbols, limits)?;
        let tree = HuffmanTree::build(&freq)?;
        let table = CodeTable::build(&tree)?;
        debug!(
            symbols = symbols.len(),
            distinct = freq.len(),
            "codec ready"
        );

        Ok(Self {
            input: symbols.into_iter().collect(),
            freq,
            tree,
            table,
        })
    }

    /// The sequence the codec was built from.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freq
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Bitstream of the original input.
    pub fn encode(&self) -> Result<String> {
        self.encode_text(&self.input)
    }

    /// Bitstream of `text`, which may only use symbols from the original input.
    pub fn encode_text(&self, text: &str) -> Result<String> {
        compressor::encode(text.chars(), &self.table)
    }

    /// Decodes `bits`, or this codec's own encoding when `bits` is `None`.
    pub fn decode(&self, bits: Option<&str>, policy: SumCheck) -> Result<Decoded> {
        match bits {
            Some(bits) => decompressor::decode(bits, &self.tree, policy),
            None => decompressor::decode(&self.encode()?, &self.tree, policy),
        }
    }

    /// Same as [`decode`](Self::decode) with the policy given by name.
    pub fn decode_with_policy(&self, bits: Option<&str>, policy: &str) -> Result<Decoded> {
        let policy: SumCheck = policy.parse()?;
        self.decode(bits, policy)
    }

    pub fn flatten(&self) -> Vec<Option<NodeDescriptor>> {
        self.tree.flatten()
    }

    pub fn stats(&self) -> CodecStats {
        CodecStats::compute(&self.freq, &self.table)
    }
}
