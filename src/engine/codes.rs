use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::engine::hash::sha256;
use crate::engine::huffman::{HuffmanNode, HuffmanTree};
use crate::error::{CodecError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Depth-first walk with an explicit stack; `0` on left edges, `1` on right.
    pub fn build(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(&HuffmanNode, String)> = vec![(tree.root(), String::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = if path.is_empty() { "0".to_string() } else { path };
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { left: None, right: None, weight } => {
                    return Err(CodecError::MalformedTree(format!(
                        "internal node of weight {} at path {:?} has no children",
                        weight, path
                    )));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push((&**right, format!("{}1", path)));
                    }
                    if let Some(left) = left {
                        stack.push((&**left, format!("{}0", path)));
                    }
                }
            }
        }

        debug!(symbols = codes.len(), "generated code table");
        Ok(Self { codes })
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }

    /// True when no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut words: Vec<&str> = self.codes.values().map(String::as_str).collect();
        words.sort_unstable();
        // after sorting, a prefix always sits directly before some word it prefixes
        words.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Hex SHA-256 over `symbol:code` lines in symbol order.
    pub fn fingerprint(&self) -> String {
        let mut buf = String::new();
        for (symbol, code) in self.iter() {
            buf.push(symbol);
            buf.push(':');
            buf.push_str(code);
            buf.push('\n');
        }
        hex::encode(sha256(buf.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frequency::FrequencyTable;

    fn table_for(pairs: &[(char, usize)]) -> CodeTable {
        let freq: FrequencyTable = pairs.iter().copied().collect();
        CodeTable::build(&HuffmanTree::build(&freq).unwrap()).unwrap()
    }

    #[test]
    fn single_symbol_gets_zero() {
        let table = table_for(&[('A', 7)]);
        assert_eq!(table.get('A'), Some("0"));
    }

    #[test]
    fn leaf_root_gets_zero() {
        let tree = HuffmanTree::from_root(HuffmanNode::Leaf { weight: 1, symbol: 'x' });
        let table = CodeTable::build(&tree).unwrap();
        assert_eq!(table.get('x'), Some("0"));
    }

    #[test]
    fn childless_internal_is_rejected() {
        let tree = HuffmanTree::from_root(HuffmanNode::Internal {
            weight: 2,
            left: Some(Box::new(HuffmanNode::Leaf { weight: 2, symbol: 'a' })),
            right: Some(Box::new(HuffmanNode::Internal { weight: 0, left: None, right: None })),
        });
        assert!(matches!(CodeTable::build(&tree), Err(CodecError::MalformedTree(_))));
    }

    #[test]
    fn codes_are_prefix_free() {
        let table = table_for(&[('a', 45), ('b', 13), ('c', 12), ('d', 16), ('e', 9), ('f', 5)]);
        assert_eq!(table.len(), 6);
        assert!(table.is_prefix_free());
        assert!(table.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn detects_prefix_violation() {
        let mut codes = BTreeMap::new();
        codes.insert('a', "0".to_string());
        codes.insert('b', "01".to_string());
        assert!(!CodeTable { codes }.is_prefix_free());
    }

    #[test]
    fn fingerprint_is_stable() {
        let a = table_for(&[('x', 3), ('y', 1), ('z', 1)]);
        let b = table_for(&[('z', 1), ('y', 1), ('x', 3)]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
