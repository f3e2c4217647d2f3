use std::fmt;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::engine::huffman::{HuffmanNode, HuffmanTree};
use crate::engine::policy::SumCheck;
use crate::error::{CodecError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// Bits after the last complete codeword were discarded.
    TrailingBits { position: usize, dropped: usize },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::TrailingBits { position, dropped } => write!(
                f,
                "dropped {} trailing bit(s) from bit {}: bitstream does not end on a codeword boundary",
                dropped, position
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub text: String,
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Walks the tree bit by bit, emitting a symbol at every leaf.
///
/// The whole bitstream is checked for non-binary tokens before the walk.
/// Running off the tree from the root fails at once whatever the policy.
/// Running off it further down restarts the walk at the root and re-reads the
/// same bit. A bitstream that ends away from the root is handled by `policy`.
pub fn decode(bits: &str, tree: &HuffmanTree, policy: SumCheck) -> Result<Decoded> {
    let invalid = bits
        .chars()
        .enumerate()
        .find(|&(_, c)| c != '0' && c != '1');
    if let Some((position, found)) = invalid {
        return Err(CodecError::MalformedBitstream { position, found });
    }

    let root = tree.root();
    let mut node = root;
    let mut text = String::new();
    let mut codeword_start = 0;
    let mut total = 0;
    let mut input = bits.chars().enumerate().peekable();

    while let Some(&(position, token)) = input.peek() {
        match node.child(token == '1') {
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                text.push(*symbol);
                input.next();
                node = root;
                codeword_start = position + 1;
            }
            Some(next) => {
                input.next();
                node = next;
            }
            None if std::ptr::eq(node, root) => {
                debug!(position, "dead branch at root");
                return Err(CodecError::TruncatedBitstream { position });
            }
            None => {
                trace!(position, "dead branch, restarting from root");
                node = root;
                codeword_start = position;
            }
        }
        total = position + 1;
    }

    let mut warnings = Vec::new();
    if !std::ptr::eq(node, root) {
        let dropped = total - codeword_start;
        match policy {
            SumCheck::Raise => {
                return Err(CodecError::TruncatedBitstream {
                    position: codeword_start,
                })
            }
            SumCheck::Warn => {
                let warning = DecodeWarning::TrailingBits {
                    position: codeword_start,
                    dropped,
                };
                warn!("{}", warning);
                warnings.push(warning);
            }
            SumCheck::Ignore => {
                debug!(position = codeword_start, dropped, "ignoring trailing bits");
            }
        }
    }

    Ok(Decoded { text, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frequency::FrequencyTable;

    fn tree_for(pairs: &[(char, usize)]) -> HuffmanTree {
        let freq: FrequencyTable = pairs.iter().copied().collect();
        HuffmanTree::build(&freq).unwrap()
    }

    // b:0 a:10 c:11 for a:2 b:3 c:2 -> merges (a,c) first, then b vs (a,c)
    fn abc() -> HuffmanTree {
        tree_for(&[('a', 2), ('b', 3), ('c', 2)])
    }

    #[test]
    fn decodes_clean_stream() {
        let decoded = decode("10011", &abc(), SumCheck::Raise).unwrap();
        assert_eq!(decoded.text, "abc");
        assert!(decoded.is_clean());
    }

    #[test]
    fn empty_stream_decodes_to_empty() {
        let decoded = decode("", &abc(), SumCheck::Raise).unwrap();
        assert_eq!(decoded.text, "");
    }

    #[test]
    fn non_binary_token_fails_under_every_policy() {
        for policy in [SumCheck::Ignore, SumCheck::Warn, SumCheck::Raise] {
            assert_eq!(
                decode("10x", &abc(), policy),
                Err(CodecError::MalformedBitstream { position: 2, found: 'x' })
            );
        }
    }

    #[test]
    fn non_binary_token_wins_over_dead_branch() {
        let tree = tree_for(&[('A', 4)]);
        for policy in [SumCheck::Ignore, SumCheck::Warn, SumCheck::Raise] {
            assert_eq!(
                decode("1x", &tree, policy),
                Err(CodecError::MalformedBitstream { position: 1, found: 'x' })
            );
        }
    }

    #[test]
    fn truncated_tail_per_policy() {
        let tree = abc();
        assert_eq!(
            decode("0101", &tree, SumCheck::Raise),
            Err(CodecError::TruncatedBitstream { position: 3 })
        );

        let ignored = decode("0101", &tree, SumCheck::Ignore).unwrap();
        assert_eq!(ignored.text, "ba");
        assert!(ignored.is_clean());

        let warned = decode("0101", &tree, SumCheck::Warn).unwrap();
        assert_eq!(warned.text, "ba");
        assert_eq!(
            warned.warnings,
            vec![DecodeWarning::TrailingBits { position: 3, dropped: 1 }]
        );
    }

    #[test]
    fn dead_branch_at_root_fails_regardless_of_policy() {
        let tree = tree_for(&[('A', 4)]);
        assert_eq!(decode("0000", &tree, SumCheck::Raise).unwrap().text, "AAAA");
        for policy in [SumCheck::Ignore, SumCheck::Warn, SumCheck::Raise] {
            assert_eq!(
                decode("001", &tree, policy),
                Err(CodecError::TruncatedBitstream { position: 2 })
            );
        }
    }

    #[test]
    fn dead_branch_below_root_restarts_walk() {
        // root -> (left: internal with only a left leaf 'x', right: leaf 'y')
        let tree = HuffmanTree::from_root(HuffmanNode::Internal {
            weight: 2,
            left: Some(Box::new(HuffmanNode::Internal {
                weight: 1,
                left: Some(Box::new(HuffmanNode::Leaf { weight: 1, symbol: 'x' })),
                right: None,
            })),
            right: Some(Box::new(HuffmanNode::Leaf { weight: 1, symbol: 'y' })),
        });
        // "0" then "1" runs off the tree; the "1" is re-read from the root as 'y'
        let decoded = decode("0100", &tree, SumCheck::Raise).unwrap();
        assert_eq!(decoded.text, "yx");
    }
}
