use std::collections::HashMap;

use serde_json::Value;

use crate::engine::config::EngineLimits;
use crate::error::{CodecError, Result};

/// Occurrence count per symbol, kept in order of first occurrence.
///
/// Tree construction seeds its heap in this order, so it is part of what
/// decides the final tree shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, usize)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: char, count: usize) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, count));
            }
        }
    }

    pub fn get(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(char, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        let mut freq = FrequencyTable::new();
        for (symbol, count) in iter {
            freq.add(symbol, count);
        }
        freq
    }
}

pub fn check_limit(len: usize, limits: &EngineLimits) -> Result<()> {
    if len > limits.max_input_symbols {
        return Err(CodecError::InvalidInput(format!(
            "input has {} symbols, limit is {}",
            len, limits.max_input_symbols
        )));
    }
    Ok(())
}

pub fn count_symbols(symbols: &[char], limits: &EngineLimits) -> Result<FrequencyTable> {
    if symbols.is_empty() {
        return Err(CodecError::InvalidInput(
            "expected a non-empty sequence of symbols".to_string(),
        ));
    }
    check_limit(symbols.len(), limits)?;

    Ok(symbols.iter().map(|&symbol| (symbol, 1)).collect())
}

/// Splits a token list into symbols. Every token must be exactly one `char`.
pub fn symbols_from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<char>> {
    if tokens.is_empty() {
        return Err(CodecError::InvalidInput("empty token collection".to_string()));
    }

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            single_char(token.as_ref()).ok_or_else(|| {
                CodecError::InvalidInput(format!(
                    "token {} ({:?}) is not a single symbol",
                    i,
                    token.as_ref()
                ))
            })
        })
        .collect()
}

/// Accepts a JSON string or an array of one-character strings.
pub fn symbols_from_json(value: &Value) -> Result<Vec<char>> {
    match value {
        Value::String(s) => Ok(s.chars().collect()),
        Value::Array(items) => {
            let tokens = items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        CodecError::InvalidInput(format!("array element {} is not a string", item))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            symbols_from_tokens(&tokens)
        }
        Value::Number(n) => Err(CodecError::InvalidInput(format!(
            "expected a symbol sequence, got number {}",
            n
        ))),
        other => Err(CodecError::InvalidInput(format!(
            "expected a symbol sequence, got {}",
            other
        ))),
    }
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_each_symbol() {
        let symbols: Vec<char> = "aabccc".chars().collect();
        let freq = count_symbols(&symbols, &EngineLimits::default()).unwrap();
        assert_eq!(freq.get('a'), Some(2));
        assert_eq!(freq.get('b'), Some(1));
        assert_eq!(freq.get('c'), Some(3));
        assert_eq!(freq.len(), 3);
        assert_eq!(freq.total(), 6);
    }

    #[test]
    fn keeps_first_occurrence_order() {
        let symbols: Vec<char> = "cabbac".chars().collect();
        let freq = count_symbols(&symbols, &EngineLimits::default()).unwrap();
        assert_eq!(freq.iter().collect::<Vec<_>>(), vec![('c', 2), ('a', 2), ('b', 2)]);
    }

    #[test]
    fn rejects_empty_sequence() {
        let err = count_symbols(&[], &EngineLimits::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput(_)));
    }

    #[test]
    fn enforces_symbol_limit() {
        let limits = EngineLimits { max_input_symbols: 3 };
        let symbols: Vec<char> = "abcd".chars().collect();
        assert!(matches!(
            count_symbols(&symbols, &limits),
            Err(CodecError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_multi_char_tokens() {
        assert!(matches!(
            symbols_from_tokens(&["a", "bc"]),
            Err(CodecError::InvalidInput(_))
        ));
        assert!(matches!(
            symbols_from_tokens(&["a", ""]),
            Err(CodecError::InvalidInput(_))
        ));
        assert_eq!(symbols_from_tokens(&["x", "y"]).unwrap(), vec!['x', 'y']);
    }

    #[test]
    fn json_values() {
        assert_eq!(symbols_from_json(&json!("ab")).unwrap(), vec!['a', 'b']);
        assert_eq!(symbols_from_json(&json!(["a", "b"])).unwrap(), vec!['a', 'b']);
        assert!(symbols_from_json(&json!(42)).is_err());
        assert!(symbols_from_json(&json!([])).is_err());
        assert!(symbols_from_json(&json!({})).is_err());
        assert!(symbols_from_json(&json!([1, 2])).is_err());
    }
}
