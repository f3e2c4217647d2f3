use serde::Serialize;

use crate::engine::codes::CodeTable;
use crate::engine::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodecStats {
    pub symbols: usize,
    pub distinct_symbols: usize,
    pub encoded_bits: usize,
    /// Size of the input at 8 bits per symbol.
    pub baseline_bits: usize,
    pub ratio: f64,
    pub average_code_length: f64,
}

impl CodecStats {
    pub fn compute(freq: &FrequencyTable, table: &CodeTable) -> Self {
        let symbols = freq.total();
        let encoded_bits: usize = freq
            .iter()
            .map(|(symbol, count)| count * table.get(symbol).map_or(0, str::len))
            .sum();
        let baseline_bits = symbols * 8;

        let ratio = if baseline_bits > 0 {
            encoded_bits as f64 / baseline_bits as f64
        } else {
            0.0
        };
        let average_code_length = if symbols > 0 {
            encoded_bits as f64 / symbols as f64
        } else {
            0.0
        };

        Self {
            symbols,
            distinct_symbols: freq.len(),
            encoded_bits,
            baseline_bits,
            ratio,
            average_code_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::huffman::HuffmanTree;

    #[test]
    fn counts_encoded_bits() {
        let freq: FrequencyTable = [('a', 2), ('b', 3), ('c', 2)].into_iter().collect();
        let table = CodeTable::build(&HuffmanTree::build(&freq).unwrap()).unwrap();
        let stats = CodecStats::compute(&freq, &table);

        // b:0 a:10 c:11
        assert_eq!(stats.symbols, 7);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.encoded_bits, 3 + 2 * 2 + 2 * 2);
        assert_eq!(stats.baseline_bits, 56);
        assert!((stats.average_code_length - 11.0 / 7.0).abs() < 1e-9);
    }
}
