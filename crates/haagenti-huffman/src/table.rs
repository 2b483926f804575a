//! Symbol to code mapping derived from a [`CodeTree`](crate::CodeTree).

use std::fmt;

use crate::bits::BitSequence;
use crate::frequency::SYMBOL_COUNT;

/// Codes for every present symbol.
///
/// Lookups are indexed by byte value; iteration follows the order the codes
/// were derived in, which is preorder of the tree's leaves.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<BitSequence>>,
    order: Vec<u8>,
}

impl CodeTable {
    pub(crate) fn new() -> Self {
        Self {
            codes: vec![None; SYMBOL_COUNT],
            order: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, symbol: u8, code: BitSequence) {
        if self.codes[symbol as usize].replace(code).is_none() {
            self.order.push(symbol);
        }
    }

    /// Code of `symbol`, if it is present in the tree.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&BitSequence> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Longest code length in bits.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Total packed bits needed to encode `data`, or `None` if a byte has no
    /// code.
    pub fn encoded_bits(&self, data: &[u8]) -> Option<usize> {
        data.iter()
            .map(|&b| self.get(b).map(BitSequence::len))
            .sum()
    }

    /// `(symbol, code)` pairs in derivation order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSequence)> + '_ {
        self.order
            .iter()
            .filter_map(move |&symbol| self.get(symbol).map(|code| (symbol, code)))
    }
}

/// One line per symbol: the code as `0`/`1` characters, a space, then the
/// byte value in decimal.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "{} {}", code, symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::CodeTree;

    #[test]
    fn test_dump_single_leaf() {
        let table = CodeTree::from_bytes(b"zzzz").unwrap().code_table();
        assert_eq!(table.to_string(), "0 122\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.max_code_len(), 1);
    }

    #[test]
    fn test_dump_in_preorder() {
        let table = CodeTree::from_bytes(b"abcc").unwrap().code_table();
        assert_eq!(table.to_string(), "0 99\n10 97\n11 98\n");
    }

    #[test]
    fn test_missing_symbol() {
        let table = CodeTree::from_bytes(b"ab").unwrap().code_table();
        assert!(table.get(b'c').is_none());
        assert_eq!(table.encoded_bits(b"abc"), None);
        assert_eq!(table.encoded_bits(b"abba"), Some(4));
    }
}
