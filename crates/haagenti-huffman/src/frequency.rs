//! Byte frequency counting.

/// Number of distinct byte values.
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence counts for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Count byte occurrences in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Add the bytes of `data` to the counts.
    pub fn update(&mut self, data: &[u8]) {
        // Unrolled by 4 to cut loop overhead on large inputs.
        let chunks = data.chunks_exact(4);
        let remainder = chunks.remainder();

        for chunk in chunks {
            self.counts[chunk[0] as usize] += 1;
            self.counts[chunk[1] as usize] += 1;
            self.counts[chunk[2] as usize] += 1;
            self.counts[chunk[3] as usize] += 1;
        }

        for &byte in remainder {
            self.counts[byte as usize] += 1;
        }
    }

    /// Set the count of `symbol` directly.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Count of `symbol`.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Check if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Raw counts indexed by byte value.
    pub fn counts(&self) -> &[u64; SYMBOL_COUNT] {
        &self.counts
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u64; SYMBOL_COUNT]> for FrequencyTable {
    fn from(counts: [u64; SYMBOL_COUNT]) -> Self {
        Self { counts }
    }
}
