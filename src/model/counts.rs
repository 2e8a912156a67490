use crate::alphabet::Symbol;
use serde::{Deserialize, Serialize};

/// Raw unigram and bigram occurrence counts over a fixed alphabet.
///
/// Bigrams live in a flattened `n * n` matrix indexed `prev * n + current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramCounts {
    pub size: usize,
    pub unigrams: Vec<u64>,
    pub bigrams: Vec<u64>,
}

impl NgramCounts {
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            unigrams: vec![0; size],
            bigrams: vec![0; size * size],
        }
    }

    /// Counts every symbol, then every adjacent `(prev, current)` pair.
    pub fn from_symbols(size: usize, corpus: &[Symbol]) -> Self {
        let mut counts = Self::zeroed(size);

        for &s in corpus {
            counts.unigrams[s as usize] += 1;
        }
        for pair in corpus.windows(2) {
            let prev = pair[0] as usize;
            let current = pair[1] as usize;
            counts.bigrams[prev * size + current] += 1;
        }

        counts
    }

    #[inline(always)]
    pub fn unigram(&self, symbol: Symbol) -> u64 {
        self.unigrams[symbol as usize]
    }

    #[inline(always)]
    pub fn bigram(&self, symbol: Symbol, prev: Symbol) -> u64 {
        self.bigrams[prev as usize * self.size + symbol as usize]
    }

    pub fn total_unigrams(&self) -> u64 {
        self.unigrams.iter().sum()
    }

    /// Number of bigrams whose first symbol is `prev`.
    pub fn successors(&self, prev: Symbol) -> u64 {
        let start = prev as usize * self.size;
        self.bigrams[start..start + self.size].iter().sum()
    }

    pub fn is_consistent(&self) -> bool {
        self.unigrams.len() == self.size && self.bigrams.len() == self.size * self.size
    }
}
