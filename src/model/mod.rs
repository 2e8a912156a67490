pub mod counts;

pub use self::counts::NgramCounts;
use crate::alphabet::{Alphabet, Symbol};
use crate::corpus::Corpus;
use crate::error::{CfResult, CipherError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

/// Add-one smoothed probability: `(count + 1) / (denominator + 1)`.
///
/// For a distribution over `n` outcomes observed `total` times, pass
/// `denominator = total + n - 1`.
#[inline(always)]
pub fn laplace_prob(count: u64, denominator: u64) -> f64 {
    (count + 1) as f64 / (denominator + 1) as f64
}

/// Character-level bigram model with Laplace smoothing.
///
/// Probability tables are computed once after counting and are read-only
/// afterwards. Every entry lies in (0, 1].
pub struct LanguageModel {
    alphabet: Alphabet,
    counts: NgramCounts,

    unigram_probs: Vec<f64>,
    // Flattened: prev * n + current
    bigram_probs: Vec<f64>,

    // -log2 of the tables above (energy hot path)
    unigram_costs: Vec<f64>,
    bigram_costs: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct ModelFile {
    alphabet: Alphabet,
    counts: NgramCounts,
}

impl LanguageModel {
    pub fn train(alphabet: Alphabet, corpus: &[Symbol]) -> Self {
        let counts = NgramCounts::from_symbols(alphabet.len(), corpus);
        Self::from_counts(alphabet, counts)
    }

    /// Normalizes `raw` into the alphabet before training.
    pub fn from_text(alphabet: Alphabet, raw: &str) -> Self {
        let corpus = Corpus::from_text(&alphabet, raw);
        Self::train(alphabet, corpus.symbols())
    }

    pub fn from_counts(alphabet: Alphabet, counts: NgramCounts) -> Self {
        let n = alphabet.len();
        let spread = n as u64 - 1;
        let total = counts.total_unigrams();

        let mut unigram_probs = vec![0.0; n];
        let mut bigram_probs = vec![0.0; n * n];

        for prev in 0..n {
            let p = prev as Symbol;
            unigram_probs[prev] = laplace_prob(counts.unigram(p), total + spread);

            let successors = counts.successors(p);
            for current in 0..n {
                bigram_probs[prev * n + current] =
                    laplace_prob(counts.bigram(current as Symbol, p), successors + spread);
            }
        }

        let unigram_costs = unigram_probs.iter().map(|p| -p.log2()).collect();
        let bigram_costs = bigram_probs.iter().map(|p| -p.log2()).collect();

        debug!(
            "Model tables built: {} symbols, {} unigrams observed",
            n, total
        );

        Self {
            alphabet,
            counts,
            unigram_probs,
            bigram_probs,
            unigram_costs,
            bigram_costs,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn counts(&self) -> &NgramCounts {
        &self.counts
    }

    /// P(symbol) when `predecessor` is `None`, otherwise P(symbol | predecessor).
    pub fn probability(&self, symbol: Symbol, predecessor: Option<Symbol>) -> f64 {
        match predecessor {
            None => self.unigram_probability(symbol),
            Some(prev) => self.bigram_probability(symbol, prev),
        }
    }

    #[inline(always)]
    pub fn unigram_probability(&self, symbol: Symbol) -> f64 {
        self.unigram_probs[symbol as usize]
    }

    #[inline(always)]
    pub fn bigram_probability(&self, symbol: Symbol, prev: Symbol) -> f64 {
        self.bigram_probs[prev as usize * self.alphabet.len() + symbol as usize]
    }

    /// `-log2 P(symbol)`
    #[inline(always)]
    pub fn unigram_cost(&self, symbol: Symbol) -> f64 {
        self.unigram_costs[symbol as usize]
    }

    /// `-log2 P(symbol | prev)`
    #[inline(always)]
    pub fn bigram_cost(&self, symbol: Symbol, prev: Symbol) -> f64 {
        self.bigram_costs[prev as usize * self.alphabet.len() + symbol as usize]
    }

    pub fn unigram_count(&self, symbol: Symbol) -> u64 {
        self.counts.unigram(symbol)
    }

    pub fn bigram_count(&self, symbol: Symbol, prev: Symbol) -> u64 {
        self.counts.bigram(symbol, prev)
    }

    pub fn total_unigrams(&self) -> u64 {
        self.counts.total_unigrams()
    }

    /// The `limit` most frequent `(prev, current, count)` pairs, highest first.
    pub fn most_common_bigrams(&self, limit: usize) -> Vec<(Symbol, Symbol, u64)> {
        let n = self.alphabet.len();
        let mut entries: Vec<(Symbol, Symbol, u64)> = self
            .counts
            .bigrams
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| ((i / n) as Symbol, (i % n) as Symbol, c))
            .collect();

        // Ties keep table order so output is stable.
        entries.sort_by(|a, b| b.2.cmp(&a.2));
        entries.truncate(limit);
        entries
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> CfResult<()> {
        let path = path.as_ref();
        let file = ModelFile {
            alphabet: self.alphabet.clone(),
            counts: self.counts.clone(),
        };
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &file)?;
        info!("💾 Model saved to {:?}", path);
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file: ModelFile = serde_json::from_str(&content)?;

        if file.counts.size != file.alphabet.len() || !file.counts.is_consistent() {
            return Err(CipherError::Validation(format!(
                "model counts in {:?} do not match an alphabet of {} symbols",
                path,
                file.alphabet.len()
            )));
        }

        info!("📂 Model loaded from {:?}", path);
        Ok(Self::from_counts(file.alphabet, file.counts))
    }
}
