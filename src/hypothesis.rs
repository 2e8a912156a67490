use crate::alphabet::{Alphabet, Symbol};
use crate::annealer::RandomSource;
use crate::error::{CfResult, CipherError};
use crate::model::LanguageModel;
use std::sync::Arc;

/// Ciphertext encoded into alphabet symbols.
#[derive(Debug, Clone)]
pub struct Message {
    alphabet: Alphabet,
    symbols: Vec<Symbol>,
    // Distinct symbols in order of first appearance.
    domain: Arc<[Symbol]>,
}

impl Message {
    /// Encodes `text`, which must already be normalized into `alphabet`.
    pub fn new(alphabet: &Alphabet, text: &str) -> CfResult<Self> {
        let symbols = alphabet.encode(text)?;
        Self::from_symbols(alphabet, symbols)
    }

    /// Wraps already-encoded symbols. Every symbol must index into `alphabet`.
    pub fn from_symbols(alphabet: &Alphabet, symbols: Vec<Symbol>) -> CfResult<Self> {
        let n = alphabet.len();
        let mut seen = vec![false; n];
        let mut domain = Vec::new();
        for (position, &s) in symbols.iter().enumerate() {
            let i = s as usize;
            if i >= n {
                return Err(CipherError::Validation(format!(
                    "symbol index {} at position {} is outside an alphabet of {} symbols",
                    i, position, n
                )));
            }
            if !seen[i] {
                seen[i] = true;
                domain.push(s);
            }
        }

        Ok(Self {
            alphabet: alphabet.clone(),
            symbols,
            domain: domain.into(),
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn domain(&self) -> &[Symbol] {
        &self.domain
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Fails unless `model` was trained on this message's alphabet.
    pub fn check_model(&self, model: &LanguageModel) -> CfResult<()> {
        if model.alphabet() != &self.alphabet {
            return Err(CipherError::Validation(format!(
                "message alphabet ({} symbols) does not match model alphabet ({} symbols)",
                self.alphabet.len(),
                model.alphabet().len()
            )));
        }
        Ok(())
    }
}

/// A candidate substitution key.
///
/// `key` is a permutation of the whole alphabet; the message's `i`-th
/// observed symbol decrypts to `key[i]`. Positions past the domain size
/// are spare symbols that no ciphertext symbol maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    key: Vec<Symbol>,
    domain: Arc<[Symbol]>,
}

impl Hypothesis {
    /// The alphabet in its own order.
    pub fn identity(message: &Message) -> Self {
        Self {
            key: (0..message.alphabet_size()).map(|i| i as Symbol).collect(),
            domain: message.domain.clone(),
        }
    }

    pub fn from_key(message: &Message, key: Vec<Symbol>) -> CfResult<Self> {
        let n = message.alphabet_size();
        if key.len() != n {
            return Err(CipherError::Validation(format!(
                "key has {} symbols, alphabet has {}",
                key.len(),
                n
            )));
        }

        let mut seen = vec![false; n];
        for &s in &key {
            let i = s as usize;
            if i >= n || seen[i] {
                return Err(CipherError::Validation(format!(
                    "key is not a permutation of the alphabet (symbol index {})",
                    i
                )));
            }
            seen[i] = true;
        }

        Ok(Self {
            key,
            domain: message.domain.clone(),
        })
    }

    pub fn from_key_str(alphabet: &Alphabet, message: &Message, key: &str) -> CfResult<Self> {
        Self::from_key(message, alphabet.encode(key)?)
    }

    pub fn key(&self) -> &[Symbol] {
        &self.key
    }

    /// Same key with two distinct positions swapped. `self` is untouched.
    pub fn neighbor<R: RandomSource>(&self, rng: &mut R) -> Self {
        let mut key = self.key.clone();
        if key.len() >= 2 {
            let (a, b) = rng.distinct_pair(key.len());
            key.swap(a, b);
        }
        Self {
            key,
            domain: self.domain.clone(),
        }
    }

    /// Lookup table cipher symbol -> plain symbol over the full alphabet.
    /// Symbols outside the message domain map to themselves.
    fn decrypt_table(&self) -> Vec<Symbol> {
        let mut table: Vec<Symbol> = (0..self.key.len()).map(|i| i as Symbol).collect();
        for (i, &c) in self.domain.iter().enumerate() {
            table[c as usize] = self.key[i];
        }
        table
    }

    /// Symbols outside the message domain, including ones past the end of
    /// the alphabet, pass through unchanged.
    pub fn decrypt(&self, text: &[Symbol]) -> Vec<Symbol> {
        let table = self.decrypt_table();
        text.iter()
            .map(|&s| table.get(s as usize).copied().unwrap_or(s))
            .collect()
    }

    /// Inverse of [`Hypothesis::decrypt`]: plain symbols in the key's image
    /// go back to their cipher symbol, anything else passes through.
    pub fn encrypt(&self, text: &[Symbol]) -> Vec<Symbol> {
        let mut table: Vec<Symbol> = (0..self.key.len()).map(|i| i as Symbol).collect();
        for (i, &c) in self.domain.iter().enumerate() {
            table[self.key[i] as usize] = c;
        }
        text.iter()
            .map(|&s| table.get(s as usize).copied().unwrap_or(s))
            .collect()
    }

    /// Fails unless this key was built for `message`.
    pub fn check_message(&self, message: &Message) -> CfResult<()> {
        if self.key.len() != message.alphabet_size() || self.domain[..] != message.domain[..] {
            return Err(CipherError::Validation(
                "key was built for a different message".to_string(),
            ));
        }
        Ok(())
    }

    /// Negative log2-likelihood of the decrypted message under `model`.
    ///
    /// The first symbol is scored by its unigram probability and every
    /// following one by its bigram probability given its predecessor.
    /// An empty message has energy 0. Fails when the message, key and
    /// model disagree on the alphabet.
    pub fn energy(&self, message: &Message, model: &LanguageModel) -> CfResult<f64> {
        message.check_model(model)?;
        self.check_message(message)?;
        Ok(self.score(message, model))
    }

    /// [`Hypothesis::energy`] without the compatibility checks.
    pub(crate) fn score(&self, message: &Message, model: &LanguageModel) -> f64 {
        let text = message.symbols();
        let Some(&first) = text.first() else {
            return 0.0;
        };

        let table = self.decrypt_table();
        let mut prev = table[first as usize];
        let mut energy = model.unigram_cost(prev);

        for &s in &text[1..] {
            let current = table[s as usize];
            energy += model.bigram_cost(current, prev);
            prev = current;
        }
        energy
    }

    /// `(cipher, plain)` pairs for every symbol observed in the message.
    pub fn mapping(&self, alphabet: &Alphabet) -> Vec<(char, char)> {
        self.domain
            .iter()
            .enumerate()
            .map(|(i, &c)| (alphabet.symbol(c), alphabet.symbol(self.key[i])))
            .collect()
    }

    pub fn key_string(&self, alphabet: &Alphabet) -> String {
        alphabet.decode(&self.key)
    }
}
