use crate::error::{CfResult, CipherError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Dense index of a symbol inside its [`Alphabet`].
pub type Symbol = u8;

/// Largest alphabet we can address with a `Symbol`.
pub const MAX_SYMBOLS: usize = u8::MAX as usize;

/// Punctuation and whitespace accepted next to the letters of every preset.
pub const PUNCTUATION: &str = " ,.:\n#()!?'\"";

/// Fixed, ordered symbol set (Σ) shared by the language model and the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> CfResult<Self> {
        let symbols: Vec<char> = symbols.chars().collect();

        if symbols.len() < 2 {
            return Err(CipherError::Config(format!(
                "alphabet needs at least 2 symbols, got {}",
                symbols.len()
            )));
        }
        if symbols.len() > MAX_SYMBOLS {
            return Err(CipherError::Config(format!(
                "alphabet is limited to {} symbols, got {}",
                MAX_SYMBOLS,
                symbols.len()
            )));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(CipherError::Config(format!(
                    "alphabet contains duplicate symbol {:?}",
                    c
                )));
            }
        }

        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn index_of(&self, c: char) -> Option<Symbol> {
        self.symbols.iter().position(|&s| s == c).map(|i| i as Symbol)
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Character at `index`. Panics if `index` is outside the alphabet.
    pub fn symbol(&self, index: Symbol) -> char {
        self.symbols[index as usize]
    }

    /// Maps every character to its index, failing on the first one outside Σ.
    pub fn encode(&self, text: &str) -> CfResult<Vec<Symbol>> {
        text.chars()
            .enumerate()
            .map(|(position, c)| {
                self.index_of(c)
                    .ok_or(CipherError::UnknownSymbol { symbol: c, position })
            })
            .collect()
    }

    pub fn decode(&self, symbols: &[Symbol]) -> String {
        symbols.iter().map(|&s| self.symbol(s)).collect()
    }

    /// Lower-cases `text` and drops every character outside Σ.
    ///
    /// Training corpora and ciphertext must go through this same rule so
    /// that their symbol sets line up.
    pub fn normalize(&self, text: &str) -> String {
        self.decode(&self.normalize_symbols(text))
    }

    /// [`Alphabet::normalize`] straight to symbols, in one pass.
    pub fn normalize_symbols(&self, text: &str) -> Vec<Symbol> {
        text.chars()
            .flat_map(char::to_lowercase)
            .filter_map(|c| self.index_of(c))
            .collect()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = CipherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownAlphabet {
    English,
    Hebrew,
}

impl KnownAlphabet {
    pub fn letters(&self) -> &'static str {
        match self {
            Self::English => "abcdefghijklmnopqrstuvwxyz",
            // Includes the five final forms.
            Self::Hebrew => "אבגדהוזחטיכךלמםנןסעפףצץקרשת",
        }
    }

    pub fn alphabet(&self) -> Alphabet {
        let symbols = format!("{}{}", self.letters(), PUNCTUATION);
        // Presets are fixed, duplicate-free and well under the size limit.
        Alphabet {
            symbols: symbols.chars().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rejects_duplicates() {
        assert!(Alphabet::new("abca").is_err());
    }

    #[test]
    fn test_rejects_single_symbol() {
        assert!(Alphabet::new("a").is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in KnownAlphabet::iter() {
            let alphabet = preset.alphabet();
            let rebuilt = Alphabet::new(&String::from(alphabet.clone())).unwrap();
            assert_eq!(rebuilt, alphabet, "preset {} is not a valid alphabet", preset);
        }
    }

    #[test]
    fn test_encode_reports_position() {
        let alphabet = Alphabet::new("ab ").unwrap();
        match alphabet.encode("ab a$") {
            Err(CipherError::UnknownSymbol { symbol, position }) => {
                assert_eq!(symbol, '$');
                assert_eq!(position, 4);
            }
            other => panic!("expected UnknownSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_lowercases_and_filters() {
        let alphabet = KnownAlphabet::English.alphabet();
        assert_eq!(alphabet.normalize("Hello, World! 42"), "hello, world! ");
    }
}
