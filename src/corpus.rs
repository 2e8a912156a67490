use crate::alphabet::{Alphabet, Symbol};
use crate::error::CfResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Training text already reduced to symbols of one alphabet.
#[derive(Debug, Clone)]
pub struct Corpus {
    symbols: Vec<Symbol>,
}

impl Corpus {
    /// Normalizes `raw` into the alphabet and keeps only the symbol sequence.
    pub fn from_text(alphabet: &Alphabet, raw: &str) -> Self {
        let symbols = alphabet.normalize_symbols(raw);

        debug!(
            "Corpus normalized: {} raw chars -> {} symbols",
            raw.chars().count(),
            symbols.len()
        );

        Self { symbols }
    }

    pub fn load<P: AsRef<Path>>(alphabet: &Alphabet, path: P) -> CfResult<Self> {
        let raw = read_text(path)?;
        Ok(Self::from_text(alphabet, &raw))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

pub fn read_text<P: AsRef<Path>>(path: P) -> CfResult<String> {
    let path = path.as_ref();
    debug!("Reading text from {:?}", path);
    read_from(File::open(path)?)
}

pub fn read_from<R: Read>(mut reader: R) -> CfResult<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}
