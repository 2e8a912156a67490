#![allow(dead_code)]

use cipherforge::alphabet::{Alphabet, KnownAlphabet};
use cipherforge::hypothesis::{Hypothesis, Message};
use cipherforge::model::LanguageModel;
use std::sync::Arc;

pub const ENGLISH_SAMPLE: &str = "It was the best of times, it was the worst of times, \
it was the age of wisdom, it was the age of foolishness, it was the epoch of belief, \
it was the epoch of incredulity, it was the season of Light, it was the season of Darkness, \
it was the spring of hope, it was the winter of despair, we had everything before us, \
we had nothing before us, we were all going direct to Heaven, we were all going direct \
the other way. There were a king with a large jaw and a queen with a plain face, on the \
throne of England; there were a king with a large jaw and a queen with a fair face, on \
the throne of France.";

pub fn english() -> Alphabet {
    KnownAlphabet::English.alphabet()
}

pub fn english_model() -> Arc<LanguageModel> {
    Arc::new(LanguageModel::from_text(english(), ENGLISH_SAMPLE))
}

/// Two-symbol model that strongly prefers "b" after "b".
pub fn skewed_ab_model() -> Arc<LanguageModel> {
    let alphabet = Alphabet::new("ab").unwrap();
    let corpus = format!("{}a", "b".repeat(50));
    Arc::new(LanguageModel::from_text(alphabet, &corpus))
}

/// Encrypts `plain` (already normalized) with a key derived from `seed`.
/// Returns the ciphertext.
pub fn encrypt_with_seed(alphabet: &Alphabet, plain: &str, seed: u64) -> String {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut perm: Vec<char> = alphabet.symbols().to_vec();
    rng.shuffle(&mut perm);
    plain
        .chars()
        .map(|c| perm[alphabet.index_of(c).unwrap() as usize])
        .collect()
}

pub fn message(alphabet: &Alphabet, text: &str) -> Message {
    Message::new(alphabet, text).expect("message outside alphabet")
}

pub fn identity(message: &Message) -> Hypothesis {
    Hypothesis::identity(message)
}
