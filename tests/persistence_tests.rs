mod common;

use cipherforge::alphabet::KnownAlphabet;
use cipherforge::annealer::AnnealConfig;
use cipherforge::corpus::Corpus;
use cipherforge::error::CipherError;
use cipherforge::model::LanguageModel;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_model_survives_save_and_load() {
    let model = common::english_model();
    let file = NamedTempFile::new().unwrap();
    model.save(file.path()).unwrap();

    let loaded = LanguageModel::load(file.path()).unwrap();
    assert_eq!(loaded.alphabet(), model.alphabet());
    assert_eq!(loaded.counts(), model.counts());

    let n = model.alphabet().len() as u8;
    for s in 0..n {
        assert_eq!(loaded.unigram_probability(s), model.unigram_probability(s));
        for p in 0..n {
            assert_eq!(loaded.bigram_probability(s, p), model.bigram_probability(s, p));
        }
    }
}

#[test]
fn test_load_rejects_malformed_json() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{ not json").unwrap();
    assert!(matches!(
        LanguageModel::load(file.path()),
        Err(CipherError::Json(_))
    ));
}

#[test]
fn test_load_rejects_mismatched_counts() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"alphabet": "abc", "counts": {{"size": 2, "unigrams": [1, 2], "bigrams": [0, 1, 1, 0]}}}}"#
    )
    .unwrap();
    assert!(matches!(
        LanguageModel::load(file.path()),
        Err(CipherError::Validation(_))
    ));
}

#[test]
fn test_load_rejects_duplicate_alphabet() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"alphabet": "aa", "counts": {{"size": 2, "unigrams": [0, 0], "bigrams": [0, 0, 0, 0]}}}}"#
    )
    .unwrap();
    assert!(LanguageModel::load(file.path()).is_err());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        LanguageModel::load(&missing),
        Err(CipherError::Io(_))
    ));
}

#[test]
fn test_corpus_loads_and_normalizes_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Hello, World! 123").unwrap();

    let alphabet = KnownAlphabet::English.alphabet();
    let corpus = Corpus::load(&alphabet, file.path()).unwrap();
    assert_eq!(alphabet.decode(corpus.symbols()), "hello, world! ");
}

#[test]
fn test_hebrew_corpus_keeps_letters() {
    let alphabet = KnownAlphabet::Hebrew.alphabet();
    let corpus = Corpus::from_text(&alphabet, "תאטרון החלומות (Dream Theater)");
    assert_eq!(alphabet.decode(corpus.symbols()), "תאטרון החלומות ( )");
}

#[test]
fn test_anneal_config_from_json() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"initial_temperature": 50.0, "cooling_rate": 0.99, "threshold": 0.5, "seed": 9}}"#
    )
    .unwrap();

    let config = AnnealConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.initial_temperature, 50.0);
    assert_eq!(config.cooling_rate, 0.99);
    assert_eq!(config.threshold, 0.5);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.max_iterations, None);
    assert!(!config.track_best);
}

#[test]
fn test_anneal_config_file_is_validated() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"cooling_rate": 1.5}}"#).unwrap();
    assert!(matches!(
        AnnealConfig::load_from_file(file.path()),
        Err(CipherError::Config(_))
    ));
}
