pub mod decrypt;
pub mod sweep;
pub mod train;

use cipherforge::alphabet::KnownAlphabet;
use cipherforge::corpus::{self, Corpus};
use cipherforge::error::{CfResult, CipherError};
use cipherforge::hypothesis::Message;
use cipherforge::model::LanguageModel;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Where the language model comes from: a saved model or a raw corpus.
#[derive(Args, Debug, Clone)]
pub struct ModelSource {
    #[arg(short, long, conflicts_with = "corpus")]
    pub model: Option<PathBuf>,

    #[arg(short, long)]
    pub corpus: Option<PathBuf>,

    /// Alphabet preset used when training from a corpus.
    #[arg(short, long, default_value = "english")]
    pub alphabet: KnownAlphabet,
}

impl ModelSource {
    pub fn load(&self) -> CfResult<LanguageModel> {
        match (&self.model, &self.corpus) {
            (Some(path), _) => LanguageModel::load(path),
            (None, Some(path)) => {
                let alphabet = self.alphabet.alphabet();
                info!("📚 Training on {:?} ({} alphabet)", path, self.alphabet);
                let corpus = Corpus::load(&alphabet, path)?;
                Ok(LanguageModel::train(alphabet, corpus.symbols()))
            }
            (None, None) => Err(CipherError::Config(
                "either --model or --corpus is required".to_string(),
            )),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MessageSource {
    /// File holding the ciphertext.
    #[arg(long, conflicts_with = "text")]
    pub message: Option<PathBuf>,

    /// Ciphertext given inline.
    #[arg(short, long)]
    pub text: Option<String>,
}

impl MessageSource {
    /// Reads the ciphertext and normalizes it with the model's alphabet.
    pub fn load(&self, model: &LanguageModel) -> CfResult<Message> {
        let raw = match (&self.message, &self.text) {
            (Some(path), _) => corpus::read_text(path)?,
            (None, Some(text)) => text.clone(),
            (None, None) => {
                return Err(CipherError::Config(
                    "either --message or --text is required".to_string(),
                ))
            }
        };
        let clean = model.alphabet().normalize(&raw);
        let message = Message::new(model.alphabet(), &clean)?;
        info!(
            "✉️  Message: {} symbols, {} distinct",
            message.len(),
            message.domain().len()
        );
        Ok(message)
    }
}
