use super::ModelSource;
use crate::reports;
use cipherforge::error::{CfResult, CipherError};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub source: ModelSource,

    /// Where to save the trained model (JSON).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of most common bigrams to print.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub fn run(args: TrainArgs) -> CfResult<()> {
    if args.source.corpus.is_none() {
        return Err(CipherError::Config(
            "train needs a --corpus to learn from".to_string(),
        ));
    }

    let model = args.source.load()?;
    reports::print_bigram_report(&model, args.top);

    if let Some(path) = &args.output {
        model.save(path)?;
    }
    Ok(())
}
