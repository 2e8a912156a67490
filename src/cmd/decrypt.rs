use super::{MessageSource, ModelSource};
use crate::reports;
use cipherforge::annealer::{AnnealConfig, Annealer};
use cipherforge::error::CfResult;
use cipherforge::hypothesis::Hypothesis;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub source: ModelSource,

    #[command(flatten)]
    pub input: MessageSource,

    #[command(flatten)]
    pub anneal: AnnealConfig,

    /// JSON schedule file; replaces the schedule flags (except --seed).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Starting key (a permutation of the alphabet) instead of the identity.
    #[arg(short, long)]
    pub key: Option<String>,
}

pub fn run(args: DecryptArgs) -> CfResult<()> {
    let model = Arc::new(args.source.load()?);
    let message = args.input.load(&model)?;
    let alphabet = model.alphabet().clone();

    let mut config = match &args.config {
        Some(path) => {
            info!("⚖️  Loading schedule from {:?}", path);
            AnnealConfig::load_from_file(path)?
        }
        None => args.anneal.clone(),
    };
    if args.anneal.seed.is_some() {
        config.seed = args.anneal.seed;
    }

    let initial = match &args.key {
        Some(k) => Hypothesis::from_key_str(&alphabet, &message, k)?,
        None => Hypothesis::identity(&message),
    };

    let mut annealer = Annealer::new(model.clone(), config)?;
    let outcome = annealer.run(initial, &message)?;

    let plain = outcome.hypothesis.decrypt(message.symbols());
    reports::print_key_table("FINAL", &outcome.hypothesis.mapping(&alphabet));

    println!("\n=== 🔓 RESULT ===");
    println!("Steps: {} ({} accepted)", outcome.steps, outcome.accepted);
    if outcome.capped {
        println!("Stopped early: iteration cap reached");
    }
    println!("Energy: {:.4}", outcome.energy);
    println!("Key: {:?}", outcome.hypothesis.key_string(&alphabet));
    println!("Plaintext: {:?}", alphabet.decode(&plain));

    if let Some((best, energy)) = &outcome.best {
        let best_plain = best.decrypt(message.symbols());
        println!("Best Energy: {:.4}", energy);
        println!("Best Plaintext: {:?}", alphabet.decode(&best_plain));
    }
    Ok(())
}
