use super::{MessageSource, ModelSource};
use crate::reports;
use cipherforge::annealer::sweep::{self, SweepGrid};
use cipherforge::annealer::AnnealConfig;
use cipherforge::error::CfResult;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub source: ModelSource,

    #[command(flatten)]
    pub input: MessageSource,

    #[arg(long, value_delimiter = ',', default_value = "10,100,1000")]
    pub temps: Vec<f64>,

    #[arg(long, value_delimiter = ',', default_value = "0.95,0.995,0.9995")]
    pub cooling_rates: Vec<f64>,

    #[arg(long, value_delimiter = ',', default_value = "0.1,0.001,0.00001")]
    pub thresholds: Vec<f64>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub max_iterations: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub track_best: bool,

    /// Write every result to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: SweepArgs) -> CfResult<()> {
    let model = Arc::new(args.source.load()?);
    let message = args.input.load(&model)?;

    let grid = SweepGrid {
        temperatures: args.temps.clone(),
        cooling_rates: args.cooling_rates.clone(),
        thresholds: args.thresholds.clone(),
    };
    let base = AnnealConfig {
        seed: args.seed,
        max_iterations: args.max_iterations,
        track_best: args.track_best,
        ..Default::default()
    };

    let results = sweep::run_grid(model, &message, &grid, &base)?;
    reports::print_sweep_report(&results);

    if let Some(best) = results.first() {
        println!("\n=== 🏆 BEST SCHEDULE ===");
        println!(
            "T0={} rate={} threshold={}",
            best.initial_temperature, best.cooling_rate, best.threshold
        );
        println!("Energy: {:.4}", best.energy);
        println!("Plaintext: {:?}", best.plaintext);
    }

    if let Some(path) = &args.csv {
        reports::write_sweep_csv(path, &results)?;
        info!("📝 Results written to {:?}", path);
    }
    Ok(())
}
