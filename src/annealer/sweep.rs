use super::{AnnealConfig, Annealer};
use crate::error::CfResult;
use crate::hypothesis::{Hypothesis, Message};
use crate::model::LanguageModel;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Cartesian grid of schedule parameters.
#[derive(Debug, Clone)]
pub struct SweepGrid {
    pub temperatures: Vec<f64>,
    pub cooling_rates: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            temperatures: vec![10.0, 100.0, 1000.0],
            cooling_rates: vec![0.95, 0.995, 0.9995],
            thresholds: vec![1e-1, 1e-3, 1e-5],
        }
    }
}

impl SweepGrid {
    /// Every combination, in temperature-major order.
    pub fn configs(&self, base: &AnnealConfig) -> Vec<AnnealConfig> {
        let mut out = Vec::new();
        for &t in &self.temperatures {
            for &rate in &self.cooling_rates {
                for &threshold in &self.thresholds {
                    out.push(AnnealConfig {
                        initial_temperature: t,
                        cooling_rate: rate,
                        threshold,
                        ..base.clone()
                    });
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub threshold: f64,
    pub seed: Option<u64>,
    pub steps: usize,
    pub accepted: usize,
    pub energy: f64,
    pub key: String,
    pub plaintext: String,
    #[serde(skip)]
    pub hypothesis: Hypothesis,
}

/// Runs one annealing search per valid grid point, in parallel.
///
/// Run `i` is seeded with `base.seed + i`, so a seeded sweep is reproducible
/// regardless of thread scheduling. Results come back sorted by energy.
pub fn run_grid(
    model: Arc<LanguageModel>,
    message: &Message,
    grid: &SweepGrid,
    base: &AnnealConfig,
) -> CfResult<Vec<SweepResult>> {
    let configs: Vec<AnnealConfig> = grid
        .configs(base)
        .into_iter()
        .filter(|c| match c.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping grid point: {}", e);
                false
            }
        })
        .enumerate()
        .map(|(i, mut c)| {
            c.seed = base.seed.map(|s| s.wrapping_add(i as u64));
            c
        })
        .collect();

    info!("🧪 Sweeping {} schedules", configs.len());
    let start = Instant::now();

    let alphabet = model.alphabet().clone();
    let mut results = configs
        .into_par_iter()
        .map(|config| -> CfResult<SweepResult> {
            let mut annealer = Annealer::new(model.clone(), config.clone())?;
            let outcome = annealer.run(Hypothesis::identity(message), message)?;
            let (hypothesis, energy) = outcome.preferred();
            let plain = hypothesis.decrypt(message.symbols());

            Ok(SweepResult {
                initial_temperature: config.initial_temperature,
                cooling_rate: config.cooling_rate,
                threshold: config.threshold,
                seed: config.seed,
                steps: outcome.steps,
                accepted: outcome.accepted,
                energy,
                key: hypothesis.key_string(&alphabet),
                plaintext: alphabet.decode(&plain),
                hypothesis: hypothesis.clone(),
            })
        })
        .collect::<CfResult<Vec<_>>>()?;

    results.sort_by(|a, b| a.energy.total_cmp(&b.energy));

    info!(
        "Sweep finished in {:.2}s",
        start.elapsed().as_secs_f32()
    );
    Ok(results)
}
