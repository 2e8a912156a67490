pub mod config;
pub mod rng;
pub mod sweep;

pub use self::config::AnnealConfig;
pub use self::rng::RandomSource;
use crate::error::CfResult;
use crate::hypothesis::{Hypothesis, Message};
use crate::model::LanguageModel;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Metropolis acceptance: 1 for any non-worsening move, `exp(-delta / T)` otherwise.
#[inline(always)]
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// One step of a recorded run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Temperature the step was evaluated at (before cooling).
    pub temperature: f64,
    pub delta: f64,
    pub probability: f64,
    pub accepted: bool,
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    /// Last accepted key when the temperature crossed the threshold.
    pub hypothesis: Hypothesis,
    pub energy: f64,
    pub steps: usize,
    pub accepted: usize,
    pub final_temperature: f64,
    /// Stopped by `max_iterations` before reaching the threshold.
    pub capped: bool,
    /// Lowest-energy key seen, when `track_best` is on.
    pub best: Option<(Hypothesis, f64)>,
    pub trace: Vec<StepRecord>,
}

impl AnnealOutcome {
    /// Best-seen key if tracked, else the final one.
    pub fn preferred(&self) -> (&Hypothesis, f64) {
        match &self.best {
            Some((h, e)) => (h, *e),
            None => (&self.hypothesis, self.energy),
        }
    }
}

/// Simulated annealing over substitution keys.
///
/// Single-threaded: the current key and the temperature are owned by the
/// run loop. The only randomness comes from the injected source.
pub struct Annealer<R: RandomSource = fastrand::Rng> {
    model: Arc<LanguageModel>,
    config: AnnealConfig,
    rng: R,
}

impl Annealer<fastrand::Rng> {
    /// Validates `config` and seeds a generator from `config.seed`.
    pub fn new(model: Arc<LanguageModel>, config: AnnealConfig) -> CfResult<Self> {
        let rng = rng::seeded(config.seed);
        Self::with_rng(model, config, rng)
    }
}

impl<R: RandomSource> Annealer<R> {
    pub fn with_rng(model: Arc<LanguageModel>, config: AnnealConfig, rng: R) -> CfResult<Self> {
        config.validate()?;
        Ok(Self { model, config, rng })
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    /// Anneals from `initial`. Fails before the first step when the
    /// message, key and model were not built over the same alphabet.
    pub fn run(&mut self, initial: Hypothesis, message: &Message) -> CfResult<AnnealOutcome> {
        let cfg = &self.config;
        let model = self.model.as_ref();
        message.check_model(model)?;
        initial.check_message(message)?;

        info!(
            "🔥 Annealing {} symbols: T0={} threshold={} rate={} (~{} steps)",
            message.len(),
            cfg.initial_temperature,
            cfg.threshold,
            cfg.cooling_rate,
            cfg.planned_steps()
        );

        let mut current = initial;
        // Energy is a pure function of key and message, so the accepted
        // candidate's score carries over to the next step.
        let mut current_energy = current.score(message, model);
        let mut best = cfg
            .track_best
            .then(|| (current.clone(), current_energy));

        let mut temperature = cfg.initial_temperature;
        let mut steps = 0usize;
        let mut accepted = 0usize;
        let mut capped = false;
        let mut trace = Vec::new();
        let report_interval = (cfg.planned_steps() / 10).max(1);

        while temperature > cfg.threshold {
            if let Some(limit) = cfg.max_iterations {
                if steps >= limit {
                    capped = true;
                    warn!(
                        "Iteration cap {} reached at T={:.6} before threshold {}",
                        limit, temperature, cfg.threshold
                    );
                    break;
                }
            }

            let candidate = current.neighbor(&mut self.rng);
            let candidate_energy = candidate.score(message, model);
            let delta = candidate_energy - current_energy;

            let probability = acceptance_probability(delta, temperature);
            let is_accepted = self.rng.unit() < probability;

            if cfg.record_trace {
                trace.push(StepRecord {
                    temperature,
                    delta,
                    probability,
                    accepted: is_accepted,
                });
            }

            if is_accepted {
                current = candidate;
                current_energy = candidate_energy;
                accepted += 1;

                if let Some((best_key, best_energy)) = best.as_mut() {
                    if current_energy < *best_energy {
                        *best_key = current.clone();
                        *best_energy = current_energy;
                    }
                }
            }

            temperature *= cfg.cooling_rate;
            steps += 1;

            if steps % report_interval == 0 {
                debug!(
                    "Step {:7} | T: {:.6} | Energy: {:.2} | Accepted: {}",
                    steps, temperature, current_energy, accepted
                );
            }
        }

        info!(
            "❄️  Finished after {} steps ({} accepted). Energy: {:.2}",
            steps, accepted, current_energy
        );

        Ok(AnnealOutcome {
            hypothesis: current,
            energy: current_energy,
            steps,
            accepted,
            final_temperature: temperature,
            capped,
            best,
            trace,
        })
    }
}
