use crate::error::{CfResult, CipherError};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cooling schedule and run options for one annealing search.
///
/// Temperature starts at `initial_temperature` and is multiplied by
/// `cooling_rate` after every step until it is no longer above `threshold`.
#[derive(Args, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnnealConfig {
    #[arg(long, default_value_t = 1000.0)]
    pub initial_temperature: f64,

    #[arg(long, default_value_t = 0.9995)]
    pub cooling_rate: f64,

    #[arg(long, default_value_t = 1e-5)]
    pub threshold: f64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Hard cap on steps, for schedules that would otherwise never reach the threshold.
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Also return the lowest-energy key seen, not only the final one.
    #[arg(long, default_value_t = false)]
    pub track_best: bool,

    #[arg(skip)]
    pub record_trace: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.9995,
            threshold: 1e-5,
            seed: None,
            max_iterations: None,
            track_best: false,
            record_trace: false,
        }
    }
}

impl AnnealConfig {
    pub fn new(initial_temperature: f64, cooling_rate: f64, threshold: f64) -> Self {
        Self {
            initial_temperature,
            cooling_rate,
            threshold,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_track_best(mut self, on: bool) -> Self {
        self.track_best = on;
        self
    }

    pub fn with_trace(mut self, on: bool) -> Self {
        self.record_trace = on;
        self
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CfResult<()> {
        if !(self.threshold > 0.0) {
            return Err(CipherError::Config(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if !(self.initial_temperature > self.threshold) {
            return Err(CipherError::Config(format!(
                "initial_temperature ({}) must be greater than threshold ({})",
                self.initial_temperature, self.threshold
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(CipherError::Config(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }

    /// Closed-form step count: `ceil(ln(threshold / T0) / ln(cooling_rate))`.
    ///
    /// An estimate in floating point. When `threshold / T0` is an exact power
    /// of `cooling_rate` the loop, which multiplies step by step, can finish
    /// one step away from this figure.
    pub fn planned_steps(&self) -> usize {
        let steps = (self.threshold / self.initial_temperature).ln() / self.cooling_rate.ln();
        steps.ceil().max(0.0) as usize
    }
}
