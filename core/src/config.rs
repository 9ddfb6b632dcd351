use crate::{
    chain::ChainSpec,
    naming::default_business_names,
    types::Iteration,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Population sizes the runner is tuned for. Outside this range a run
/// still goes ahead, with a warning.
pub const RECOMMENDED_POPULATION: RangeInclusive<usize> = 1..=50;
pub const RECOMMENDED_ITERATIONS: RangeInclusive<Iteration> = 10..=500;

pub const DEFAULT_POPULATION_SIZE: usize = 20;
pub const DEFAULT_MAX_ITERATIONS: Iteration = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Everything needed to set up one simulation.
/// Every field falls back to its default when missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub population_size: usize,
    pub max_iterations:  Iteration,
    pub seed:            u64,
    pub chain:           ChainSpec,
    pub business_names:  Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_iterations:  DEFAULT_MAX_ITERATIONS,
            seed:            DEFAULT_SEED,
            chain:           ChainSpec::business_creation(),
            business_names:  default_business_names().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SimConfig {
    /// Load a JSON config file.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Small config with hardcoded values for use in tests.
    pub fn default_test() -> Self {
        Self {
            population_size: 5,
            max_iterations:  50,
            seed:            0xC0FF_EE00,
            ..Self::default()
        }
    }

    /// Log a warning for each parameter outside its recommended range.
    /// Returns how many warnings were issued.
    pub fn warn_outside_recommended(&self) -> usize {
        warn_outside_recommended(self.population_size, self.max_iterations)
    }
}

pub fn warn_outside_recommended(population_size: usize, max_iterations: Iteration) -> usize {
    let mut warnings = 0;
    if !RECOMMENDED_POPULATION.contains(&population_size) {
        log::warn!(
            "population_size={population_size} is outside the recommended range {:?}",
            RECOMMENDED_POPULATION
        );
        warnings += 1;
    }
    if !RECOMMENDED_ITERATIONS.contains(&max_iterations) {
        log::warn!(
            "max_iterations={max_iterations} is outside the recommended range {:?}",
            RECOMMENDED_ITERATIONS
        );
        warnings += 1;
    }
    warnings
}
