//! Configuration for a single `roll` invocation.

use std::path::PathBuf;

use roll_dice::StdRandom;
use roll_spark::DEFAULT_SPARK_FILE;

/// Settings resolved from flags and the environment.
#[derive(Debug, Clone)]
pub struct RollConfig {
    /// Spark data file (CSV export or JSON).
    pub spark_file: PathBuf,
    /// RNG seed for reproducible rolls; drawn from the OS when unset.
    pub seed: Option<u64>,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            spark_file: PathBuf::from(DEFAULT_SPARK_FILE),
            seed: None,
        }
    }
}

impl RollConfig {
    /// Use this spark file instead of the default, if one is given.
    pub fn with_spark_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.spark_file = path;
        }
        self
    }

    /// Seed the random source, if a seed is given.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Build the random source for this invocation.
    pub fn rng(&self) -> StdRandom {
        match self.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_os(),
        }
    }
}
